pub mod client;
pub mod requests;

pub use crate::domain::model::{ApiRequest, Credentials, WireParams};
pub use crate::domain::ports::{ApiTransport, BuildRequest, ConfigProvider};
pub use crate::utils::error::Result;
pub use client::{ClientSettings, KiotVietClient};
