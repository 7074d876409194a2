use crate::domain::model::ApiRequest;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// Executes one [`ApiRequest`] against the remote service.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<Value>;
}

/// Turns caller-facing tool parameters into the wire request.
pub trait BuildRequest {
    fn build_request(&self) -> Result<ApiRequest>;
}
