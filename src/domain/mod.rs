// Domain layer: request-side models and ports. No HTTP types leak in here.

pub mod model;
pub mod ports;
