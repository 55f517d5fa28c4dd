// Domain layer: request/response models and the upstream port. No HTTP client here.

pub mod model;
pub mod ports;
