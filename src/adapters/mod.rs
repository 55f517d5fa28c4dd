// Adapters layer: the reqwest-backed upstream client and the Lambda HTTP conversions.

pub mod http;
#[cfg(feature = "lambda")]
pub mod lambda;

pub use http::SpoonacularClient;
