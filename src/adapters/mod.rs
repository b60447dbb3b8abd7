// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod log;

pub use http::ReqwestHttpClient;
pub use log::TracingLogger;
