pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{ReqwestHttpClient, TracingLogger};
pub use core::{content_length::ContentLengthAggregator, coupon_manager::CouponManager};
pub use domain::model::{Coupon, CouponId, FetchResponse, UserId};
pub use domain::ports::{ConfigProvider, CouponProvider, Evaluator, HttpClient, Logger};
pub use utils::error::{FanoutError, Result};
