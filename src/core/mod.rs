pub mod content_length;
pub mod coupon_manager;

pub use crate::domain::model::{Coupon, CouponId, FetchResponse, UserId};
pub use crate::domain::ports::{ConfigProvider, CouponProvider, Evaluator, HttpClient, Logger};
pub use crate::utils::error::{FanoutError, Result};
