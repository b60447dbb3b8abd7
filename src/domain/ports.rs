use crate::domain::model::{Coupon, CouponId, FetchResponse, UserId};
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Issues one request and reports its declared content length.
///
/// Implementations should stop waiting once `cancel` fires. Transport
/// failures are returned unchanged.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<FetchResponse>;
}

/// Read access to the coupon store. `Ok(None)` means the id did not resolve.
#[async_trait]
pub trait CouponProvider: Send + Sync {
    async fn retrieve(&self, coupon_id: CouponId) -> Result<Option<Coupon>>;
}

pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

/// Decides whether `user_id` may redeem `coupon`. Must be side-effect free.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, coupon: &Coupon, user_id: UserId) -> bool;
}

impl<F> Evaluator for F
where
    F: Fn(&Coupon, UserId) -> bool + Send + Sync,
{
    fn evaluate(&self, coupon: &Coupon, user_id: UserId) -> bool {
        self(coupon, user_id)
    }
}

pub trait ConfigProvider: Send + Sync {
    fn urls(&self) -> &[String];
    fn timeout_seconds(&self) -> Option<u64>;
    fn user_agent(&self) -> Option<&str>;
}
