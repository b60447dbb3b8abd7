use crate::core::{CouponId, CouponProvider, Evaluator, FanoutError, Logger, Result, UserId};

/// Checks whether a user may redeem a coupon against caller-supplied rules.
pub struct CouponManager<L: Logger, P: CouponProvider> {
    logger: L,
    coupon_provider: P,
}

impl<L: Logger, P: CouponProvider> CouponManager<L, P> {
    pub fn new(logger: L, coupon_provider: P) -> Self {
        Self {
            logger,
            coupon_provider,
        }
    }

    /// Returns `true` when every evaluator accepts the coupon for `user_id`.
    ///
    /// `None` is rejected with [`FanoutError::InvalidArgument`] before any
    /// lookup; an empty slice permits redemption. All evaluators run exactly
    /// once, even after one has already returned `false`.
    pub async fn can_redeem_coupon(
        &self,
        coupon_id: CouponId,
        user_id: UserId,
        evaluators: Option<&[&dyn Evaluator]>,
    ) -> Result<bool> {
        let evaluators = evaluators.ok_or(FanoutError::InvalidArgument {
            argument: "evaluators",
        })?;

        let coupon = self
            .coupon_provider
            .retrieve(coupon_id)
            .await?
            .ok_or(FanoutError::NotFound { coupon_id })?;

        if evaluators.is_empty() {
            self.logger.log(&format!(
                "Coupon {} redeemable by user {}: no evaluators",
                coupon_id, user_id
            ));
            return Ok(true);
        }

        let mut allowed = true;
        for evaluator in evaluators {
            // Non-short-circuiting AND; every evaluator must be invoked.
            allowed &= evaluator.evaluate(&coupon, user_id);
        }

        self.logger.log(&format!(
            "Coupon {} redeemable by user {}: {} ({} evaluators)",
            coupon_id,
            user_id,
            allowed,
            evaluators.len()
        ));
        Ok(allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coupon;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockCouponProvider {
        coupons: Arc<Mutex<HashMap<CouponId, Coupon>>>,
        requested: Arc<Mutex<Vec<CouponId>>>,
    }

    impl MockCouponProvider {
        fn with_coupon(coupon_id: CouponId) -> Self {
            let provider = Self::default();
            provider
                .coupons
                .lock()
                .unwrap()
                .insert(coupon_id, Coupon::new(coupon_id));
            provider
        }

        fn requested(&self) -> Vec<CouponId> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CouponProvider for MockCouponProvider {
        async fn retrieve(&self, coupon_id: CouponId) -> Result<Option<Coupon>> {
            self.requested.lock().unwrap().push(coupon_id);
            Ok(self.coupons.lock().unwrap().get(&coupon_id).cloned())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingLogger {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl Logger for RecordingLogger {
        fn log(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    struct CountingEvaluator {
        verdict: bool,
        expected_user: UserId,
        calls: AtomicUsize,
    }

    impl CountingEvaluator {
        fn new(verdict: bool, expected_user: UserId) -> Self {
            Self {
                verdict,
                expected_user,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Evaluator for CountingEvaluator {
        fn evaluate(&self, _coupon: &Coupon, user_id: UserId) -> bool {
            assert_eq!(user_id, self.expected_user);
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict
        }
    }

    #[tokio::test]
    async fn test_retrieves_requested_coupon_once() {
        let coupon_id = CouponId::new();
        let provider = MockCouponProvider::with_coupon(coupon_id);
        let manager = CouponManager::new(RecordingLogger::default(), provider.clone());

        manager
            .can_redeem_coupon(coupon_id, UserId::new(), Some(&[]))
            .await
            .unwrap();

        assert_eq!(provider.requested(), vec![coupon_id]);
    }

    #[tokio::test]
    async fn test_returns_true_without_evaluators() {
        let coupon_id = CouponId::new();
        let logger = RecordingLogger::default();
        let manager =
            CouponManager::new(logger.clone(), MockCouponProvider::with_coupon(coupon_id));

        let result = manager
            .can_redeem_coupon(coupon_id, UserId::new(), Some(&[]))
            .await
            .unwrap();

        assert!(result);
        assert_eq!(logger.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_coupon_is_not_found() {
        let coupon_id = CouponId::new();
        let user_id = UserId::new();
        let manager = CouponManager::new(RecordingLogger::default(), MockCouponProvider::default());
        let evaluator = CountingEvaluator::new(true, user_id);
        let evaluators: Vec<&dyn Evaluator> = vec![&evaluator];

        let result = manager
            .can_redeem_coupon(coupon_id, user_id, Some(evaluators.as_slice()))
            .await;

        match result {
            Err(FanoutError::NotFound { coupon_id: missing }) => assert_eq!(missing, coupon_id),
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert_eq!(evaluator.calls(), 0);
    }

    #[tokio::test]
    async fn test_absent_evaluators_is_invalid_argument() {
        let coupon_id = CouponId::new();
        let provider = MockCouponProvider::with_coupon(coupon_id);
        let manager = CouponManager::new(RecordingLogger::default(), provider.clone());

        let result = manager
            .can_redeem_coupon(coupon_id, UserId::new(), None)
            .await;

        assert!(matches!(
            result,
            Err(FanoutError::InvalidArgument {
                argument: "evaluators"
            })
        ));
        assert!(provider.requested().is_empty());
    }

    #[tokio::test]
    async fn test_absent_evaluators_checked_before_lookup_of_unknown_coupon() {
        let manager = CouponManager::new(RecordingLogger::default(), MockCouponProvider::default());

        let result = manager
            .can_redeem_coupon(CouponId::new(), UserId::new(), None)
            .await;

        assert!(matches!(result, Err(FanoutError::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn test_returns_true_when_all_evaluators_accept() {
        let coupon_id = CouponId::new();
        let user_id = UserId::new();
        let manager =
            CouponManager::new(RecordingLogger::default(), MockCouponProvider::with_coupon(coupon_id));
        let first = CountingEvaluator::new(true, user_id);
        let second = CountingEvaluator::new(true, user_id);
        let evaluators: Vec<&dyn Evaluator> = vec![&first, &second];

        let result = manager
            .can_redeem_coupon(coupon_id, user_id, Some(evaluators.as_slice()))
            .await
            .unwrap();

        assert!(result);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn test_one_rejection_returns_false_and_runs_every_evaluator() {
        let coupon_id = CouponId::new();
        let user_id = UserId::new();
        let manager =
            CouponManager::new(RecordingLogger::default(), MockCouponProvider::with_coupon(coupon_id));
        let first = CountingEvaluator::new(false, user_id);
        let second = CountingEvaluator::new(true, user_id);
        let evaluators: Vec<&dyn Evaluator> = vec![&first, &second];

        let result = manager
            .can_redeem_coupon(coupon_id, user_id, Some(evaluators.as_slice()))
            .await
            .unwrap();

        assert!(!result);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn test_all_rejections_return_false() {
        let coupon_id = CouponId::new();
        let user_id = UserId::new();
        let manager =
            CouponManager::new(RecordingLogger::default(), MockCouponProvider::with_coupon(coupon_id));
        let first = CountingEvaluator::new(false, user_id);
        let second = CountingEvaluator::new(false, user_id);
        let evaluators: Vec<&dyn Evaluator> = vec![&first, &second];

        let result = manager
            .can_redeem_coupon(coupon_id, user_id, Some(evaluators.as_slice()))
            .await
            .unwrap();

        assert!(!result);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn test_closures_are_evaluators() {
        let coupon_id = CouponId::new();
        let user_id = UserId::new();
        let manager =
            CouponManager::new(RecordingLogger::default(), MockCouponProvider::with_coupon(coupon_id));
        let matches_coupon = move |coupon: &Coupon, _user: UserId| coupon.id == coupon_id;
        let matches_user = move |_coupon: &Coupon, user: UserId| user == user_id;
        let evaluators: Vec<&dyn Evaluator> = vec![&matches_coupon, &matches_user];

        let result = manager
            .can_redeem_coupon(coupon_id, user_id, Some(evaluators.as_slice()))
            .await
            .unwrap();

        assert!(result);
    }
}
