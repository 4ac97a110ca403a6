//! Logging reset code notifier
//!
//! Records that a code was issued without delivering it anywhere. Used in
//! development and wherever no real gateway is configured.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use ecom_core::domain::RequestContext;
use ecom_core::errors::{DomainError, DomainResult};
use ecom_core::services::ResetCodeNotifierTrait;
use ecom_shared::utils::{is_email_login, is_phone_login, mask_login};

/// Notifier that logs reset code deliveries instead of sending them
///
/// The code itself is never written to the log.
#[derive(Clone)]
pub struct LogResetCodeNotifier {
    /// Counter for tracking number of notifications sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate delivery failures (for testing)
    simulate_failure: bool,
}

impl LogResetCodeNotifier {
    pub fn new() -> Self {
        Self::with_options(false)
    }

    /// Create a notifier that optionally fails every delivery
    pub fn with_options(simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
        }
    }

    /// Get the total number of notifications sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the notification counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Channel a real gateway would use for this login
    fn channel(login: &str) -> &'static str {
        if is_email_login(login) {
            "email"
        } else if is_phone_login(login) {
            "sms"
        } else {
            "unknown"
        }
    }
}

impl Default for LogResetCodeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResetCodeNotifierTrait for LogResetCodeNotifier {
    async fn send_reset_code(&self, ctx: &RequestContext, login: &str, code: &str) -> DomainResult<()> {
        ctx.ensure_active()?;

        let masked_login = mask_login(login);

        if self.simulate_failure {
            warn!(
                request_id = %ctx.request_id,
                login = %masked_login,
                "Log notifier simulating delivery failure"
            );
            return Err(DomainError::notification("Simulated reset code delivery failure"));
        }

        let message_id = format!("log_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "reset_code_notifier",
            request_id = %ctx.request_id,
            provider = "log",
            channel = Self::channel(login),
            login = %masked_login,
            message_id = %message_id,
            code_length = code.len(),
            count,
            "Reset code delivered (logged)"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecom_core::errors::ErrorKind;

    #[tokio::test]
    async fn test_send_counts_messages() {
        let notifier = LogResetCodeNotifier::new();
        let ctx = RequestContext::new();

        for i in 1..=3 {
            notifier
                .send_reset_code(&ctx, "jane@example.com", "123456")
                .await
                .unwrap();
            assert_eq!(notifier.get_message_count(), i);
        }

        notifier.reset_counter();
        assert_eq!(notifier.get_message_count(), 0);
    }

    #[tokio::test]
    async fn test_simulated_failure() {
        let notifier = LogResetCodeNotifier::with_options(true);
        let err = notifier
            .send_reset_code(&RequestContext::new(), "jane@example.com", "123456")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotificationFailure);
        assert_eq!(notifier.get_message_count(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_context() {
        let notifier = LogResetCodeNotifier::new();
        let ctx = RequestContext::new();
        ctx.cancel_token.cancel();

        let err = notifier
            .send_reset_code(&ctx, "jane@example.com", "123456")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Cancelled));
        assert_eq!(notifier.get_message_count(), 0);
    }

    #[test]
    fn test_channel_by_login_shape() {
        assert_eq!(LogResetCodeNotifier::channel("jane@example.com"), "email");
        assert_eq!(LogResetCodeNotifier::channel("+15550100123"), "sms");
        assert_eq!(LogResetCodeNotifier::channel("valid login"), "unknown");
    }
}
