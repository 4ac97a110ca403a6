//! One-time reset code entity for the forgot-password flow.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Length of the reset code
pub const RESET_CODE_LENGTH: usize = 6;

/// Default expiration time for reset codes (15 minutes)
pub const DEFAULT_RESET_CODE_EXPIRATION_MINUTES: i64 = 15;

/// One-time code authorising a password reset for a login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetCode {
    /// The 6-digit code
    pub code: String,

    /// Login the code was issued for
    pub login: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been consumed by a reset
    pub is_used: bool,
}

impl ResetCode {
    /// Issues a new code for `login` with the default expiration
    pub fn new(login: impl Into<String>) -> Self {
        let now = Utc::now();
        Self::issued(
            login,
            now,
            now + Duration::minutes(DEFAULT_RESET_CODE_EXPIRATION_MINUTES),
        )
    }

    /// Issues a new code for `login` expiring after `expiration_minutes`
    ///
    /// # Errors
    ///
    /// * `DomainError::Internal` - The expiry is not representable
    pub fn new_with_expiration(
        login: impl Into<String>,
        expiration_minutes: i64,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        let expires_at = Duration::try_minutes(expiration_minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                DomainError::internal(format!(
                    "reset code expiration of {} minutes is out of range",
                    expiration_minutes
                ))
            })?;
        Ok(Self::issued(login, now, expires_at))
    }

    fn issued(login: impl Into<String>, created_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            code: Self::generate_code(),
            login: login.into(),
            created_at,
            expires_at,
            is_used: false,
        }
    }

    /// Generates a 6-digit code from the OS CSPRNG
    pub(crate) fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:0width$}", code, width = RESET_CODE_LENGTH)
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// A code is live while it is neither used nor expired
    pub fn is_live(&self) -> bool {
        !self.is_used && !self.is_expired()
    }

    /// Remaining lifetime, zero once expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }

    /// Marks the code as consumed
    pub fn mark_as_used(&mut self) {
        self.is_used = true;
    }
}
