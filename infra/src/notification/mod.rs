//! Delivery of reset codes to account owners
//!
//! Only a logging notifier ships here; email and SMS gateways plug in by
//! implementing `ResetCodeNotifierTrait`.

pub mod log_notifier;

pub use log_notifier::LogResetCodeNotifier;
