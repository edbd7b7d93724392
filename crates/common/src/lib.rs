//! Shared building blocks for the dashboard: error taxonomy, the toast
//! notification service, text sanitization and date helpers.

pub mod dates;
pub mod errors;
pub mod notify;
pub mod sanitize;

pub use errors::{AppError, AppResult, ExternalServiceFailure, StorageFailure, ValidationFailure};
pub use notify::{Notifier, Severity, Toast};
pub use sanitize::{sanitize, sanitize_line};
