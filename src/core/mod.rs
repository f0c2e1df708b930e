//! Core types and error handling.

pub mod error;

pub use error::{ErrorContext, PiptreeError, user_friendly_error};
