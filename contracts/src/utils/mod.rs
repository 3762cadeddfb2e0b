//! Common Smart Contracts utilities.
pub mod introspection;
pub mod reason;
