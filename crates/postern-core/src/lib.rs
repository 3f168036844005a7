//! Shared configuration, constants, and error types for the postern client.

pub mod config;
pub mod constants;
pub mod error;
