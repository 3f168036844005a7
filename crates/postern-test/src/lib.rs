//! Integration test support for the postern workspace.
//!
//! Provides a scripted [`FakeTransport`] and shared XML fixtures.

pub mod fake;
pub mod fixtures;

pub use fake::FakeTransport;
