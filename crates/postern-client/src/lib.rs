pub mod client;
pub mod error;

pub use client::ServiceClient;
pub use error::{ClientError, ClientResult};
