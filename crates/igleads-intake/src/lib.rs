pub mod client;
pub mod error;
pub mod types;

pub use client::IntakeClient;
pub use error::IntakeError;
pub use types::{CheckResponse, SubmitPayload, SOCIAL_TYPE};
