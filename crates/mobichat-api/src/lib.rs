//! Model API clients for mobichat

pub mod mistral_client;

pub use mistral_client::{ChatOutcome, LlmClient, LlmError, MistralClient, MISTRAL_API_URL};
