//! Chat session and dispatch loop for mobichat

pub mod conversation_logger;
pub mod session;

pub use conversation_logger::ConversationLogger;
pub use session::{ChatSession, SYSTEM_PROMPT};
