// Application Layer - Session use case and response rules

pub mod response;
pub mod session;

// Re-exports
pub use response::{classify, ServerReply};
pub use session::Session;
