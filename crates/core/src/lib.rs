// AskOmics Core - Domain Logic & Ports
// NO HTTP client dependencies: transports plug in through port::HttpTransport

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::Session;
pub use error::{CallError, ClientError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
