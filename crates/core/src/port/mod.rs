// Port Layer - Interfaces for external dependencies

pub mod transport;

// Re-exports
pub use transport::{Cookie, FileUpload, Headers, HttpResponse, HttpTransport, TransportError};
