// AskOmics Infrastructure - HTTP Adapter
// Implements: HttpTransport over blocking reqwest

pub mod reqwest_transport;

pub use reqwest_transport::{ReqwestTransport, ReqwestTransportBuilder};
