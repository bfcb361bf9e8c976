// HTTP Transport Port
// Abstraction over the wire so the session can be driven without a server

use std::fs::File;
use thiserror::Error;

/// Header name/value pairs attached to a request
pub type Headers = [(String, String)];

/// Cookie set by the server on a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Raw reply as received from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    pub cookies: Vec<Cookie>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            cookies: Vec::new(),
        }
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push(Cookie::new(name, value));
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// File handed to the transport for a multipart upload
///
/// The transport owns the handle; it is closed when the request is done.
#[derive(Debug)]
pub struct FileUpload {
    pub field_name: String,
    pub file_name: String,
    pub file: File,
}

/// Transport errors (no response was obtained)
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP Transport trait
///
/// Implementations:
/// - ReqwestTransport (askomics-infra-http): blocking reqwest client
/// - MockTransport: scripted replies for tests
///
/// Each call is one blocking POST; non-2xx statuses are returned as
/// responses, not errors.
pub trait HttpTransport: Send + Sync {
    /// POST a JSON body to `path`
    fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError>;

    /// POST a multipart body holding a single file to `path`
    fn post_file(
        &self,
        path: &str,
        upload: FileUpload,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        (**self).post_json(path, body, headers)
    }

    fn post_file(
        &self,
        path: &str,
        upload: FileUpload,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        (**self).post_file(path, upload, headers)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Read;
    use std::sync::Mutex;

    /// Body of a request seen by the mock
    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedBody {
        Json(serde_json::Value),
        File {
            field_name: String,
            file_name: String,
            contents: Vec<u8>,
        },
    }

    /// Request seen by the mock
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub path: String,
        pub body: RecordedBody,
        pub headers: Vec<(String, String)>,
    }

    impl RecordedRequest {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        }

        pub fn json(&self) -> Option<&serde_json::Value> {
            match &self.body {
                RecordedBody::Json(value) => Some(value),
                RecordedBody::File { .. } => None,
            }
        }
    }

    /// Scripted outcome of one call
    #[derive(Debug, Clone)]
    pub enum MockReply {
        Respond(HttpResponse),
        /// Fail as if the server were unreachable
        Unreachable(String),
    }

    /// Mock HTTP transport for testing
    ///
    /// Replies are consumed in order; a call with nothing queued fails
    /// with a connection error.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        replies: Mutex<VecDeque<MockReply>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, response: HttpResponse) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(MockReply::Respond(response));
            self
        }

        pub fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
            self.respond(HttpResponse::new(status, body.to_string()))
        }

        pub fn unreachable(self, message: impl Into<String>) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(MockReply::Unreachable(message.into()));
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn last_request(&self) -> Option<RecordedRequest> {
            self.requests.lock().unwrap().last().cloned()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn record(&self, path: &str, body: RecordedBody, headers: &Headers) {
            self.requests.lock().unwrap().push(RecordedRequest {
                path: path.to_string(),
                body,
                headers: headers.to_vec(),
            });
        }

        fn next_reply(&self) -> Result<HttpResponse, TransportError> {
            match self.replies.lock().unwrap().pop_front() {
                Some(MockReply::Respond(response)) => Ok(response),
                Some(MockReply::Unreachable(message)) => Err(TransportError::Connection(message)),
                None => Err(TransportError::Connection(
                    "no mock reply queued".to_string(),
                )),
            }
        }
    }

    impl HttpTransport for MockTransport {
        fn post_json(
            &self,
            path: &str,
            body: &serde_json::Value,
            headers: &Headers,
        ) -> Result<HttpResponse, TransportError> {
            self.record(path, RecordedBody::Json(body.clone()), headers);
            self.next_reply()
        }

        fn post_file(
            &self,
            path: &str,
            upload: FileUpload,
            headers: &Headers,
        ) -> Result<HttpResponse, TransportError> {
            let FileUpload {
                field_name,
                file_name,
                mut file,
            } = upload;
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;

            self.record(
                path,
                RecordedBody::File {
                    field_name,
                    file_name,
                    contents,
                },
                headers,
            );
            self.next_reply()
        }
    }
}
