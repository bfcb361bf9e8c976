// Reqwest HTTP Transport
// Blocking client bound to one AskOmics server

use askomics_core::domain::ServerEndpoint;
use askomics_core::port::{
    Cookie, FileUpload, Headers, HttpResponse, HttpTransport, TransportError,
};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("askocli/", env!("CARGO_PKG_VERSION"));

/// Builder for [`ReqwestTransport`]
pub struct ReqwestTransportBuilder {
    endpoint: ServerEndpoint,
    timeout: Option<Duration>,
}

impl ReqwestTransportBuilder {
    /// Per-request timeout; reqwest's default applies when unset
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ReqwestTransport, TransportError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(ReqwestTransport {
            client,
            endpoint: self.endpoint,
        })
    }
}

/// HTTP transport backed by `reqwest::blocking`
///
/// Cookies are not kept by the client itself: they are handed back in
/// each [`HttpResponse`] and re-sent by the session as a header.
pub struct ReqwestTransport {
    client: Client,
    endpoint: ServerEndpoint,
}

impl ReqwestTransport {
    pub fn new(endpoint: ServerEndpoint) -> Result<Self, TransportError> {
        Self::builder(endpoint).build()
    }

    pub fn builder(endpoint: ServerEndpoint) -> ReqwestTransportBuilder {
        ReqwestTransportBuilder {
            endpoint,
            timeout: None,
        }
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        &self.endpoint
    }

    fn send(&self, request: RequestBuilder, headers: &Headers) -> Result<HttpResponse, TransportError> {
        let request = headers
            .iter()
            .fold(request, |request, (name, value)| {
                request.header(name.as_str(), value.as_str())
            });

        let response = request.send().map_err(map_send_error)?;
        into_http_response(response)
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.endpoint.url_for(path);
        debug!(url = %url, "POST json");
        self.send(self.client.post(&url).json(body), headers)
    }

    fn post_file(
        &self,
        path: &str,
        upload: FileUpload,
        headers: &Headers,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.endpoint.url_for(path);
        let FileUpload {
            field_name,
            file_name,
            file,
        } = upload;

        let length = file.metadata()?.len();
        debug!(url = %url, file_name = %file_name, bytes = length, "POST multipart");

        let part = Part::reader_with_length(file, length).file_name(file_name);
        let form = Form::new().part(field_name, part);
        self.send(self.client.post(&url).multipart(form), headers)
    }
}

fn map_send_error(e: reqwest::Error) -> TransportError {
    if e.is_connect() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

fn into_http_response(response: Response) -> Result<HttpResponse, TransportError> {
    let status = response.status().as_u16();
    let cookies = response
        .cookies()
        .map(|cookie| Cookie::new(cookie.name(), cookie.value()))
        .collect();
    let body = response
        .text()
        .map_err(|e| TransportError::Request(format!("Failed to read response body: {}", e)))?;

    Ok(HttpResponse {
        status,
        body,
        cookies,
    })
}
