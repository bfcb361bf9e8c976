// Session Client Use Case
// authenticate -> configure -> upload -> integrate, one blocking request per step

use crate::application::response::{classify, ServerReply};
use crate::domain::api::{
    paths, CsvIntegrationRequest, GffIntegrationRequest, GuessHeaderRequest, IntegrationKind,
    LoginRequest, TtlIntegrationRequest, REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE,
};
use crate::domain::{
    parse_column_indices, ColumnIndex, ColumnTypes, DatasetSettings, IntoColumnIndex,
};
use crate::error::{CallError, ClientError, Result};
use crate::port::{Cookie, FileUpload, HttpTransport};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use tracing::{debug, info, warn};

const COOKIE_HEADER: &str = "Cookie";
const TYPES_FIELD: &str = "types";

/// Session with one AskOmics server
///
/// Holds the API key, the session cookie obtained at login and the
/// settings of the dataset being integrated. The cookie is never checked
/// locally: calls made before [`Session::authenticate`] go out without it
/// and the server's refusal surfaces as that call's error.
///
/// # Example
///
/// ```no_run
/// # use askomics_core::{Session, Result};
/// # use askomics_core::port::HttpTransport;
/// # fn example(transport: impl HttpTransport) -> Result<()> {
/// let mut session = Session::new(transport, "my-api-key", "ttl");
/// session.authenticate()?;
/// session.upload_file("data/genes.ttl")?;
/// session.set_visibility(true);
/// let report = session.integrate_ttl()?;
/// println!("{report}");
/// # Ok(())
/// # }
/// ```
pub struct Session<T: HttpTransport> {
    transport: T,
    api_key: String,
    cookie: Option<String>,
    settings: DatasetSettings,
}

impl<T: HttpTransport> Session<T> {
    pub fn new(transport: T, api_key: impl Into<String>, forced_type: impl Into<String>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            cookie: None,
            settings: DatasetSettings::new(forced_type),
        }
    }

    // ------------------------------------------------------------------
    // Server calls
    // ------------------------------------------------------------------

    /// Log in with the API key and keep the returned session cookie
    ///
    /// # Errors
    /// - `ClientError::Auth` on a non-success status or a rejected key;
    ///   the stored cookie is left unchanged
    pub fn authenticate(&mut self) -> Result<()> {
        let reply = self
            .call(paths::LOGIN, &LoginRequest {
                apikey: &self.api_key,
            })
            .map_err(ClientError::Auth)?;

        match cookie_header(&reply.cookies) {
            Some(cookie) => self.cookie = Some(cookie),
            None => warn!("Login accepted but the server set no session cookie"),
        }

        info!(status = reply.status, "Authenticated with AskOmics");
        Ok(())
    }

    /// Select `path` and upload it into the user's temporary directory
    ///
    /// Returns the raw response body (the server's temp file info).
    ///
    /// # Errors
    /// - `ClientError::Config` if `path` has no file name
    /// - `ClientError::Upload` if the file cannot be read or the server
    ///   refuses it
    pub fn upload_file(&mut self, path: impl Into<PathBuf>) -> Result<String> {
        let path: PathBuf = path.into();
        self.settings.file_path = Some(path.clone());
        let file_name = self.settings.file_name()?;

        let file = File::open(&path).map_err(|e| ClientError::Upload(CallError::Io(e)))?;
        let upload = FileUpload {
            field_name: file_name.clone(),
            file_name: file_name.clone(),
            file,
        };

        debug!(file_name = %file_name, path = %path.display(), "Uploading file");
        let response = self
            .transport
            .post_file(paths::UPLOAD, upload, &self.headers())
            .map_err(|e| ClientError::Upload(e.into()))?;
        let reply = classify(response).map_err(ClientError::Upload)?;

        info!(file_name = %file_name, "File uploaded");
        Ok(reply.body)
    }

    /// Ask the server to infer the column types of the uploaded file
    ///
    /// The stored list gets `entity_start` at index 0.
    ///
    /// # Errors
    /// - `ClientError::Config` if no file is selected
    /// - `ClientError::Guess` on failure or a reply without `types`
    pub fn guess_column_types(&mut self) -> Result<&ColumnTypes> {
        let file_name = self.settings.file_name()?;
        let reply = self
            .call(paths::GUESS_CSV_HEADER, &GuessHeaderRequest {
                filename: &file_name,
            })
            .map_err(ClientError::Guess)?;

        let types = reply
            .json
            .get(TYPES_FIELD)
            .cloned()
            .ok_or(CallError::MissingField(TYPES_FIELD))
            .and_then(|types| {
                serde_json::from_value::<Vec<String>>(types).map_err(CallError::InvalidBody)
            })
            .map_err(ClientError::Guess)?;

        let types = ColumnTypes::new(types);
        info!(file_name = %file_name, columns = types.len(), "Column types guessed");
        Ok(self.settings.column_types.insert(types))
    }

    /// Integrate the selected CSV/TSV file into the triplestore
    ///
    /// Sends the stored column types (or `null`), key and disabled
    /// columns, visibility and forced type. Returns the raw report.
    pub fn integrate_csv(&self) -> Result<String> {
        let kind = IntegrationKind::Csv;
        let file_name = self.settings.file_name()?;
        let request = CsvIntegrationRequest {
            file_name: &file_name,
            col_types: self.settings.column_types.as_ref(),
            disabled_columns: &self.settings.disabled_columns,
            key_columns: &self.settings.key_columns,
            public: self.settings.public,
            forced_type: &self.settings.forced_type,
        };
        self.integrate(kind, &file_name, &request)
    }

    /// Integrate the selected GFF file for `taxon`, keeping only `entities`
    pub fn integrate_gff<I, S>(&self, taxon: &str, entities: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let kind = IntegrationKind::Gff;
        let file_name = self.settings.file_name()?;
        let entities: Vec<String> = entities.into_iter().map(Into::into).collect();
        let request = GffIntegrationRequest {
            file_name: &file_name,
            taxon,
            entities: &entities,
            public: self.settings.public,
            forced_type: &self.settings.forced_type,
        };
        self.integrate(kind, &file_name, &request)
    }

    /// Integrate the selected Turtle file
    pub fn integrate_ttl(&self) -> Result<String> {
        let kind = IntegrationKind::Ttl;
        let file_name = self.settings.file_name()?;
        let request = TtlIntegrationRequest {
            file_name: &file_name,
            public: self.settings.public,
            forced_type: &self.settings.forced_type,
        };
        self.integrate(kind, &file_name, &request)
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Select a file already present on the server, without uploading it
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.settings.file_path = Some(path.into());
    }

    /// Store key columns, coercing integer-like values
    ///
    /// No bounds check against the file: the server decides.
    ///
    /// # Errors
    /// - `ClientError::Config` if a value is not a non-negative integer;
    ///   the stored list is left unchanged
    pub fn set_key_columns<I>(&mut self, indices: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoColumnIndex,
    {
        self.settings.key_columns = parse_column_indices(indices)?;
        Ok(())
    }

    /// Store disabled columns, coercing integer-like values
    pub fn set_disabled_columns<I>(&mut self, indices: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoColumnIndex,
    {
        self.settings.disabled_columns = parse_column_indices(indices)?;
        Ok(())
    }

    /// Override column types; index 0 becomes `entity_start`
    pub fn force_column_types<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.column_types = Some(ColumnTypes::new(types));
    }

    /// `true` makes the integrated dataset public
    pub fn set_visibility(&mut self, public: bool) {
        self.settings.public = public;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn is_authenticated(&self) -> bool {
        self.cookie.is_some()
    }

    /// `Cookie` header value sent with each request
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub fn settings(&self) -> &DatasetSettings {
        &self.settings
    }

    pub fn column_types(&self) -> Option<&ColumnTypes> {
        self.settings.column_types.as_ref()
    }

    pub fn key_columns(&self) -> &[ColumnIndex] {
        &self.settings.key_columns
    }

    pub fn disabled_columns(&self) -> &[ColumnIndex] {
        &self.settings.disabled_columns
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![(
            REQUESTED_WITH_HEADER.to_string(),
            REQUESTED_WITH_VALUE.to_string(),
        )];
        if let Some(cookie) = &self.cookie {
            headers.push((COOKIE_HEADER.to_string(), cookie.clone()));
        }
        headers
    }

    fn call<B: Serialize>(&self, path: &str, body: &B) -> std::result::Result<ServerReply, CallError> {
        let body = serde_json::to_value(body).map_err(CallError::Encode)?;
        debug!(path = path, "POST");
        let response = self.transport.post_json(path, &body, &self.headers())?;
        debug!(path = path, status = response.status, "Response received");
        classify(response)
    }

    fn integrate<B: Serialize>(
        &self,
        kind: IntegrationKind,
        file_name: &str,
        request: &B,
    ) -> Result<String> {
        let reply = self
            .call(kind.path(), request)
            .map_err(|cause| ClientError::Integration { kind, cause })?;

        info!(
            kind = %kind,
            file_name = %file_name,
            public = self.settings.public,
            "Integration submitted"
        );
        Ok(reply.body)
    }
}

/// Join response cookies into a `Cookie` header value
fn cookie_header(cookies: &[Cookie]) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    Some(
        cookies
            .iter()
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; "),
    )
}
