// AskOmics API Contract
// Endpoint paths and JSON payloads exchanged with the server

use super::column::{ColumnIndex, ColumnTypes};
use serde::Serialize;

/// Endpoint paths, relative to the server base URL
pub mod paths {
    pub const LOGIN: &str = "/login_api";
    pub const UPLOAD: &str = "/up/file";
    pub const GUESS_CSV_HEADER: &str = "/guess_csv_header_type";
    pub const LOAD_CSV: &str = "/load_data_into_graph";
    pub const LOAD_GFF: &str = "/load_gff_into_graph";
    pub const LOAD_TTL: &str = "/load_ttl_into_graph";
}

/// Header attached to every request so the server treats it as XHR
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

/// Body field the server fills when it rejects a request
pub const ERROR_FIELD: &str = "error";

/// Kind of file ingested into the triplestore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegrationKind {
    Csv,
    Gff,
    Ttl,
}

impl IntegrationKind {
    pub fn path(&self) -> &'static str {
        match self {
            IntegrationKind::Csv => paths::LOAD_CSV,
            IntegrationKind::Gff => paths::LOAD_GFF,
            IntegrationKind::Ttl => paths::LOAD_TTL,
        }
    }
}

impl std::fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrationKind::Csv => write!(f, "CSV"),
            IntegrationKind::Gff => write!(f, "GFF"),
            IntegrationKind::Ttl => write!(f, "TTL"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub apikey: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GuessHeaderRequest<'a> {
    pub filename: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CsvIntegrationRequest<'a> {
    pub file_name: &'a str,
    /// `null` when neither forced nor guessed
    pub col_types: Option<&'a ColumnTypes>,
    pub disabled_columns: &'a [ColumnIndex],
    pub key_columns: &'a [ColumnIndex],
    pub public: bool,
    pub forced_type: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GffIntegrationRequest<'a> {
    pub file_name: &'a str,
    pub taxon: &'a str,
    pub entities: &'a [String],
    pub public: bool,
    pub forced_type: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TtlIntegrationRequest<'a> {
    pub file_name: &'a str,
    pub public: bool,
    pub forced_type: &'a str,
}
