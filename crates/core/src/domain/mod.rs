// Domain Layer - Pure data model of an AskOmics integration

pub mod api;
pub mod column;
pub mod dataset;
pub mod endpoint;
pub mod error;

// Re-exports
pub use api::IntegrationKind;
pub use column::{
    parse_column_indices, ColumnIndex, ColumnTypes, IntoColumnIndex, DEFAULT_KEY_COLUMN,
    ENTITY_START,
};
pub use dataset::DatasetSettings;
pub use endpoint::ServerEndpoint;
pub use error::DomainError;
