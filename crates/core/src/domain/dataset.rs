// Dataset Settings Domain Model

use super::column::{ColumnIndex, ColumnTypes, DEFAULT_KEY_COLUMN};
use super::error::{DomainError, Result};
use std::path::{Path, PathBuf};

/// Everything the integration endpoints need to know about one file
///
/// Built once per invocation and refined through the session setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSettings {
    pub file_path: Option<PathBuf>,
    /// Dataset category sent as `forced_type`
    pub forced_type: String,
    pub public: bool,
    pub column_types: Option<ColumnTypes>,
    pub key_columns: Vec<ColumnIndex>,
    pub disabled_columns: Vec<ColumnIndex>,
}

impl DatasetSettings {
    pub fn new(forced_type: impl Into<String>) -> Self {
        Self {
            file_path: None,
            forced_type: forced_type.into(),
            public: false,
            column_types: None,
            key_columns: vec![DEFAULT_KEY_COLUMN],
            disabled_columns: Vec::new(),
        }
    }

    /// Base name of the selected file, as the server knows it after upload
    pub fn file_name(&self) -> Result<String> {
        let path = self.file_path.as_deref().ok_or(DomainError::NoFileSelected)?;
        base_name(path)
    }
}

fn base_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| DomainError::InvalidFilePath(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DatasetSettings::new("csv");
        assert_eq!(settings.forced_type, "csv");
        assert!(!settings.public);
        assert_eq!(settings.key_columns, vec![0]);
        assert!(settings.disabled_columns.is_empty());
        assert!(settings.column_types.is_none());
        assert!(settings.file_path.is_none());
    }

    #[test]
    fn test_file_name_is_base_name() {
        let mut settings = DatasetSettings::new("ttl");
        settings.file_path = Some(PathBuf::from("/data/run1/genes.ttl"));
        assert_eq!(settings.file_name().unwrap(), "genes.ttl");
    }

    #[test]
    fn test_file_name_without_selection() {
        let settings = DatasetSettings::new("gff");
        assert_eq!(settings.file_name().unwrap_err(), DomainError::NoFileSelected);
    }

    #[test]
    fn test_file_name_of_directory_root() {
        let mut settings = DatasetSettings::new("csv");
        settings.file_path = Some(PathBuf::from("/"));
        assert!(matches!(
            settings.file_name(),
            Err(DomainError::InvalidFilePath(_))
        ));
    }
}
