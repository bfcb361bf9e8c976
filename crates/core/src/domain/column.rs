// Column Typing Domain Model

use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Reserved type label marking column 0 as the identifier of a new entity
pub const ENTITY_START: &str = "entity_start";

/// Key column used when the caller never picks one
pub const DEFAULT_KEY_COLUMN: ColumnIndex = 0;

/// Zero-based column position in a tabular file
pub type ColumnIndex = usize;

/// Per-column type labels of a tabular dataset
///
/// Column 0 always holds [`ENTITY_START`], whatever the caller or the
/// server put there. An empty list becomes `[ENTITY_START]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ColumnTypes(Vec<String>);

impl ColumnTypes {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut types: Vec<String> = types.into_iter().map(Into::into).collect();
        match types.first_mut() {
            Some(first) => *first = ENTITY_START.to_string(),
            None => types.push(ENTITY_START.to_string()),
        }
        Self(types)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for ColumnTypes {
    fn from(types: Vec<String>) -> Self {
        Self::new(types)
    }
}

impl From<ColumnTypes> for Vec<String> {
    fn from(types: ColumnTypes) -> Self {
        types.0
    }
}

/// Conversion of integer-like values into column indices
///
/// Strings are trimmed and parsed as base-10 integers; negative numbers
/// are rejected.
pub trait IntoColumnIndex {
    fn into_column_index(self) -> Result<ColumnIndex>;
}

macro_rules! impl_into_column_index {
    ($($ty:ty),*) => {
        $(
            impl IntoColumnIndex for $ty {
                fn into_column_index(self) -> Result<ColumnIndex> {
                    ColumnIndex::try_from(self)
                        .map_err(|_| DomainError::InvalidColumnIndex(self.to_string()))
                }
            }
        )*
    };
}

impl_into_column_index!(u8, u16, u32, u64, i8, i16, i32, i64, isize);

impl IntoColumnIndex for usize {
    fn into_column_index(self) -> Result<ColumnIndex> {
        Ok(self)
    }
}

impl IntoColumnIndex for &str {
    fn into_column_index(self) -> Result<ColumnIndex> {
        self.trim()
            .parse()
            .map_err(|_| DomainError::InvalidColumnIndex(self.to_string()))
    }
}

impl IntoColumnIndex for String {
    fn into_column_index(self) -> Result<ColumnIndex> {
        self.as_str().into_column_index()
    }
}

impl IntoColumnIndex for &String {
    fn into_column_index(self) -> Result<ColumnIndex> {
        self.as_str().into_column_index()
    }
}

/// Coerce every input to a column index, keeping order
///
/// Fails on the first value that is not a non-negative integer.
pub fn parse_column_indices<I>(indices: I) -> Result<Vec<ColumnIndex>>
where
    I: IntoIterator,
    I::Item: IntoColumnIndex,
{
    indices
        .into_iter()
        .map(IntoColumnIndex::into_column_index)
        .collect()
}
