//! Read results from the backing data store.
//!
//! Store adapters surface raw [`StoreError`]s carrying the database error code. They are
//! translated exactly once, in [`SourceOutcome::from_store`], so callers branch on a tagged
//! result instead of inspecting error codes.

use tracing::warn;

/// SQLSTATE reported when a queried relation does not exist.
pub const MISSING_TABLE_CODE: &str = "42P01";

/// Raw failure reported by a store adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    pub code: Option<String>,
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    pub fn missing_table(relation: &str) -> Self {
        Self::with_code(
            MISSING_TABLE_CODE,
            format!("relation \"{relation}\" does not exist"),
        )
    }

    fn is_missing_table(&self) -> bool {
        self.code.as_deref() == Some(MISSING_TABLE_CODE)
    }
}

/// Failure propagated to the caller after translation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("{source_name} unavailable: {cause}")]
    Unavailable {
        source_name: &'static str,
        cause: StoreError,
    },
}

/// Tagged read result: data, recognized absence, or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome<T> {
    Ok(T),
    Empty,
    Failure(SourceError),
}

impl<T> SourceOutcome<T> {
    /// Translate a raw store result. A missing relation is recognized absence; every other
    /// error is a failure.
    pub fn from_store(source_name: &'static str, result: Result<T, StoreError>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(err) if err.is_missing_table() => {
                warn!(source = source_name, error = %err, "store relation missing, treating as empty");
                Self::Empty
            }
            Err(cause) => Self::Failure(SourceError::Unavailable { source_name, cause }),
        }
    }

    /// Collapse into a plain result, substituting `empty` for recognized absence.
    pub fn or_empty(self, empty: T) -> Result<T, SourceError> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Empty => Ok(empty),
            Self::Failure(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_table_is_recognized_absence() {
        let outcome: SourceOutcome<Vec<u8>> =
            SourceOutcome::from_store("hotels", Err(StoreError::missing_table("Hotel")));
        assert_eq!(outcome, SourceOutcome::Empty);
        assert_eq!(outcome.or_empty(Vec::new()), Ok(Vec::new()));
    }

    #[test]
    fn other_codes_propagate_as_failures() {
        let outcome: SourceOutcome<Vec<u8>> = SourceOutcome::from_store(
            "tours",
            Err(StoreError::with_code("08006", "connection failure")),
        );
        let err = outcome.or_empty(Vec::new()).expect_err("failure propagates");
        assert_eq!(err.to_string(), "tours unavailable: connection failure");
    }

    #[test]
    fn uncoded_errors_are_failures() {
        let outcome: SourceOutcome<u8> =
            SourceOutcome::from_store("tours", Err(StoreError::new("timeout")));
        assert!(matches!(outcome, SourceOutcome::Failure(_)));
    }
}
