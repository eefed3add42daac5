use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{CompletedSession, PreferenceRecord};

/// Read side of the keyed record store holding preferences and session
/// history.
#[async_trait]
pub trait TreatmentStore: Send + Sync {
    /// Most recently created preference record for the user, if any.
    async fn latest_preference(&self, user_id: Uuid) -> Result<Option<PreferenceRecord>, StoreError>;

    /// Completed sessions ordered ascending by date.
    async fn completed_sessions(&self, user_id: Uuid) -> Result<Vec<CompletedSession>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl StoreError {
    pub fn invalid_record(column: &str, err: impl std::fmt::Display) -> Self {
        StoreError::InvalidRecord(format!("column {column}: {err}"))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_record_names_the_column() {
        let err = StoreError::invalid_record("session_date", "mismatched types");
        assert!(matches!(err, StoreError::InvalidRecord(_)));
        assert_eq!(
            err.to_string(),
            "invalid record: column session_date: mismatched types"
        );
    }

    #[test]
    fn sqlx_errors_are_database_faults() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
    }
}
