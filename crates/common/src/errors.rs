use thiserror::Error;

/// Error hierarchy for the dashboard.
///
/// Unknown-id mutations are deliberately absent: the list engine treats
/// them as silent no-ops (`bool`/`Option` returns), not failures.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageFailure),

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    ExternalService(#[from] ExternalServiceFailure),
}

/// Write/read/parse failure on the persistence medium.
#[derive(Error, Debug)]
pub enum StorageFailure {
    #[error("storage medium rejected the operation on \"{key}\": {reason}")]
    Medium { key: String, reason: String },

    #[error("stored value under \"{key}\" is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("value for \"{key}\" could not be serialized: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Missing or blank required field on add/update. No mutation occurs.
#[derive(Error, Debug)]
#[error("campo obrigatório ausente: {field}")]
pub struct ValidationFailure {
    pub field: &'static str,
}

impl ValidationFailure {
    pub fn missing(field: &'static str) -> Self {
        Self { field }
    }
}

/// AI bridge network/API error. The target input is left unchanged.
#[derive(Error, Debug)]
pub enum ExternalServiceFailure {
    #[error("suggestion service is not configured")]
    NotConfigured,

    #[error("suggestion request failed: {0}")]
    Request(String),

    #[error("suggestion service returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("suggestion service returned an empty response")]
    EmptyResponse,
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_field() {
        let err = ValidationFailure::missing("title");
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn storage_failure_wraps_into_app_error() {
        let err: AppError = StorageFailure::Medium {
            key: "tasksData".into(),
            reason: "disk full".into(),
        }
        .into();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
