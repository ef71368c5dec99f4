//! The error taxonomy. Every fallible operation in this crate
//! returns `Result<_, SuperCronError>`; `main.rs` is the only place that
//! turns a variant into a process exit code.

#[derive(Debug, thiserror::Error)]
pub enum SuperCronError {
    #[error("invalid job name '{0}'")]
    InvalidName(String),

    #[error("invalid repetition sentence: {0}")]
    InvalidSentence(String),

    #[error("value {value} out of range for {field} (expected {expected})")]
    FieldOutOfRange {
        field: &'static str,
        value: i64,
        expected: &'static str,
    },

    #[error("conflicting repetition clauses for {field}")]
    ConflictingRecognizers { field: &'static str },

    #[error("malformed trigger expression: {0}")]
    MalformedTrigger(String),

    #[error("crontab backend error: {0}")]
    BackendIo(String),

    #[error("missing required argument: {0}")]
    MissingArguments(String),

    #[error("cancelled")]
    UserCancelled,
}

impl SuperCronError {
    /// Exit status: zero for a cancelled operation, one for
    /// every real error.
    pub fn exit_code(&self) -> i32 {
        match self {
            SuperCronError::UserCancelled => 0,
            _ => 1,
        }
    }
}
