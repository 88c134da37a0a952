use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaseError {
    #[error("case records unavailable: a writer panicked while holding the lock")]
    Poisoned,

    #[error("{0}: submission has no Yes/No answers")]
    EmptySubmission(&'static str),

    #[error(transparent)]
    Core(#[from] sprout_core::error::CoreError),
}
