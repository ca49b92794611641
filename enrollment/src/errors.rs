use thiserror::Error;

/// Recoverable wizard failures, surfaced to the user via the notification sink.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("contact details incomplete: {0}")]
    MissingContactInfo(String),

    #[error("no verification code has been requested")]
    NoCodeRequested,

    #[error("verification code rejected")]
    InvalidCode,

    #[error("step {0} requires contact verification before continuing")]
    GateNotSatisfied(usize),

    #[error("submission requirements not met; missing consents: {0:?}")]
    ConsentIncomplete(Vec<String>),
}
