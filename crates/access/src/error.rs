use crate::policy::DenyReason;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AccessError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The policy check refused the request
    #[error("{}", .0.message())]
    Denied(DenyReason),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

impl AccessError {
    /// Stable machine-readable code for error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Denied(reason) => reason.code(),
            Self::UnknownRole(_) => "unknown_role",
            Self::UnknownOperation(_) => "unknown_operation",
        }
    }

    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Self::Denied(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<DenyReason> for AccessError {
    fn from(reason: DenyReason) -> Self {
        Self::Denied(reason)
    }
}
