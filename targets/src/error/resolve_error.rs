use std::collections::TryReserveError;
use thiserror::Error;

/// Exit statuses from `sysexits.h`.
pub const EX_USAGE: u8 = 64;
pub const EX_NOHOST: u8 = 68;
pub const EX_SOFTWARE: u8 = 70;
pub const EX_OSERR: u8 = 71;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Expected :port specification in {spec:?}. See --help.")]
    MissingPort { spec: String },

    #[error("Resolving {host}:{service}: {reason}")]
    Resolution {
        host: String,
        service: String,
        reason: String,
    },

    #[error("Address collection growth failed: {0}")]
    ResourceExhaustion(#[from] TryReserveError),

    #[error("Resolving {host}:{service}: unexpected address record: {detail}")]
    UnsupportedFamily {
        host: String,
        service: String,
        detail: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Resolution,
    ResourceExhaustion,
    InternalInvariant,
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::MissingPort { .. } => ErrorKind::Usage,
            ResolveError::Resolution { .. } => ErrorKind::Resolution,
            ResolveError::ResourceExhaustion(_) => ErrorKind::ResourceExhaustion,
            ResolveError::UnsupportedFamily { .. } => ErrorKind::InternalInvariant,
        }
    }

    /// Process exit status for this failure, one per [`ErrorKind`].
    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            ErrorKind::Usage => EX_USAGE,
            ErrorKind::Resolution => EX_NOHOST,
            ErrorKind::InternalInvariant => EX_SOFTWARE,
            ErrorKind::ResourceExhaustion => EX_OSERR,
        }
    }
}
