mod resolve_error;

pub use resolve_error::{EX_NOHOST, EX_OSERR, EX_SOFTWARE, EX_USAGE, ErrorKind, ResolveError};
pub type Result<T> = std::result::Result<T, ResolveError>;
