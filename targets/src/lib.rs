pub mod collection;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod resolver;

pub use collection::AddressCollection;
pub use endpoint::Endpoint;
pub use error::{ErrorKind, ResolveError, Result};
pub use format::{Bracketed, format_all, format_one, write_all};
pub use resolver::{
    AddressFamily, LookupFailure, NameResolver, Resolver, ResolverConfig, SystemResolver,
    resolve_all,
};
