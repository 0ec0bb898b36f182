use crate::error::{ResolveError, Result};
use std::fmt;
use std::str::FromStr;

/// One `host:port[/path]` destination as typed by the user.
///
/// The service is kept as text so that named services (`http`) resolve the
/// same way numeric ports do. The path is carried along for callers that
/// issue requests; resolution ignores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub service: String,
    pub path: Option<String>,
}

impl Endpoint {
    /// Splits at the first `:`, then splits the remainder at its first `/`.
    pub fn parse(spec: &str) -> Result<Self> {
        let (host, rest) = spec
            .split_once(':')
            .ok_or_else(|| ResolveError::MissingPort {
                spec: spec.to_string(),
            })?;

        let (service, path) = match rest.split_once('/') {
            Some((service, path)) => (service, Some(path.to_string())),
            None => (rest, None),
        };

        Ok(Self {
            host: host.to_string(),
            service: service.to_string(),
            path,
        })
    }
}

impl FromStr for Endpoint {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.service)?;
        if let Some(path) = &self.path {
            write!(f, "/{}", path)?;
        }
        Ok(())
    }
}
