use crate::collection::AddressCollection;
use std::fmt;
use std::io::{self, Write};
use std::net::SocketAddr;

/// Displays an address as `[ip]:port` for both families.
pub struct Bracketed<'a>(pub &'a SocketAddr);

impl fmt::Display for Bracketed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]:{}", self.0.ip(), self.0.port())
    }
}

pub fn format_one(addr: &SocketAddr) -> String {
    Bracketed(addr).to_string()
}

/// Writes the collection framed by `prefix` and `suffix`, with `separator`
/// between elements. An empty collection writes nothing at all.
pub fn write_all<W: Write + ?Sized>(
    out: &mut W,
    addrs: &AddressCollection,
    prefix: &str,
    separator: &str,
    suffix: &str,
) -> io::Result<()> {
    if addrs.is_empty() {
        return Ok(());
    }

    out.write_all(prefix.as_bytes())?;
    for (n, addr) in addrs.iter().enumerate() {
        if n > 0 {
            out.write_all(separator.as_bytes())?;
        }
        write!(out, "{}", Bracketed(addr))?;
    }
    out.write_all(suffix.as_bytes())?;
    out.flush()
}

pub fn format_all(
    addrs: &AddressCollection,
    prefix: &str,
    separator: &str,
    suffix: &str,
) -> String {
    if addrs.is_empty() {
        return String::new();
    }

    let body = addrs
        .iter()
        .map(format_one)
        .collect::<Vec<_>>()
        .join(separator);
    format!("{}{}{}", prefix, body, suffix)
}
