use crate::collection::AddressCollection;
use crate::endpoint::Endpoint;
use crate::error::{ResolveError, Result};
use dns_lookup::AddrInfoHints;
use serde::{Deserialize, Serialize};
use std::io;
use std::net::SocketAddr;
use tracing::{debug, trace};

/// Why a single `(host, service)` lookup produced no usable addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// The resolver refused the query; carries its error text.
    Failed(String),
    /// The resolver answered with something other than an IPv4/IPv6 address.
    UnsupportedFamily(String),
}

/// Maps a host and service to socket addresses, in the order the
/// underlying mechanism returns them.
pub trait NameResolver {
    fn lookup(&self, host: &str, service: &str)
    -> std::result::Result<Vec<SocketAddr>, LookupFailure>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    #[default]
    Any,
    Ipv4,
    Ipv6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub family: AddressFamily,

    /// Only return families that have a configured non-loopback address on
    /// this host (`AI_ADDRCONFIG`).
    #[serde(default = "default_address_config")]
    pub address_config: bool,
}

fn default_address_config() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            family: AddressFamily::default(),
            address_config: default_address_config(),
        }
    }
}

/// `getaddrinfo(3)` asking for TCP stream endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver {
    config: ResolverConfig,
}

impl SystemResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    fn hints(&self) -> AddrInfoHints {
        let address = match self.config.family {
            AddressFamily::Any => libc::AF_UNSPEC,
            AddressFamily::Ipv4 => libc::AF_INET,
            AddressFamily::Ipv6 => libc::AF_INET6,
        };
        let flags = if self.config.address_config {
            libc::AI_ADDRCONFIG
        } else {
            0
        };

        AddrInfoHints {
            socktype: libc::SOCK_STREAM,
            protocol: libc::IPPROTO_TCP,
            address,
            flags,
        }
    }
}

impl NameResolver for SystemResolver {
    fn lookup(
        &self,
        host: &str,
        service: &str,
    ) -> std::result::Result<Vec<SocketAddr>, LookupFailure> {
        let entries = dns_lookup::getaddrinfo(Some(host), Some(service), Some(self.hints()))
            .map_err(|e| LookupFailure::Failed(io::Error::from(e).to_string()))?;

        let mut addrs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LookupFailure::UnsupportedFamily(e.to_string()))?;
            match entry.address {
                libc::AF_INET | libc::AF_INET6 => addrs.push(entry.sockaddr),
                family => {
                    return Err(LookupFailure::UnsupportedFamily(format!(
                        "address family {}",
                        family
                    )));
                }
            }
        }
        Ok(addrs)
    }
}

/// Resolves every spec in order into one collection.
///
/// The first failing spec aborts the pass; addresses gathered from the
/// specs before it are dropped along with the partial collection.
pub fn resolve_all<I, S, R>(specs: I, resolver: &R) -> Result<AddressCollection>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: NameResolver + ?Sized,
{
    let mut collection = AddressCollection::new();

    for spec in specs {
        let endpoint = Endpoint::parse(spec.as_ref())?;
        let addrs = resolver
            .lookup(&endpoint.host, &endpoint.service)
            .map_err(|failure| lookup_error(&endpoint, failure))?;

        debug!(
            "Resolved {}:{} to {} address(es)",
            endpoint.host,
            endpoint.service,
            addrs.len()
        );
        for addr in addrs {
            trace!("{}:{} -> {}", endpoint.host, endpoint.service, addr);
            collection.append(addr)?;
        }
    }

    Ok(collection)
}

fn lookup_error(endpoint: &Endpoint, failure: LookupFailure) -> ResolveError {
    let host = endpoint.host.clone();
    let service = endpoint.service.clone();
    match failure {
        LookupFailure::Failed(reason) => ResolveError::Resolution {
            host,
            service,
            reason,
        },
        LookupFailure::UnsupportedFamily(detail) => ResolveError::UnsupportedFamily {
            host,
            service,
            detail,
        },
    }
}

/// Resolver front end bound to one name-resolution backend.
pub struct Resolver<R = SystemResolver> {
    backend: R,
}

impl Resolver<SystemResolver> {
    pub fn system(config: ResolverConfig) -> Self {
        Self::new(SystemResolver::new(config))
    }
}

impl<R: NameResolver> Resolver<R> {
    pub fn new(backend: R) -> Self {
        Self { backend }
    }

    pub fn resolve<S: AsRef<str>>(&self, specs: &[S]) -> Result<AddressCollection> {
        resolve_all(specs, &self.backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6};

    #[derive(Default)]
    struct StubResolver {
        answers: HashMap<(String, String), std::result::Result<Vec<SocketAddr>, LookupFailure>>,
        calls: RefCell<Vec<String>>,
    }

    impl StubResolver {
        fn answer(mut self, host: &str, service: &str, addrs: Vec<SocketAddr>) -> Self {
            self.answers
                .insert((host.to_string(), service.to_string()), Ok(addrs));
            self
        }

        fn fail(mut self, host: &str, service: &str, failure: LookupFailure) -> Self {
            self.answers
                .insert((host.to_string(), service.to_string()), Err(failure));
            self
        }
    }

    impl NameResolver for StubResolver {
        fn lookup(
            &self,
            host: &str,
            service: &str,
        ) -> std::result::Result<Vec<SocketAddr>, LookupFailure> {
            self.calls.borrow_mut().push(format!("{}:{}", host, service));
            self.answers
                .get(&(host.to_string(), service.to_string()))
                .cloned()
                .unwrap_or_else(|| Err(LookupFailure::Failed("Name or service not known".into())))
        }
    }

    fn v4(a: u8, b: u8, c: u8, d: u8, port: u16) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(a, b, c, d), port))
    }

    fn v6(addr: Ipv6Addr, port: u16) -> SocketAddr {
        SocketAddr::V6(SocketAddrV6::new(addr, port, 0, 0))
    }

    fn stub() -> StubResolver {
        StubResolver::default()
            .answer(
                "example.com",
                "80",
                vec![
                    v4(93, 184, 216, 34, 80),
                    v6("2606:2800:220:1::248".parse().unwrap(), 80),
                ],
            )
            .answer("localhost", "443", vec![v6(Ipv6Addr::LOCALHOST, 443), v4(127, 0, 0, 1, 443)])
            .answer("single", "9", vec![v4(10, 0, 0, 9, 9)])
    }

    #[test]
    fn length_is_sum_of_per_spec_results() {
        let resolver = stub();
        let collection =
            resolve_all(["example.com:80", "localhost:443", "single:9"], &resolver).unwrap();
        assert_eq!(collection.len(), 2 + 2 + 1);
    }

    #[test]
    fn preserves_spec_order_then_resolver_order() {
        let resolver = stub();
        let collection = resolve_all(["localhost:443", "example.com:80"], &resolver).unwrap();

        assert_eq!(
            collection.as_slice(),
            &[
                v6(Ipv6Addr::LOCALHOST, 443),
                v4(127, 0, 0, 1, 443),
                v4(93, 184, 216, 34, 80),
                v6("2606:2800:220:1::248".parse().unwrap(), 80),
            ]
        );
    }

    #[test]
    fn path_component_does_not_affect_lookup() {
        let resolver = stub();
        let collection = resolve_all(["single:9/index.html"], &resolver).unwrap();
        assert_eq!(collection.as_slice(), &[v4(10, 0, 0, 9, 9)]);
        assert_eq!(*resolver.calls.borrow(), vec!["single:9".to_string()]);
    }

    #[test]
    fn duplicate_specs_are_resolved_each_time() {
        let resolver = stub();
        let collection = resolve_all(["single:9", "single:9"], &resolver).unwrap();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_collection() {
        let resolver = stub();
        let collection = resolve_all(Vec::<String>::new(), &resolver).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn missing_port_stops_before_any_lookup() {
        let resolver = stub();
        let err = resolve_all(["single:9", "example.com", "localhost:443"], &resolver)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(*resolver.calls.borrow(), vec!["single:9".to_string()]);
    }

    #[test]
    fn later_failure_discards_earlier_results() {
        let resolver = stub().fail(
            "nowhere.invalid",
            "80",
            LookupFailure::Failed("Name or service not known".to_string()),
        );
        let err = resolve_all(
            ["example.com:80", "nowhere.invalid:80", "single:9"],
            &resolver,
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert_eq!(
            err.to_string(),
            "Resolving nowhere.invalid:80: Name or service not known"
        );
        assert_eq!(resolver.calls.borrow().len(), 2);
    }

    #[test]
    fn unexpected_family_is_an_internal_fault() {
        let resolver = stub().fail(
            "odd",
            "1",
            LookupFailure::UnsupportedFamily("address family 1".to_string()),
        );
        let err = resolve_all(["odd:1"], &resolver).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalInvariant);
    }

    #[test]
    fn resolver_front_end_delegates_to_backend() {
        let resolver = Resolver::new(stub());
        let collection = resolver.resolve(&["single:9".to_string()]).unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn resolver_config_defaults_to_any_family_with_addrconfig() {
        let config = ResolverConfig::default();
        assert_eq!(config.family, AddressFamily::Any);
        assert!(config.address_config);
    }

    #[test]
    fn system_resolver_handles_numeric_hosts() {
        let resolver = Resolver::system(ResolverConfig {
            family: AddressFamily::Ipv4,
            address_config: false,
        });
        let collection = resolver.resolve(&["127.0.0.1:8080"]).unwrap();

        assert!(!collection.is_empty());
        assert!(
            collection
                .iter()
                .all(|addr| *addr == v4(127, 0, 0, 1, 8080))
        );
    }

    #[test]
    fn system_resolver_reports_unknown_service() {
        let resolver = Resolver::system(ResolverConfig {
            family: AddressFamily::Ipv4,
            address_config: false,
        });
        let err = resolver
            .resolve(&["127.0.0.1:no-such-service-here"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
        assert!(
            err.to_string()
                .starts_with("Resolving 127.0.0.1:no-such-service-here: ")
        );
    }

    #[test]
    fn system_hints_ask_for_tcp_streams_per_family() {
        let cases = [
            (AddressFamily::Any, libc::AF_UNSPEC),
            (AddressFamily::Ipv4, libc::AF_INET),
            (AddressFamily::Ipv6, libc::AF_INET6),
        ];

        for (family, expected_address) in cases {
            for address_config in [true, false] {
                let hints = SystemResolver::new(ResolverConfig {
                    family,
                    address_config,
                })
                .hints();

                assert_eq!(hints.socktype, libc::SOCK_STREAM);
                assert_eq!(hints.protocol, libc::IPPROTO_TCP);
                assert_eq!(hints.address, expected_address, "{:?}", family);
                let expected_flags = if address_config {
                    libc::AI_ADDRCONFIG
                } else {
                    0
                };
                assert_eq!(hints.flags, expected_flags, "{:?}", family);
            }
        }
    }

    #[test]
    fn default_system_hints_restrict_to_configured_families() {
        let hints = SystemResolver::default().hints();
        assert_eq!(hints.address, libc::AF_UNSPEC);
        assert_eq!(hints.flags, libc::AI_ADDRCONFIG);
    }
}
