//! Resolver implementation backed by `hickory-resolver`.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use super::{LookupError, Resolver};
use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS, PUBLIC_DNS_SERVERS};

/// A resolver bound to a single upstream DNS server.
///
/// Queries go over UDP port 53 with a fixed per-attempt timeout
/// (`DNS_TIMEOUT_SECS`) and a single attempt, so a stalled upstream surfaces
/// as [`LookupError::Timeout`] instead of blocking the consensus pass.
#[derive(Debug)]
pub struct UpstreamResolver {
    address: IpAddr,
    resolver: TokioAsyncResolver,
}

impl UpstreamResolver {
    /// Creates a resolver bound to `address`.
    pub fn new(address: IpAddr) -> Self {
        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(
            SocketAddr::new(address, 53),
            Protocol::Udp,
        ));

        let mut opts = ResolverOpts::default();
        opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
        opts.attempts = DNS_ATTEMPTS;
        // Lookup names are always fully qualified; never append search domains
        opts.ndots = 0;

        let resolver = TokioAsyncResolver::tokio(config, opts);
        Self { address, resolver }
    }

    /// Creates one resolver per address in `addrs`.
    ///
    /// # Errors
    ///
    /// Returns an error if any address fails to parse as an IP address.
    pub fn from_addrs(addrs: &[&str]) -> Result<Vec<Self>> {
        addrs
            .iter()
            .map(|addr| {
                let ip: IpAddr = addr
                    .parse()
                    .with_context(|| format!("invalid DNS server address {addr}"))?;
                Ok(Self::new(ip))
            })
            .collect()
    }

    /// Creates the reference ensemble of ten public DNS servers
    /// (`PUBLIC_DNS_SERVERS`).
    ///
    /// # Errors
    ///
    /// Returns an error if any built-in address fails to parse.
    pub fn default_ensemble() -> Result<Vec<Self>> {
        Self::from_addrs(PUBLIC_DNS_SERVERS)
    }

    /// The upstream server address this resolver queries.
    pub fn address(&self) -> IpAddr {
        self.address
    }

    fn classify(&self, name: &str, e: ResolveError) -> LookupError {
        match e.kind() {
            // Absence of a record is a legitimate negative answer, not a failure
            ResolveErrorKind::NoRecordsFound { .. } => LookupError::NotFound,
            ResolveErrorKind::Timeout => {
                log::warn!("lookup for {name} via {} timed out: {e}", self.address);
                LookupError::Timeout
            }
            _ => {
                log::warn!("lookup for {name} via {} failed: {e}", self.address);
                LookupError::Network(e.to_string())
            }
        }
    }
}

impl Resolver for UpstreamResolver {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        match self.resolver.txt_lookup(name).await {
            Ok(lookup) => {
                let records: Vec<String> = lookup
                    .iter()
                    .map(|txt| {
                        // TXT records can contain multiple strings - join them
                        txt.iter()
                            .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                            .collect::<Vec<String>>()
                            .join("")
                    })
                    .collect();
                Ok(records)
            }
            Err(e) => Err(self.classify(name, e)),
        }
    }

    async fn lookup_cname(&self, name: &str) -> Result<String, LookupError> {
        match self.resolver.lookup(name, RecordType::CNAME).await {
            Ok(lookup) => lookup
                .iter()
                .find_map(|rdata| {
                    if let RData::CNAME(cname) = rdata {
                        Some(cname.to_utf8())
                    } else {
                        None
                    }
                })
                .ok_or(LookupError::NotFound),
            Err(e) => Err(self.classify(name, e)),
        }
    }
}
