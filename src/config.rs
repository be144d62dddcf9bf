//! Tuning constants for DNS verification.

use std::time::Duration;

// Network operation timeouts
/// DNS query timeout in seconds, enforced per attempt at the transport layer.
/// A resolver that exceeds this is treated as inconclusive, not as a negative vote.
pub const DNS_TIMEOUT_SECS: u64 = 10;
/// Number of query attempts per lookup. A single attempt keeps a slow upstream
/// from stalling the whole consensus pass; retry cadence belongs to the caller.
pub const DNS_ATTEMPTS: usize = 1;

/// Reference ensemble of public DNS servers queried for consensus.
///
/// Google, Quad9, OpenDNS, Cloudflare and Comodo — two addresses each, so the
/// verdict never depends on a single operator's view of the zone.
pub const PUBLIC_DNS_SERVERS: &[&str] = &[
    "8.8.8.8",
    "8.8.4.4",
    "9.9.9.9",
    "149.112.112.112",
    "208.67.222.222",
    "208.67.220.220",
    "1.1.1.1",
    "1.0.0.1",
    "8.26.56.26",
    "8.20.247.20",
];

// Re-check scheduling hints
/// Suggested delay before re-checking a domain that is not yet fully verified.
pub const UNVERIFIED_RECHECK: Duration = Duration::from_secs(60);
/// Suggested delay before re-checking a domain once all three records verify.
pub const VERIFIED_RECHECK: Duration = Duration::from_secs(60 * 60);
