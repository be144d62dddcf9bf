//! Resolver abstraction over upstream DNS servers.
//!
//! This module defines the capability interface the consensus checker fans out
//! over:
//! - TXT record lookups (DKIM, SPF)
//! - CNAME record lookups (stats endpoint)
//!
//! Concrete resolvers each bind one upstream server so the ensemble reflects
//! genuinely independent views of the zone.

mod mock;
mod upstream;

// Re-export public API
pub use mock::MockResolver;
pub use upstream::UpstreamResolver;

use std::future::Future;

use thiserror::Error;

/// Failure kinds a lookup can report.
///
/// The three kinds are deliberately distinguishable: downstream aggregation
/// treats an absent record as a negative answer, a timeout as inconclusive,
/// and everything else as an infrastructure failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The name exists but carries no matching record, or does not exist at
    /// all. A legitimate negative DNS answer, not an infrastructure failure.
    #[error("no records found")]
    NotFound,
    /// The per-attempt deadline elapsed before the upstream answered.
    #[error("lookup timed out")]
    Timeout,
    /// Network-level or malformed-response failure.
    #[error("network error: {0}")]
    Network(String),
}

/// Async DNS lookup capability bound to one upstream server.
///
/// Resolvers are stateless, read-only capabilities shared immutably by all
/// concurrent checker tasks.
pub trait Resolver: Send + Sync {
    /// Looks up all TXT records for `name`. Multi-segment records are joined
    /// into one string per record.
    fn lookup_txt(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<String>, LookupError>> + Send;

    /// Looks up the canonical name `name` points to. The returned target may
    /// carry a trailing root-label dot.
    fn lookup_cname(&self, name: &str) -> impl Future<Output = Result<String, LookupError>> + Send;
}
