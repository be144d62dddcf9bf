//! domain_dns_status library: multi-resolver DNS verification for email sending domains
//!
//! A sending domain is considered correctly configured when three DNS records are
//! published: a DKIM public key (TXT), an SPF include of the mail relay (TXT), and a
//! CNAME exposing the stats endpoint. This library establishes whether those records
//! are visible by querying an ensemble of independent public resolvers concurrently
//! and deriving a strict-majority verdict per record type, so that no single
//! resolver's view (or poisoning) can dominate the answer.
//!
//! # Example
//!
//! ```no_run
//! use domain_dns_status::{DnsChecker, DomainConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let checker = DnsChecker::with_default_ensemble()?;
//! let config = DomainConfig {
//!     domain_name: "example.com".into(),
//!     base_domain: "mx.example.com".into(),
//!     stats_prefix: "stats".into(),
//!     dkim_selector: "selector".into(),
//!     dkim_public_key: "MIGfMA0...".into(),
//! };
//!
//! let status = checker.check_all(&CancellationToken::new(), &config).await;
//! println!("dkim verified: {}", status.dkim.is_verified());
//! println!("re-check in {:?}", status.recheck_interval());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod checker;
pub mod config;
mod domain;
pub mod resolver;

// Re-export public API
pub use checker::{ConsensusResult, DnsChecker, DnsStatus};
pub use domain::DomainConfig;
pub use resolver::{LookupError, MockResolver, Resolver, UpstreamResolver};
