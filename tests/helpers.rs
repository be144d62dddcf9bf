// Shared test helpers for building domain fixtures and mock resolver zones.
//
// This module provides common utilities used across integration test files.

use domain_dns_status::{DomainConfig, MockResolver};

/// Initializes test logging so `log::debug!` output from the checker is
/// visible when a scenario fails. Safe to call from every test.
#[allow(dead_code)] // Used by other test files
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates the domain configuration used by the end-to-end scenarios.
#[allow(dead_code)] // Used by other test files
pub fn test_domain() -> DomainConfig {
    DomainConfig {
        domain_name: "example.com".into(),
        base_domain: "mx.example.com".into(),
        stats_prefix: "stats".into(),
        dkim_selector: "selector".into(),
        dkim_public_key: "publicKey".into(),
    }
}

/// Creates a resolver whose zone carries the given DKIM key for the test domain.
#[allow(dead_code)] // Used by other test files
pub fn resolver_with_dkim_key(key: &str) -> MockResolver {
    let resolver = MockResolver::new();
    resolver.add_txt(
        "selector._domainkey.example.com",
        vec![format!("k=rsa; p={key}")],
    );
    resolver
}

/// Creates a resolver whose zone has every record the test domain expects.
#[allow(dead_code)] // Used by other test files
pub fn fully_configured_resolver() -> MockResolver {
    let resolver = resolver_with_dkim_key("publicKey");
    resolver.add_txt(
        "example.com",
        vec!["v=spf1 include:mx.example.com ~all".to_string()],
    );
    resolver.add_cname("stats.example.com", "mx.example.com");
    resolver
}
