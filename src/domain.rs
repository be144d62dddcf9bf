//! Domain configuration for DNS verification.

use serde::{Deserialize, Serialize};

/// Expected DNS configuration for one sending domain.
///
/// This is read-only input owned by the caller; the checker derives the lookup
/// names and expected record values from it and never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Fully-qualified sending domain, e.g. `example.com`.
    pub domain_name: String,
    /// The platform's mail-relay domain that SPF must include and that the
    /// stats CNAME must point to.
    pub base_domain: String,
    /// Label prepended to `domain_name` to form the stats endpoint hostname.
    pub stats_prefix: String,
    /// DKIM selector label.
    pub dkim_selector: String,
    /// Expected raw DKIM public key material, without the `k=rsa; p=` wrapper.
    pub dkim_public_key: String,
}

impl DomainConfig {
    /// Name queried for the DKIM TXT record: `<selector>._domainkey.<domain>`.
    pub fn dkim_lookup_name(&self) -> String {
        format!("{}._domainkey.{}", self.dkim_selector, self.domain_name)
    }

    /// Name queried for the stats CNAME record: `<prefix>.<domain>`.
    pub fn stats_lookup_name(&self) -> String {
        format!("{}.{}", self.stats_prefix, self.domain_name)
    }

    /// TXT value the published DKIM record must match byte-for-byte.
    pub fn dkim_txt_value(&self) -> String {
        format!("k=rsa; p={}", self.dkim_public_key)
    }

    /// Whether every field is non-empty. An incomplete config is never queried;
    /// checks against it yield an empty, unverified result instead of panicking.
    pub fn is_complete(&self) -> bool {
        !self.domain_name.is_empty()
            && !self.base_domain.is_empty()
            && !self.stats_prefix.is_empty()
            && !self.dkim_selector.is_empty()
            && !self.dkim_public_key.is_empty()
    }
}
