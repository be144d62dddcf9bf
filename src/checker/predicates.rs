//! Per-resolver verification predicates for the three record types.
//!
//! Each predicate asks one resolver whether one record is published as
//! expected. An absent record (`NotFound`) answers `Ok(false)`; every other
//! lookup failure propagates unchanged so the aggregation in `mod.rs` can
//! classify it. Predicates never retry; re-check cadence belongs to the
//! caller.

use crate::domain::DomainConfig;
use crate::resolver::{LookupError, Resolver};

/// The record type a consensus pass verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RecordCheck {
    Dkim,
    Spf,
    StatsCname,
}

/// Evaluates `check` against a single resolver.
pub(super) async fn evaluate<R: Resolver>(
    check: RecordCheck,
    resolver: &R,
    config: &DomainConfig,
) -> Result<bool, LookupError> {
    match check {
        RecordCheck::Dkim => check_dkim_record(resolver, config).await,
        RecordCheck::Spf => check_spf_record(resolver, config).await,
        RecordCheck::StatsCname => check_stats_cname(resolver, config).await,
    }
}

/// At least one TXT record on `<selector>._domainkey.<domain>` must equal
/// `k=rsa; p=<key>` byte-for-byte. No trimming or case normalization.
async fn check_dkim_record<R: Resolver>(
    resolver: &R,
    config: &DomainConfig,
) -> Result<bool, LookupError> {
    let records = match resolver.lookup_txt(&config.dkim_lookup_name()).await {
        Ok(records) => records,
        Err(LookupError::NotFound) => return Ok(false),
        Err(e) => return Err(e),
    };

    let expected = config.dkim_txt_value();
    Ok(records.iter().any(|txt| *txt == expected))
}

/// At least one TXT record on the domain itself must contain
/// `include:<base_domain>`.
async fn check_spf_record<R: Resolver>(
    resolver: &R,
    config: &DomainConfig,
) -> Result<bool, LookupError> {
    let records = match resolver.lookup_txt(&config.domain_name).await {
        Ok(records) => records,
        Err(LookupError::NotFound) => return Ok(false),
        Err(e) => return Err(e),
    };

    let include = format!("include:{}", config.base_domain);
    Ok(records.iter().any(|txt| txt.contains(&include)))
}

/// `<prefix>.<domain>` must be a CNAME for the base domain. A trailing
/// root-label dot on the resolved target is accepted as equivalent.
async fn check_stats_cname<R: Resolver>(
    resolver: &R,
    config: &DomainConfig,
) -> Result<bool, LookupError> {
    let target = match resolver.lookup_cname(&config.stats_lookup_name()).await {
        Ok(target) => target,
        Err(LookupError::NotFound) => return Ok(false),
        Err(e) => return Err(e),
    };

    Ok(target == config.base_domain
        || target.strip_suffix('.') == Some(config.base_domain.as_str()))
}
