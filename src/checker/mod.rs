//! Consensus checking across the resolver ensemble.
//!
//! Each check fans one verification predicate out over every configured
//! resolver concurrently, then folds the individual votes into a
//! [`ConsensusResult`]. A record only counts as verified when a strict
//! majority of the attempted resolvers positively confirm it: ties and
//! resolver failures count against verification, so a partially failing
//! ensemble can never produce a false positive.

mod predicates;


use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::config::{UNVERIFIED_RECHECK, VERIFIED_RECHECK};
use crate::domain::DomainConfig;
use crate::resolver::{LookupError, Resolver, UpstreamResolver};
use predicates::RecordCheck;

/// A single resolver's vote. Never exposed outside the aggregation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckOutcome {
    Verified,
    NotVerified,
    Errored,
}

impl CheckOutcome {
    /// Maps a predicate result to a vote.
    ///
    /// Timeouts produce no vote at all: a slow resolver is inconclusive and
    /// must not bias the tally either way, while a resolver that actively
    /// fails counts against verification. `NotFound` is a legitimate negative
    /// answer and is never treated as an error.
    fn classify(result: Result<bool, LookupError>) -> Option<Self> {
        match result {
            Ok(true) => Some(Self::Verified),
            Ok(false) | Err(LookupError::NotFound) => Some(Self::NotVerified),
            Err(LookupError::Timeout) => None,
            Err(LookupError::Network(_)) => Some(Self::Errored),
        }
    }
}

/// Aggregate vote counts for one record check.
///
/// Created fresh on every check invocation; the counts sum to the number of
/// resolvers that reported (timed-out resolvers are excluded, so the sum may
/// be less than the ensemble size).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// Resolvers that positively confirmed the record.
    pub verified: u32,
    /// Resolvers that answered but did not confirm it (including absent records).
    pub not_verified: u32,
    /// Resolvers that failed with a network-level or malformed-response error.
    pub errored: u32,
}

impl ConsensusResult {
    /// Whether a strict majority of the attempted resolvers confirmed the
    /// record: `verified > not_verified + errored`.
    pub fn is_verified(&self) -> bool {
        self.verified > self.not_verified + self.errored
    }

    fn record(&mut self, outcome: CheckOutcome) {
        match outcome {
            CheckOutcome::Verified => self.verified += 1,
            CheckOutcome::NotVerified => self.not_verified += 1,
            CheckOutcome::Errored => self.errored += 1,
        }
    }
}

/// Verdicts for the three record types of one domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsStatus {
    /// DKIM TXT record verdict.
    pub dkim: ConsensusResult,
    /// SPF TXT record verdict.
    pub spf: ConsensusResult,
    /// Stats endpoint CNAME verdict.
    pub stats: ConsensusResult,
}

impl DnsStatus {
    /// Whether all three record checks reached a verified majority.
    pub fn all_verified(&self) -> bool {
        self.dkim.is_verified() && self.spf.is_verified() && self.stats.is_verified()
    }

    /// Suggested delay before the caller re-checks this domain: short while
    /// any record is unverified, long once all three pass. Scheduling the
    /// re-check is the caller's responsibility.
    pub fn recheck_interval(&self) -> Duration {
        if self.all_verified() {
            VERIFIED_RECHECK
        } else {
            UNVERIFIED_RECHECK
        }
    }
}

/// Consensus DNS checker over an ordered resolver ensemble.
///
/// Duplicates in the ensemble are permitted; each entry is queried
/// independently and casts its own vote.
pub struct DnsChecker<R> {
    resolvers: Vec<R>,
}

impl DnsChecker<UpstreamResolver> {
    /// Creates a checker over the reference ensemble of ten public DNS
    /// servers (`config::PUBLIC_DNS_SERVERS`).
    ///
    /// # Errors
    ///
    /// Returns an error if the ensemble fails to build.
    pub fn with_default_ensemble() -> anyhow::Result<Self> {
        Ok(Self::new(UpstreamResolver::default_ensemble()?))
    }
}

impl<R: Resolver> DnsChecker<R> {
    /// Creates a checker over `resolvers`.
    pub fn new(resolvers: Vec<R>) -> Self {
        Self { resolvers }
    }

    /// Checks that the DKIM public key TXT record is published on
    /// `<selector>._domainkey.<domain>`.
    pub async fn check_dkim(
        &self,
        cancel: &CancellationToken,
        config: &DomainConfig,
    ) -> ConsensusResult {
        self.run_consensus_check(cancel, config, RecordCheck::Dkim)
            .await
    }

    /// Checks that a TXT record on the domain includes the mail relay in its
    /// SPF policy.
    pub async fn check_spf(
        &self,
        cancel: &CancellationToken,
        config: &DomainConfig,
    ) -> ConsensusResult {
        self.run_consensus_check(cancel, config, RecordCheck::Spf)
            .await
    }

    /// Checks that `<prefix>.<domain>` is a CNAME pointing at the mail relay.
    pub async fn check_stats(
        &self,
        cancel: &CancellationToken,
        config: &DomainConfig,
    ) -> ConsensusResult {
        self.run_consensus_check(cancel, config, RecordCheck::StatsCname)
            .await
    }

    /// Runs all three record checks concurrently. The checks are independent;
    /// no ordering is guaranteed between them.
    pub async fn check_all(&self, cancel: &CancellationToken, config: &DomainConfig) -> DnsStatus {
        let (dkim, spf, stats) = futures::join!(
            self.check_dkim(cancel, config),
            self.check_spf(cancel, config),
            self.check_stats(cancel, config),
        );
        DnsStatus { dkim, spf, stats }
    }

    /// Fans `check` out over every resolver concurrently and folds the votes.
    ///
    /// Waits for every resolver to report; there is no early exit on first
    /// success or failure, because the majority policy needs full counts to be
    /// meaningful. Individual lookup failures are absorbed into the counts,
    /// never surfaced as an error. Cancellation drops the in-flight lookups
    /// and returns an empty, unverified result so partial counts are never
    /// exposed.
    async fn run_consensus_check(
        &self,
        cancel: &CancellationToken,
        config: &DomainConfig,
        check: RecordCheck,
    ) -> ConsensusResult {
        let mut result = ConsensusResult::default();

        if !config.is_complete() {
            log::warn!(
                "domain config for {:?} has empty fields, skipping {check:?} check",
                config.domain_name
            );
            return result;
        }

        let mut votes: FuturesUnordered<_> = self
            .resolvers
            .iter()
            .map(|resolver| predicates::evaluate(check, resolver, config))
            .collect();

        loop {
            tokio::select! {
                // Cancellation must win over ready votes, or an already
                // cancelled token could still leak a partial tally
                biased;
                _ = cancel.cancelled() => {
                    log::debug!(
                        "{check:?} check for {} cancelled, discarding partial counts",
                        config.domain_name
                    );
                    return ConsensusResult::default();
                }
                vote = votes.next() => {
                    let Some(vote) = vote else { break };
                    match CheckOutcome::classify(vote) {
                        Some(outcome) => result.record(outcome),
                        None => log::debug!(
                            "{check:?} check for {} excluded a timed-out resolver",
                            config.domain_name
                        ),
                    }
                }
            }
        }

        result
    }
}
