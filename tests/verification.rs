// End-to-end verification scenarios driven through the public API.

mod helpers;

use domain_dns_status::config::{PUBLIC_DNS_SERVERS, UNVERIFIED_RECHECK, VERIFIED_RECHECK};
use domain_dns_status::{ConsensusResult, DnsChecker, DnsStatus, MockResolver, UpstreamResolver};
use tokio_util::sync::CancellationToken;

use helpers::{fully_configured_resolver, init_test_logging, resolver_with_dkim_key, test_domain};

#[tokio::test]
async fn dkim_consensus_two_correct_one_wrong() {
    init_test_logging();
    let checker = DnsChecker::new(vec![
        resolver_with_dkim_key("publicKey"),
        resolver_with_dkim_key("publicKey"),
        resolver_with_dkim_key("wrongKey"),
    ]);

    let result = checker
        .check_dkim(&CancellationToken::new(), &test_domain())
        .await;
    assert_eq!(result.verified, 2);
    assert_eq!(result.not_verified, 1);
    assert_eq!(result.errored, 0);
    assert!(result.is_verified());
}

#[tokio::test]
async fn dkim_consensus_missing_record_breaks_majority() {
    let checker = DnsChecker::new(vec![
        MockResolver::new(),
        resolver_with_dkim_key("publicKey"),
        resolver_with_dkim_key("wrongKey"),
    ]);

    let result = checker
        .check_dkim(&CancellationToken::new(), &test_domain())
        .await;
    assert_eq!(result.verified, 1);
    assert_eq!(result.not_verified, 2);
    assert!(!result.is_verified());
}

#[tokio::test]
async fn cname_missing_zone_is_a_negative_vote_not_an_error() {
    let checker = DnsChecker::new(vec![MockResolver::new()]);

    let result = checker
        .check_stats(&CancellationToken::new(), &test_domain())
        .await;
    assert_eq!(result.not_verified, 1);
    assert_eq!(result.errored, 0);
}

#[tokio::test]
async fn fully_published_domain_verifies_everywhere() {
    let checker = DnsChecker::new(vec![
        fully_configured_resolver(),
        fully_configured_resolver(),
        fully_configured_resolver(),
    ]);

    let status = checker
        .check_all(&CancellationToken::new(), &test_domain())
        .await;
    assert!(status.all_verified());
    assert_eq!(status.dkim.verified, 3);
    assert_eq!(status.spf.verified, 3);
    assert_eq!(status.stats.verified, 3);
    assert_eq!(status.recheck_interval(), VERIFIED_RECHECK);
}

#[tokio::test]
async fn partially_published_domain_asks_for_a_short_recheck() {
    // SPF and stats missing everywhere, DKIM correct
    let checker = DnsChecker::new(vec![
        resolver_with_dkim_key("publicKey"),
        resolver_with_dkim_key("publicKey"),
    ]);

    let status = checker
        .check_all(&CancellationToken::new(), &test_domain())
        .await;
    assert!(status.dkim.is_verified());
    assert!(!status.spf.is_verified());
    assert!(!status.stats.is_verified());
    assert!(!status.all_verified());
    assert_eq!(status.recheck_interval(), UNVERIFIED_RECHECK);
}

#[tokio::test]
async fn mixed_failures_follow_the_tally_policy() {
    init_test_logging();
    // one correct answer, one timeout (excluded), one network error (counted)
    let slow = fully_configured_resolver();
    slow.set_timeout("selector._domainkey.example.com");

    let broken = MockResolver::new();
    broken.set_network_error("selector._domainkey.example.com");

    let checker = DnsChecker::new(vec![fully_configured_resolver(), slow, broken]);

    let result = checker
        .check_dkim(&CancellationToken::new(), &test_domain())
        .await;
    assert_eq!(result.verified, 1);
    assert_eq!(result.not_verified, 0);
    assert_eq!(result.errored, 1);
    // 1 > 0 + 1 is false: an inconclusive ensemble must not verify
    assert!(!result.is_verified());
}

#[tokio::test]
async fn reference_ensemble_has_ten_independent_servers() {
    assert_eq!(PUBLIC_DNS_SERVERS.len(), 10);

    let resolvers = UpstreamResolver::default_ensemble().expect("ensemble should build");
    assert_eq!(resolvers.len(), 10);
}

#[test]
fn dns_status_serializes_for_callers() {
    let status = DnsStatus {
        dkim: ConsensusResult {
            verified: 8,
            not_verified: 1,
            errored: 0,
        },
        spf: ConsensusResult::default(),
        stats: ConsensusResult::default(),
    };

    let json = serde_json::to_string(&status).expect("status should serialize");
    let parsed: DnsStatus = serde_json::from_str(&json).expect("status should deserialize");
    assert_eq!(parsed, status);
    assert!(json.contains("\"verified\":8"));
}
