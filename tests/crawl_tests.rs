//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a real site fixture over HTTP and run
//! the full crawl cycle end to end, including the per-route invocation
//! counts that prove every URL is fetched at most once.

use sitegraph::config::Config;
use sitegraph::crawler::{HttpFetcher, Scheduler};
use sitegraph::{ResourceKind, RunOutcome};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Extracts the host:port of a mock server, which acts as the base domain
fn server_domain(server: &MockServer) -> String {
    server
        .uri()
        .strip_prefix("http://")
        .expect("mock server uri is http")
        .to_string()
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn scheduler_for(server: &MockServer, config: Config) -> Scheduler<HttpFetcher> {
    let fetcher = HttpFetcher::new(&config.crawler).expect("failed to build fetcher");
    Scheduler::new(config.crawler, server_domain(server), fetcher)
}

#[tokio::test]
async fn test_full_crawl_fixture_graph() {
    let server = MockServer::start().await;

    // Root links to three pages and two assets; the external asset and the
    // protocol-relative link must be dropped at normalization.
    mount_page(
        &server,
        "/",
        r#"<html><body>
            <a href="/a/">A</a>
            <a href="/b/">B</a>
            <a href="/c/">C</a>
            <img src="/assets/logo.png" alt="">
            <script src="http://other.example.net/tracker.js"></script>
            <script src="//cdn.example.net/lib.js"></script>
        </body></html>"#,
        1,
    )
    .await;

    mount_page(&server, "/a/", r#"<html><body><a href="/d">D</a></body></html>"#, 1).await;
    mount_page(&server, "/b/", "<html><body>no links</body></html>", 1).await;
    mount_page(
        &server,
        "/c/",
        r#"<html><body><img src="/assets/logo.png" alt=""></body></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/d", "<html><body>leaf</body></html>", 1).await;

    // Assets are terminal: never fetched
    Mock::given(method("GET"))
        .and(path("/assets/logo.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let domain = server_domain(&server);
    let report = scheduler_for(&server, Config::default()).run().await;

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.claimed, report.finalized);
    assert_eq!(report.fetch_failures, 0);

    // Exactly root, a, b, c, d, and the in-scope asset
    assert_eq!(report.resources.len(), 6);

    let root = &report.resources[&format!("http://{}", domain)];
    assert_eq!(root.kind, ResourceKind::Page);
    assert_eq!(root.children.len(), 4);

    let logo = &report.resources[&format!("http://{}/assets/logo.png", domain)];
    assert_eq!(logo.kind, ResourceKind::Asset);
    assert!(logo.children.is_empty());

    let a = &report.resources[&format!("http://{}/a/", domain)];
    assert_eq!(a.children, vec![format!("http://{}/d", domain)]);

    let b = &report.resources[&format!("http://{}/b/", domain)];
    assert_eq!(b.kind, ResourceKind::Page);
    assert!(b.children.is_empty());

    // Wiremock verifies the expect(..) counts when the server drops
}

#[tokio::test]
async fn test_cycles_fetched_once() {
    let server = MockServer::start().await;

    // The root URL carries no trailing slash, so the "/" link found on /y is
    // a distinct registry entry that maps to the same route. Two claims, two
    // fetches of GET /.
    mount_page(&server, "/", r#"<a href="/x">"#, 2).await;
    mount_page(&server, "/x", r#"<a href="/y">"#, 1).await;
    mount_page(&server, "/y", r#"<a href="/x"><a href="/">"#, 1).await;

    let report = scheduler_for(&server, Config::default()).run().await;

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.claimed, report.finalized);
    // root, /, /x, /y
    assert_eq!(report.resources.len(), 4);
}

#[tokio::test]
async fn test_fetch_failure_does_not_abort_run() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/broken"><a href="/healthy">"#,
        1,
    )
    .await;
    mount_page(&server, "/healthy", "<p>fine</p>", 1).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let domain = server_domain(&server);
    let report = scheduler_for(&server, Config::default()).run().await;

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.fetch_failures, 1);

    let broken = &report.resources[&format!("http://{}/broken", domain)];
    assert_eq!(broken.kind, ResourceKind::Page);
    assert!(broken.children.is_empty());

    assert!(report
        .resources
        .contains_key(&format!("http://{}/healthy", domain)));
}

#[tokio::test]
async fn test_query_strings_never_create_duplicates() {
    let server = MockServer::start().await;

    // Both links resolve to the same canonical /page and must produce one
    // claim and one fetch
    mount_page(
        &server,
        "/",
        r#"<a href="/page?utm_source=x"><a href="/page?ref=footer">"#,
        1,
    )
    .await;
    mount_page(&server, "/page", "<p></p>", 1).await;

    let domain = server_domain(&server);
    let report = scheduler_for(&server, Config::default()).run().await;

    assert_eq!(report.resources.len(), 2);
    let root = &report.resources[&format!("http://{}", domain)];
    assert_eq!(root.children, vec![format!("http://{}/page", domain)]);
}

#[tokio::test]
async fn test_transient_error_retried_when_configured() {
    let server = MockServer::start().await;

    // First attempt gets a 503, the retry succeeds
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<p>back up</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.crawler.retry_count = 1;

    let report = scheduler_for(&server, config).run().await;

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.fetch_failures, 0);
    assert_eq!(report.resources.len(), 1);
}

#[tokio::test]
async fn test_run_timeout_reports_partial_result() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/slow">"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("<p></p>").set_delay(std::time::Duration::from_millis(500)))
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.crawler.run_timeout_ms = 100;

    let report = tokio::time::timeout(
        std::time::Duration::from_secs(10),
        scheduler_for(&server, config).run(),
    )
    .await
    .expect("timed-out run must drain and terminate");

    assert_eq!(report.outcome, RunOutcome::TimedOut);
    // Whatever was claimed has been settled
    assert_eq!(report.claimed, report.finalized);
}

#[tokio::test]
async fn test_cancel_stops_new_claims() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/never">"#, 0).await;

    let scheduler = scheduler_for(&server, Config::default());
    scheduler.cancel_token().cancel();

    let report = scheduler.run().await;

    assert_eq!(report.outcome, RunOutcome::Cancelled);
    assert_eq!(report.claimed, 1);
    assert_eq!(report.finalized, 1);
}
