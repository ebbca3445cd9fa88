//! Integration tests for the search pipeline
//!
//! These tests use wiremock to stand in for index sites and exercise fetching,
//! extraction, enrichment and aggregation end-to-end.

use seedsift::config::{HttpConfig, SiteConfig};
use seedsift::enrich::CommentEnricher;
use seedsift::fetch::{build_http_client, FetchClient, RetryPolicy};
use seedsift::search::{search_site, SiteRegistry};
use seedsift::sites::{Extractor, Site, SiteKind};
use seedsift::{Searcher, SiftError};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One result row of a mocked search page
struct Row {
    name: &'static str,
    seeders: u64,
    uploader: &'static str,
    comments: u32,
    href: Option<String>,
    magnet: bool,
}

impl Row {
    fn new(name: &'static str, seeders: u64) -> Self {
        Self {
            name,
            seeders,
            uploader: "uploader",
            comments: 0,
            href: Some(format!("/torrent/{}", name)),
            magnet: true,
        }
    }

    fn with_comments(mut self, count: u32) -> Self {
        self.comments = count;
        self
    }

    fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    fn without_magnet(mut self) -> Self {
        self.magnet = false;
        self
    }

    fn to_html(&self) -> String {
        let link = match &self.href {
            Some(href) => format!(r#"<a href="{}" class="detLink">{}</a>"#, href, self.name),
            None => self.name.to_string(),
        };
        let magnet = if self.magnet {
            format!(
                r#"<a href="magnet:?xt=urn:btih:{}"><img src="/static/img/icon-magnet.gif" alt="Magnet link"/></a>"#,
                self.name
            )
        } else {
            String::new()
        };
        let comments = if self.comments > 0 {
            format!(
                r#"<img src="/static/img/icon_comment.gif" alt="This torrent has {0} comments." title="This torrent has {0} comments."/>"#,
                self.comments
            )
        } else {
            String::new()
        };

        format!(
            r#"<tr>
  <td class="vertTh"><center><a href="/browse/200">Video</a><br/>(<a href="/browse/201">Movies</a>)</center></td>
  <td>
    <div class="detName">{link}</div>
    {magnet}
    {comments}
    <font class="detDesc">Uploaded 04-23&nbsp;2020, Size 706.02&nbsp;MiB, ULed by <a class="detDesc" href="/user/{uploader}/">{uploader}</a></font>
  </td>
  <td align="right">{seeders}</td>
  <td align="right">2</td>
</tr>"#,
            link = link,
            magnet = magnet,
            comments = comments,
            uploader = self.uploader,
            seeders = self.seeders,
        )
    }
}

fn search_page(rows: &[Row]) -> String {
    let body: String = rows.iter().map(Row::to_html).collect();
    format!(
        r#"<html><body><table id="searchResult">
<thead id="tableHead"><tr class="header"><th>Type</th><th>Name</th><th>SE</th><th>LE</th></tr></thead>
{}
</table></body></html>"#,
        body
    )
}

fn comment_page(comments: &[&str]) -> String {
    let body: String = comments
        .iter()
        .map(|c| format!(r#"<div class="comment">{}</div>"#, c))
        .collect();
    format!(r#"<html><body><div id="comments">{}</div></body></html>"#, body)
}

/// Splits a mock server URI into the (protocol, domain, tld) triple
fn site_config(uri: &str, enrich_comments: bool) -> SiteConfig {
    let (protocol, host) = uri.split_once("://").expect("URI has a scheme");
    let (domain, tld) = host.rsplit_once('.').expect("host has a dot");
    SiteConfig {
        variant: SiteKind::ThePirateBay,
        protocol: protocol.to_string(),
        domain: domain.to_string(),
        tld: tld.to_string(),
        enrich_comments,
        cookies: None,
    }
}

fn fast_client() -> FetchClient {
    let client = build_http_client(&HttpConfig::default()).expect("client builds");
    FetchClient::with_client(client, RetryPolicy::new(5, Duration::from_millis(1)))
}

fn fast_enricher() -> CommentEnricher {
    CommentEnricher::new(Duration::ZERO, 4)
}

fn searcher_for(configs: &[SiteConfig]) -> Searcher {
    let sites = configs
        .iter()
        .map(|c| Box::new(Site::new(c).expect("site builds")) as Box<dyn Extractor>)
        .collect();
    let registry = SiteRegistry::new(sites).expect("registry builds");
    Searcher::with_parts(registry, fast_client(), fast_enricher())
}

async fn mount_search(server: &MockServer, query_path: &str, rows: &[Row]) {
    Mock::given(method("GET"))
        .and(path(query_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(rows)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_sites_ranked_by_seeders() {
    let site_a = MockServer::start().await;
    let site_b = MockServer::start().await;

    mount_search(
        &site_a,
        "/search/ubuntu/0/99/0",
        &[Row::new("a10", 10), Row::new("a50", 50), Row::new("a5", 5)],
    )
    .await;
    mount_search(&site_b, "/search/ubuntu/0/99/0", &[Row::new("b20", 20)]).await;

    let searcher = searcher_for(&[
        site_config(&site_a.uri(), false),
        site_config(&site_b.uri(), false),
    ]);
    let results = searcher.search("ubuntu").await;

    let seeders: Vec<u64> = results.iter().map(|r| r.seeders).collect();
    assert_eq!(seeders, vec![50, 20, 10, 5]);

    let top = &results[0];
    assert_eq!(top.name, "a50");
    assert_eq!(top.media_type, "Video");
    assert_eq!(top.category, "Movies");
    assert_eq!(top.file_size, "706.02 MiB");
    assert_eq!(top.uploader.as_deref(), Some("uploader"));
    assert_eq!(top.magnet_link.as_deref(), Some("magnet:?xt=urn:btih:a50"));
}

#[tokio::test]
async fn test_failing_site_is_isolated_after_retries() {
    let broken = MockServer::start().await;
    let healthy = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(5)
        .mount(&broken)
        .await;
    mount_search(
        &healthy,
        "/search/ubuntu/0/99/0",
        &[Row::new("ok1", 3), Row::new("ok2", 7)],
    )
    .await;

    let searcher = searcher_for(&[
        site_config(&broken.uri(), false),
        site_config(&healthy.uri(), false),
    ]);
    let results = searcher.search("ubuntu").await;

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["ok2", "ok1"]);
    // The broken server verifies exactly five attempts when it drops
}

#[tokio::test]
async fn test_retry_recovers_from_transient_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/ubuntu/0/99/0"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    mount_search(&server, "/search/ubuntu/0/99/0", &[Row::new("late", 4)]).await;

    let searcher = searcher_for(&[site_config(&server.uri(), false)]);
    let results = searcher.search("ubuntu").await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "late");
}

#[tokio::test]
async fn test_fetch_returns_network_error_when_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    let client = FetchClient::with_client(
        build_http_client(&HttpConfig::default()).unwrap(),
        RetryPolicy::new(3, Duration::from_millis(1)),
    );
    let result = client.fetch(&format!("{}/search/x/0/99/0", server.uri()), None).await;

    match result {
        Err(SiftError::Network { message, .. }) => assert_eq!(message, "HTTP 404"),
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_page_accepts_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/torrent/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>gone</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client();
    let body = client
        .fetch_page(&format!("{}/torrent/gone", server.uri()), None)
        .await
        .unwrap();

    assert_eq!(body, "<html>gone</html>");
}

#[tokio::test]
async fn test_fixed_headers_and_cookies_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/ubuntu%20desktop/0/99/0"))
        .and(header("content-type", "text/plain; charset=UTF-8"))
        .and(header("user-agent", "Mozilla/5.0"))
        .and(header("cookie", "lw=s"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(search_page(&[Row::new("d", 1)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = site_config(&server.uri(), false);
    config.cookies = Some("lw=s".to_string());

    let searcher = searcher_for(&[config]);
    let results = searcher.search("ubuntu desktop").await;

    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_duplicates_across_sites_collapse() {
    let site_a = MockServer::start().await;
    let site_b = MockServer::start().await;

    mount_search(&site_a, "/search/ubuntu/0/99/0", &[Row::new("same", 10)]).await;
    mount_search(
        &site_b,
        "/search/ubuntu/0/99/0",
        &[Row::new("same", 30), Row::new("other", 1)],
    )
    .await;

    let searcher = searcher_for(&[
        site_config(&site_a.uri(), false),
        site_config(&site_b.uri(), false),
    ]);
    let results = searcher.search("ubuntu").await;

    assert_eq!(results.len(), 2);
    assert_eq!(results.iter().filter(|r| r.name == "same").count(), 1);
    // First occurrence wins
    assert_eq!(results[0].name, "same");
    assert_eq!(results[0].seeders, 10);
}

#[tokio::test]
async fn test_row_missing_magnet_is_skipped() {
    let server = MockServer::start().await;

    mount_search(
        &server,
        "/search/ubuntu/0/99/0",
        &[
            Row::new("before", 2),
            Row::new("broken", 99).without_magnet(),
            Row::new("after", 1),
        ],
    )
    .await;

    let searcher = searcher_for(&[site_config(&server.uri(), false)]);
    let results = searcher.search("ubuntu").await;

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["before", "after"]);
}

#[tokio::test]
async fn test_page_without_table_contributes_nothing() {
    let broken = MockServer::start().await;
    let healthy = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>maintenance</body></html>"),
        )
        .expect(1)
        .mount(&broken)
        .await;
    mount_search(&healthy, "/search/ubuntu/0/99/0", &[Row::new("fine", 1)]).await;

    let searcher = searcher_for(&[
        site_config(&broken.uri(), false),
        site_config(&healthy.uri(), false),
    ]);
    let results = searcher.search("ubuntu").await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "fine");
}

#[tokio::test]
async fn test_comments_attached_and_uncommented_rows_not_fetched() {
    let server = MockServer::start().await;

    mount_search(
        &server,
        "/search/ubuntu/0/99/0",
        &[
            Row::new("talked", 5).with_comments(2),
            Row::new("quiet", 9),
        ],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/torrent/talked"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(comment_page(&["great find", "thanks"])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/torrent/quiet"))
        .respond_with(ResponseTemplate::new(200).set_body_string(comment_page(&["never"])))
        .expect(0)
        .mount(&server)
        .await;

    let searcher = searcher_for(&[site_config(&server.uri(), true)]);
    let results = searcher.search("ubuntu").await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "quiet");
    assert!(results[0].comments.is_empty());
    assert_eq!(results[1].name, "talked");
    assert_eq!(results[1].comment_count, 2);
    assert_eq!(results[1].comments, vec!["1.) great find", "2.) thanks"]);
}

#[tokio::test]
async fn test_failed_detail_fetch_is_isolated() {
    let server = MockServer::start().await;

    mount_search(
        &server,
        "/search/ubuntu/0/99/0",
        &[
            // Nothing listens on port 1, so this detail fetch fails to connect
            Row::new("unreachable", 8)
                .with_comments(1)
                .with_href("http://127.0.0.1:1/torrent/unreachable"),
            Row::new("reachable", 4).with_comments(1),
        ],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/torrent/reachable"))
        .respond_with(ResponseTemplate::new(200).set_body_string(comment_page(&["works"])))
        .expect(1)
        .mount(&server)
        .await;

    let searcher = searcher_for(&[site_config(&server.uri(), true)]);
    let results = searcher.search("ubuntu").await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "unreachable");
    assert!(results[0].comments.is_empty());
    assert_eq!(results[1].comments, vec!["1.) works"]);
}

#[tokio::test]
async fn test_enrichment_switch_off_skips_detail_pages() {
    let server = MockServer::start().await;

    mount_search(
        &server,
        "/search/ubuntu/0/99/0",
        &[Row::new("talked", 5).with_comments(3)],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/torrent/talked"))
        .respond_with(ResponseTemplate::new(200).set_body_string(comment_page(&["hidden"])))
        .expect(0)
        .mount(&server)
        .await;

    let searcher = searcher_for(&[site_config(&server.uri(), false)]);
    let results = searcher.search("ubuntu").await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].comment_count, 3);
    assert!(results[0].comments.is_empty());
}

#[tokio::test]
async fn test_enricher_reports_stats() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/torrent/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/torrent/full"))
        .respond_with(ResponseTemplate::new(200).set_body_string(comment_page(&["a", "b"])))
        .expect(1)
        .mount(&server)
        .await;
    mount_search(
        &server,
        "/search/x/0/99/0",
        &[
            Row::new("empty", 1).with_comments(1),
            Row::new("full", 2).with_comments(2),
            Row::new("none", 3),
        ],
    )
    .await;

    // Enrichment switched off so the search itself fetches no detail pages
    let site = Site::new(&site_config(&server.uri(), false)).unwrap();
    let client = fast_client();
    let enricher = fast_enricher();

    let mut results = search_site(&site, &client, &enricher, "x").await.unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.comments.is_empty()));

    let stats = enricher.enrich(&site, &client, &mut results).await;
    assert_eq!(stats.fetched, 1);
    assert_eq!(stats.empty, 1);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.skipped_no_href, 0);

    assert!(results[0].comments.is_empty());
    assert_eq!(results[1].comments, vec!["1.) a", "2.) b"]);
    assert!(results[2].comments.is_empty());
}

#[tokio::test]
async fn test_comment_fetches_wait_then_overlap() {
    let server = MockServer::start().await;
    let names = ["c1", "c2", "c3", "c4"];

    mount_search(
        &server,
        "/search/x/0/99/0",
        &names.map(|name| Row::new(name, 1).with_comments(1)),
    )
    .await;
    for name in names {
        Mock::given(method("GET"))
            .and(path(format!("/torrent/{}", name)))
            .respond_with(ResponseTemplate::new(200).set_body_string(comment_page(&[name])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let site = Site::new(&site_config(&server.uri(), false)).unwrap();
    let client = fast_client();
    let mut results = search_site(&site, &client, &fast_enricher(), "x")
        .await
        .unwrap();

    let delay = Duration::from_millis(300);
    let enricher = CommentEnricher::new(delay, 8);
    let start = std::time::Instant::now();
    let stats = enricher.enrich(&site, &client, &mut results).await;
    let elapsed = start.elapsed();

    assert_eq!(stats.fetched, 4);
    // Every fetch waits for the delay first
    assert!(elapsed >= delay, "finished in {:?}", elapsed);
    // The four delayed fetches run side by side
    assert!(elapsed < delay * 4, "finished in {:?}", elapsed);

    for (result, name) in results.iter().zip(names) {
        assert_eq!(result.comments, vec![format!("1.) {}", name)]);
    }
}
