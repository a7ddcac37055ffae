//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end: list pages, author pages, failure
//! handling, and CSV output.

use quote_scout::config::Config;
use quote_scout::crawler::{
    crawl, BackoffPolicy, Coordinator, CrawlEvent, FetchSettings, HttpFetcher, RecordingObserver,
};
use quote_scout::output::{read_records, write_csv};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENTRIES_PER_PAGE: usize = 2;

/// Builds a list page with one `div.quote` block per entry
fn list_page(entries: &[(&str, &str, &str)]) -> String {
    let mut html = String::from(r#"<html><head><title>Quotes to Scrape</title></head><body>"#);
    for (text, author, href) in entries {
        html.push_str(&format!(
            r#"
            <div class="quote" itemscope itemtype="http://schema.org/CreativeWork">
                <span class="text" itemprop="text">{}</span>
                <span>by <small class="author" itemprop="author">{}</small>
                <a href="{}">(about)</a>
                </span>
            </div>"#,
            text, author, href
        ));
    }
    html.push_str("</body></html>");
    html
}

fn author_page(name: &str, date: &str, location: &str, description: &str) -> String {
    format!(
        r#"<html><body><div class="author-details">
            <h3 class="author-title">{}</h3>
            <p><strong>Born:</strong> <span class="author-born-date">{}</span>
            <span class="author-born-location">{}</span></p>
            <strong>Description:</strong>
            <div class="author-description">
                {}
            </div>
        </div></body></html>"#,
        name, date, location, description
    )
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

/// Fetcher with millisecond backoff and two attempts per URL
fn fast_fetcher() -> HttpFetcher {
    let settings = FetchSettings {
        backoff: BackoffPolicy::new(Duration::from_millis(1), 2.0, Duration::from_millis(2), 2),
        request_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(1),
    };
    HttpFetcher::with_identity(settings, "TestBot/1.0.0").expect("Failed to build fetcher")
}

async fn mount_page(server: &MockServer, n: u32, entries: &[(&str, &str, &str)]) {
    Mock::given(method("GET"))
        .and(path(format!("/page/{}/", n)))
        .respond_with(html_response(list_page(entries)))
        .mount(server)
        .await;
}

async fn mount_author(server: &MockServer, slug: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/author/{}", slug)))
        .respond_with(html_response(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_merges_and_orders_records() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        &[
            ("“The world as we have created it.”", "Albert Einstein", "/author/Albert-Einstein"),
            ("“It is our choices, Harry.”", "J.K. Rowling", "/author/J-K-Rowling"),
        ],
    )
    .await;
    mount_page(
        &mock_server,
        2,
        &[("“Try not to become a man of success.”", "Albert Einstein", "/author/Albert-Einstein")],
    )
    .await;

    mount_author(
        &mock_server,
        "Albert-Einstein",
        author_page(
            "Albert Einstein",
            "March 14, 1879",
            "in Ulm, Germany",
            "In 1879, Albert Einstein was born in Ulm, Germany.",
        ),
    )
    .await;
    mount_author(
        &mock_server,
        "J-K-Rowling",
        author_page(
            "J.K. Rowling",
            "July 31, 1965",
            "in Yate, South Gloucestershire, England, The United Kingdom",
            "See also: Robert Galbraith",
        ),
    )
    .await;

    let observer = Arc::new(RecordingObserver::new());
    let coordinator = Coordinator::new(&mock_server.uri(), fast_fetcher(), observer.clone())
        .expect("Failed to create coordinator");
    let report = coordinator.run(2, &CancellationToken::new()).await;

    assert_eq!(report.len(), 3);
    assert!(!report.partial);
    assert!(report.pages_failed.is_empty());

    let first = &report.records[0];
    assert_eq!(first.text, "“The world as we have created it.”");
    assert_eq!(first.author, "Albert Einstein");
    assert_eq!(first.detail_link, "/author/Albert-Einstein");
    assert_eq!(first.birth_date, "March 14, 1879");
    assert_eq!(first.birth_place, "Ulm, Germany");
    assert_eq!(
        first.description,
        "In 1879, Albert Einstein was born in Ulm, Germany."
    );

    let second = &report.records[1];
    assert_eq!(second.author, "J.K. Rowling");
    assert_eq!(
        second.birth_place,
        "Yate, South Gloucestershire, England, The United Kingdom"
    );

    assert_eq!(report.records[2].text, "“Try not to become a man of success.”");

    let progress: Vec<CrawlEvent> = observer
        .events()
        .into_iter()
        .filter(|e| matches!(e, CrawlEvent::PageCompleted { .. }))
        .collect();
    assert_eq!(
        progress,
        vec![
            CrawlEvent::PageCompleted {
                page_number: 1,
                records_so_far: 2
            },
            CrawlEvent::PageCompleted {
                page_number: 2,
                records_so_far: 3
            },
        ]
    );
}

#[tokio::test]
async fn test_failing_middle_page_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, 1, &[("“Page one.”", "One", "")]).await;
    mount_page(&mock_server, 3, &[("“Page three.”", "Three", "")]).await;

    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let observer = Arc::new(RecordingObserver::new());
    let coordinator = Coordinator::new(&mock_server.uri(), fast_fetcher(), observer.clone())
        .expect("Failed to create coordinator");
    let report = coordinator.run(3, &CancellationToken::new()).await;

    let texts: Vec<&str> = report.records.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["“Page one.”", "“Page three.”"]);
    assert_eq!(report.pages_completed, 2);
    assert_eq!(report.pages_failed, vec![2]);

    // Exactly one page-level failure, for page 2
    assert_eq!(observer.failed_pages(), vec![2]);
}

#[tokio::test]
async fn test_empty_detail_link_is_never_fetched() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, 1, &[("“No link.”", "Anonymous", "")]).await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/author/.*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let observer = Arc::new(RecordingObserver::new());
    let coordinator = Coordinator::new(&mock_server.uri(), fast_fetcher(), observer)
        .expect("Failed to create coordinator");
    let report = coordinator.run(1, &CancellationToken::new()).await;

    assert_eq!(report.len(), 1);
    assert_eq!(report.records[0].detail_link, "");
    assert_eq!(report.records[0].birth_date, "");
}

#[tokio::test]
async fn test_failed_author_page_keeps_record() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        &[
            ("“Kept.”", "Broken Author", "/author/Broken"),
            ("“Also kept.”", "Good Author", "/author/Good"),
        ],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/author/Broken"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;
    mount_author(
        &mock_server,
        "Good",
        author_page("Good Author", "1977", "", "A good author."),
    )
    .await;

    let observer = Arc::new(RecordingObserver::new());
    let coordinator = Coordinator::new(&mock_server.uri(), fast_fetcher(), observer.clone())
        .expect("Failed to create coordinator");
    let report = coordinator.run(1, &CancellationToken::new()).await;

    assert_eq!(report.len(), 2);
    assert_eq!(report.details_failed, 1);

    let broken = &report.records[0];
    assert_eq!(broken.author, "Broken Author");
    assert_eq!(broken.detail_link, "/author/Broken");
    assert_eq!(broken.birth_date, "");
    assert_eq!(broken.birth_place, "");
    assert_eq!(broken.description, "");

    let good = &report.records[1];
    assert_eq!(good.birth_date, "1977");
    assert_eq!(good.birth_place, "");
    assert_eq!(good.description, "A good author.");

    assert!(observer.failed_pages().is_empty());
    assert!(observer
        .events()
        .iter()
        .any(|e| matches!(e, CrawlEvent::DetailFailed { url, .. } if url == "/author/Broken")));
}

#[tokio::test]
async fn test_record_count_bounded_by_pages() {
    let mock_server = MockServer::start().await;

    for n in 1..=3 {
        mount_page(
            &mock_server,
            n,
            &[("“A.”", "Author A", ""), ("“B.”", "Author B", "")],
        )
        .await;
    }

    // Page 4 exists but is empty, page 5 is missing entirely
    Mock::given(method("GET"))
        .and(path("/page/4/"))
        .respond_with(html_response(list_page(&[])))
        .mount(&mock_server)
        .await;

    let observer = Arc::new(RecordingObserver::new());
    let coordinator = Coordinator::new(&mock_server.uri(), fast_fetcher(), observer.clone())
        .expect("Failed to create coordinator");

    let pages = 5;
    let report = coordinator.run(pages, &CancellationToken::new()).await;

    assert!(report.len() <= ENTRIES_PER_PAGE * pages as usize);
    assert_eq!(report.len(), 6);
    assert_eq!(report.pages_completed, 4);
    assert_eq!(observer.failed_pages(), vec![5]);
}

#[tokio::test]
async fn test_crawl_from_config_writes_csv() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        &[("“Comma, \"quotes\" and ümlauts.”", "Zoë Author", "/author/Zoe")],
    )
    .await;
    mount_author(
        &mock_server,
        "Zoe",
        author_page("Zoë Author", "May 1, 1990", "in Zürich, Switzerland", "Writes, a lot."),
    )
    .await;

    let mut config = Config::default();
    config.crawler.base_url = mock_server.uri();
    config.crawler.page_count = 1;
    config.user_agent.pool = vec!["TestBot/1.0.0".to_string()];
    config.fetch.initial_delay_ms = 1;
    config.fetch.max_delay_ms = 2;
    config.fetch.max_attempts = 2;

    let observer = Arc::new(RecordingObserver::new());
    let report = crawl(&config, observer, &CancellationToken::new())
        .await
        .expect("Crawl setup failed");
    assert_eq!(report.len(), 1);

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("quotes.csv");
    write_csv(&csv_path, &report.records).expect("Failed to write CSV");

    let content = std::fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(content.starts_with("text,author,detail_link,birth_date,birth_place,description"));

    let read_back = read_records(content.as_bytes()).expect("Failed to parse CSV");
    assert_eq!(read_back, report.records);
    assert_eq!(read_back[0].text, "“Comma, \"quotes\" and ümlauts.”");
    assert_eq!(read_back[0].birth_place, "Zürich, Switzerland");
    assert_eq!(read_back[0].description, "Writes, a lot.");
}

#[tokio::test]
async fn test_cancelled_before_start_returns_partial() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let observer = Arc::new(RecordingObserver::new());
    let coordinator = Coordinator::new(&mock_server.uri(), fast_fetcher(), observer)
        .expect("Failed to create coordinator");
    let report = coordinator.run(3, &cancel).await;

    assert!(report.partial);
    assert!(report.is_empty());
    assert_eq!(report.pages_completed, 0);
}
