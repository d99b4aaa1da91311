mod common;

use shared::sources::{hackernews, FourChanSource, HackerNewsSource, RedditSource};
use shared::Credential;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn base(server: &MockServer) -> Url {
    Url::parse(&server.uri()).unwrap()
}

fn credential() -> Credential {
    Credential {
        api: "reddit".to_string(),
        access_token: "T".to_string(),
        token_type: "bearer".to_string(),
        expires_at: i64::MAX,
    }
}

#[tokio::test]
async fn test_hackernews_walks_every_page() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("p", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(common::hackernews_page(&["First", "Second"])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("p", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(common::hackernews_page(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let source = HackerNewsSource::new(reqwest::Client::new(), base(&server));
    let headlines = source.fetch(2).await.unwrap();

    let titles: Vec<_> = headlines.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
    assert!(headlines.iter().all(|h| h.origin == hackernews::ORIGIN));
}

#[tokio::test]
async fn test_hackernews_failed_page_is_fatal() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = HackerNewsSource::new(reqwest::Client::new(), base(&server));
    let err = source.fetch(1).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_reddit_labels_each_subreddit() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/stocks/hot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::listing(&["Earnings week"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/r/worldnews/hot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::listing(&[])))
        .mount(&server)
        .await;

    let source = RedditSource::new(reqwest::Client::new(), base(&server), 20);
    let subreddits = vec!["stocks".to_string(), "worldnews".to_string()];
    let headlines = source.fetch(&credential(), &subreddits).await.unwrap();

    assert_eq!(headlines.len(), 1);
    assert_eq!(headlines[0].title, "Earnings week");
    assert_eq!(headlines[0].origin, "www.reddit.com/r/stocks");
}

#[tokio::test]
async fn test_reddit_unexpected_envelope_is_decode_error() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/rust/hot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {"children": [{"kind": "t3"}]}})))
        .mount(&server)
        .await;

    let source = RedditSource::new(reqwest::Client::new(), base(&server), 20);
    let err = source
        .fetch(&credential(), &["rust".to_string()])
        .await
        .unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn test_fourchan_scans_catalog_text() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/biz/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<script>var catalog = {"threads":{"1":{"teaser":"Link marines hold firm"},"2":{"teaser":"Is it over for gold"}}};</script>"#,
        ))
        .mount(&server)
        .await;

    let source = FourChanSource::new(reqwest::Client::new(), base(&server));
    let headlines = source.fetch("biz").await.unwrap();

    let titles: Vec<_> = headlines.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Link marines hold firm", "Is it over for gold"]);
    assert!(headlines.iter().all(|h| h.origin == "boards.4chan.org/biz"));
}

#[tokio::test]
async fn test_fourchan_empty_catalog_contributes_nothing() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/g/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let source = FourChanSource::new(reqwest::Client::new(), base(&server));
    assert!(source.fetch("g").await.unwrap().is_empty());
}
