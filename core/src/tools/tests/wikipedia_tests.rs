use super::wikipedia_settings;
use crate::tools::executors::{WikipediaTool, NO_RESULT};
use crate::tools::{Tool, ToolError};
use mockito::Matcher;
use serde_json::json;

fn search_mock(server: &mut mockito::ServerGuard, titles: &[&str]) -> mockito::Mock {
    let hits: Vec<_> = titles.iter().map(|t| json!({ "ns": 0, "title": t })).collect();
    server
        .mock("GET", "/w/api.php")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("list".into(), "search".into()),
            Matcher::UrlEncoded("srlimit".into(), "3".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "query": { "search": hits } }).to_string())
}

fn extract_mock(server: &mut mockito::ServerGuard, title: &str, extract: Option<&str>) -> mockito::Mock {
    let page = match extract {
        Some(text) => json!({ "pageid": 1, "title": title, "extract": text }),
        None => json!({ "title": title, "missing": true }),
    };
    server
        .mock("GET", "/w/api.php")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("prop".into(), "extracts".into()),
            Matcher::UrlEncoded("titles".into(), title.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "query": { "pages": [page] } }).to_string())
}

#[tokio::test]
async fn test_lookup_formats_page_summaries() {
    let mut server = mockito::Server::new_async().await;
    let search = search_mock(&mut server, &["Pythagorean theorem", "Pythagoras"])
        .create_async()
        .await;
    let first = extract_mock(
        &mut server,
        "Pythagorean theorem",
        Some("In mathematics, the Pythagorean theorem is a relation among the three sides of a right triangle."),
    )
    .create_async()
    .await;
    let second = extract_mock(&mut server, "Pythagoras", Some("Pythagoras of Samos was an ancient Ionian Greek philosopher."))
        .create_async()
        .await;

    let tool = WikipediaTool::new(wikipedia_settings(&server)).unwrap();
    let result = tool.invoke("Pythagorean theorem").await.unwrap();

    search.assert_async().await;
    first.assert_async().await;
    second.assert_async().await;
    assert!(result.starts_with("Page: Pythagorean theorem\nSummary: In mathematics"));
    assert!(result.contains("\n\nPage: Pythagoras\nSummary: Pythagoras of Samos"));
}

#[tokio::test]
async fn test_lookup_without_hits_reports_no_result() {
    let mut server = mockito::Server::new_async().await;
    search_mock(&mut server, &[]).create_async().await;

    let tool = WikipediaTool::new(wikipedia_settings(&server)).unwrap();
    assert_eq!(tool.invoke("qwertyuiopasdf").await.unwrap(), NO_RESULT);
}

#[tokio::test]
async fn test_lookup_skips_pages_without_extract() {
    let mut server = mockito::Server::new_async().await;
    search_mock(&mut server, &["Ghost page"]).create_async().await;
    extract_mock(&mut server, "Ghost page", None).create_async().await;

    let tool = WikipediaTool::new(wikipedia_settings(&server)).unwrap();
    assert_eq!(tool.invoke("ghost").await.unwrap(), NO_RESULT);
}

#[tokio::test]
async fn test_lookup_truncates_to_char_budget() {
    let mut server = mockito::Server::new_async().await;
    search_mock(&mut server, &["Pi"]).create_async().await;
    let long_extract = "3.14159 ".repeat(1000);
    extract_mock(&mut server, "Pi", Some(&long_extract)).create_async().await;

    let mut settings = wikipedia_settings(&server);
    settings.doc_content_chars_max = 100;
    let tool = WikipediaTool::new(settings).unwrap();

    let result = tool.invoke("pi").await.unwrap();
    assert_eq!(result.chars().count(), 100);
    assert!(result.starts_with("Page: Pi\nSummary: 3.14159"));
}

#[tokio::test]
async fn test_lookup_propagates_backend_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/w/api.php")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let tool = WikipediaTool::new(wikipedia_settings(&server)).unwrap();
    let err = tool.invoke("anything").await.unwrap_err();
    assert!(matches!(err, ToolError::Backend(_)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_lookup_rejects_blank_query() {
    let server = mockito::Server::new_async().await;
    let tool = WikipediaTool::new(wikipedia_settings(&server)).unwrap();

    let err = tool.invoke("   ").await.unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput(_)));
}

#[tokio::test]
async fn test_lookup_identifies_client_with_user_agent() {
    let mut server = mockito::Server::new_async().await;
    let search = server
        .mock("GET", "/w/api.php")
        .match_query(Matcher::UrlEncoded("list".into(), "search".into()))
        .match_header("user-agent", Matcher::Regex(r"^mathsolver/\d+\.\d+\.\d+$".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "query": { "search": [] } }).to_string())
        .create_async()
        .await;

    let tool = WikipediaTool::new(wikipedia_settings(&server)).unwrap();
    assert_eq!(tool.invoke("Euler's identity").await.unwrap(), NO_RESULT);
    search.assert_async().await;
}

#[tokio::test]
async fn test_lookup_caps_query_length_on_char_boundary() {
    let mut server = mockito::Server::new_async().await;
    // 300th character is two bytes wide
    let kept = format!("{}é", "a".repeat(299));
    let search = server
        .mock("GET", "/w/api.php")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("list".into(), "search".into()),
            Matcher::UrlEncoded("srsearch".into(), kept.clone()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "query": { "search": [] } }).to_string())
        .create_async()
        .await;

    let tool = WikipediaTool::new(wikipedia_settings(&server)).unwrap();
    let query = format!("  {} and everything after it  ", kept);
    assert_eq!(tool.invoke(&query).await.unwrap(), NO_RESULT);
    search.assert_async().await;
}
