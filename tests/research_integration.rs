//! Integration tests for the full research pipeline.
//!
//! A wiremock server stands in for both the MediaWiki API and the web
//! search results page, so these exercise real HTTP, JSON parsing, HTML
//! extraction, scoring, dedup and ranking without touching the network.

use research_engine::{
    ProviderOutcome, ProviderReport, ResearchConfig, Researcher, SearchDecision, SourceType,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PHOTOSYNTHESIS_SUMMARY: &str = "Photosynthesis is a system of biological processes by which \
photosynthetic organisms, such as most plants, algae, and cyanobacteria, convert light energy into \
chemical energy.";

const WEB_SNIPPET: &str = "Learn about photosynthesis in plants: how chloroplasts capture light and \
turn carbon dioxide and water into sugars and oxygen, sustaining nearly every food chain on the planet.";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config_for(server: &MockServer) -> ResearchConfig {
    ResearchConfig {
        politeness_delay_ms: 0,
        encyclopedia_base_url: server.uri(),
        web_search_url: format!("{}/search", server.uri()),
        user_agent: Some("ResearchEngineTest/1.0".into()),
        ..Default::default()
    }
}

async fn mount_titles(server: &MockServer, titles: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "opensearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "query",
            titles,
            vec![""; titles.len()],
            vec![""; titles.len()]
        ])))
        .mount(server)
        .await;
}

async fn mount_summary(server: &MockServer, title: &str, page: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("titles", title))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"query": {"pages": [page]}})),
        )
        .mount(server)
        .await;
}

async fn mount_search_page(server: &MockServer, status: u16, snippets: &[&str]) {
    let body: String = snippets
        .iter()
        .map(|s| format!("<div class=\"g\"><div class=\"VwiC3b\">{s}</div></div>"))
        .collect();
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(format!("<html><body>{body}</body></html>"))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn factual_query_gathers_from_both_sources() {
    init_tracing();
    let server = MockServer::start().await;

    mount_titles(&server, &["Photosynthesis", "Stub page", "Mercury"]).await;
    mount_summary(
        &server,
        "Photosynthesis",
        json!({"title": "Photosynthesis", "extract": PHOTOSYNTHESIS_SUMMARY}),
    )
    .await;
    mount_summary(
        &server,
        "Stub page",
        json!({"title": "Stub page", "extract": "Too short to use."}),
    )
    .await;
    mount_summary(
        &server,
        "Mercury",
        json!({"title": "Mercury", "extract": "Mercury may refer to:", "pageprops": {"disambiguation": ""}}),
    )
    .await;
    mount_search_page(
        &server,
        200,
        &[
            WEB_SNIPPET,
            "Too short to keep.",
            "We use cookie files to personalise content and ads, to provide social media features \
             and to analyse our traffic about photosynthesis and everything else on this site.",
        ],
    )
    .await;

    let researcher = Researcher::new(config_for(&server)).expect("researcher");
    let result = researcher.research("tell me about photosynthesis").await;

    assert_eq!(result.decision, SearchDecision::Both);
    assert_eq!(result.reason, "comprehensive factual information needed");
    assert_eq!(result.sources.len(), 2);

    // Web snippet matches "about" and "photosynthesis" (0.5); the summary only the latter (0.25).
    let web = &result.sources[0];
    assert_eq!(web.source_type, SourceType::Web);
    assert_eq!(web.content, WEB_SNIPPET);
    // Both variants return the same page; the raw variant's copy survives dedup.
    assert_eq!(web.title, "Web Source (tell me about photosynthesis)");
    assert!(web.url.is_none());
    assert!((web.relevance_score - 0.5).abs() < 1e-9);

    let wiki = &result.sources[1];
    assert_eq!(wiki.source_type, SourceType::Encyclopedia);
    assert_eq!(wiki.title, "Photosynthesis");
    assert_eq!(
        wiki.url.as_deref(),
        Some(format!("{}/wiki/Photosynthesis", server.uri()).as_str())
    );
    assert!((wiki.relevance_score - 0.25).abs() < 1e-9);

    assert_eq!(
        result.reports,
        vec![
            ProviderReport {
                source: SourceType::Encyclopedia,
                outcome: ProviderOutcome::Completed { count: 1 },
            },
            ProviderReport {
                source: SourceType::Web,
                outcome: ProviderOutcome::Completed { count: 1 },
            },
        ]
    );
}

#[tokio::test]
async fn blocked_web_search_degrades_to_encyclopedia_only_evidence() {
    init_tracing();
    let server = MockServer::start().await;

    mount_titles(&server, &["Photosynthesis"]).await;
    mount_summary(
        &server,
        "Photosynthesis",
        json!({"title": "Photosynthesis", "extract": PHOTOSYNTHESIS_SUMMARY}),
    )
    .await;
    mount_search_page(&server, 429, &[WEB_SNIPPET]).await;

    let researcher = Researcher::new(config_for(&server)).expect("researcher");
    let result = researcher.research("what is photosynthesis").await;

    assert_eq!(result.decision, SearchDecision::Both);
    assert_eq!(result.sources.len(), 1);
    assert_eq!(result.sources[0].source_type, SourceType::Encyclopedia);
    assert_eq!(
        result.reports[1],
        ProviderReport {
            source: SourceType::Web,
            outcome: ProviderOutcome::Completed { count: 0 },
        }
    );
}

#[tokio::test]
async fn every_source_failing_yields_empty_evidence() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let researcher = Researcher::new(config_for(&server)).expect("researcher");
    let result = researcher.research("explain plate tectonics").await;

    assert_eq!(result.decision, SearchDecision::Both);
    assert!(result.sources.is_empty());
    assert!(result.context_passages(3).is_empty());
}

#[tokio::test]
async fn evidence_set_capped_at_five() {
    init_tracing();
    let server = MockServer::start().await;

    let titles: Vec<String> = (0..6).map(|i| format!("Photosynthesis {i}")).collect();
    let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    mount_titles(&server, &title_refs).await;
    for title in &titles {
        mount_summary(
            &server,
            title,
            json!({"title": title, "extract": PHOTOSYNTHESIS_SUMMARY}),
        )
        .await;
    }

    let snippets: Vec<String> = (0..6)
        .map(|i| format!("Snippet {i}. {WEB_SNIPPET}"))
        .collect();
    let snippet_refs: Vec<&str> = snippets.iter().map(String::as_str).collect();
    mount_search_page(&server, 200, &snippet_refs).await;

    let researcher = Researcher::new(config_for(&server)).expect("researcher");
    let result = researcher.research("compare photosynthesis pathways").await;

    assert_eq!(result.decision, SearchDecision::Both);
    assert_eq!(result.sources.len(), 5);
    for pair in result.sources.windows(2) {
        assert!(pair[0].relevance_score >= pair[1].relevance_score);
    }
    for report in &result.reports {
        assert_eq!(report.outcome, ProviderOutcome::Completed { count: 3 });
    }
}

#[tokio::test]
async fn encyclopedia_only_query_never_hits_web_search() {
    init_tracing();
    let server = MockServer::start().await;

    mount_titles(&server, &["Photosynthesis"]).await;
    mount_summary(
        &server,
        "Photosynthesis",
        json!({"title": "Photosynthesis", "extract": PHOTOSYNTHESIS_SUMMARY}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let researcher = Researcher::new(config_for(&server)).expect("researcher");
    let result = researcher.research("Photosynthesis in plants").await;

    assert_eq!(result.decision, SearchDecision::EncyclopediaOnly);
    assert_eq!(result.sources.len(), 1);
    assert_eq!(
        result.context_passages(3),
        vec![format!("Source 1 [encyclopedia]: {PHOTOSYNTHESIS_SUMMARY}")]
    );
}

#[tokio::test]
async fn greeting_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let researcher = Researcher::new(config_for(&server)).expect("researcher");
    let result = researcher.research("good evening").await;

    assert_eq!(result.decision, SearchDecision::NoSearch);
    assert!(result.sources.is_empty());
}
