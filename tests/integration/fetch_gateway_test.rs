// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use prodcrawl::config::settings::Settings;
use prodcrawl::engines::headers::{fallback_headers, StaticHeaderSource};
use prodcrawl::engines::reqwest_engine::ReqwestEngine;
use prodcrawl::engines::router::{FetchGateway, PageFetcher};
use std::sync::Arc;
use wiremock::matchers::{headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn static_only_gateway() -> FetchGateway {
    let settings = Settings::defaults().unwrap();
    FetchGateway::new(
        Arc::new(ReqwestEngine),
        None,
        Arc::new(StaticHeaderSource),
        &settings.fetch,
    )
}

#[tokio::test]
async fn test_gateway_fetches_with_browser_headers() {
    let server = MockServer::start().await;
    // wiremock splits header values at commas, and the user agent contains one
    let user_agent = fallback_headers()["User-Agent"].clone();
    let parts: Vec<&str> = user_agent.split(',').map(str::trim).collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .and(headers("user-agent", parts))
        .respond_with(ResponseTemplate::new(200).set_body_string("<a href='/p/1'>x</a>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = static_only_gateway()
        .fetch(&format!("{}/", server.uri()))
        .await;

    assert_eq!(body.as_deref(), Some("<a href='/p/1'>x</a>"));
}

#[tokio::test]
async fn test_gateway_returns_none_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("blocked"))
        .mount(&server)
        .await;

    assert!(static_only_gateway().fetch(&server.uri()).await.is_none());
}
