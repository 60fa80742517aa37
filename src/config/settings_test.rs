// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;

#[test]
fn test_default_settings() {
    let settings = Settings::defaults().expect("defaults should deserialize");

    assert_eq!(settings.crawler.domain_file, "input/domains.txt");
    assert_eq!(settings.crawler.output_file, "output/product_urls.json");
    assert_eq!(settings.crawler.patterns_file, "url_patterns.json");
    assert_eq!(settings.crawler.max_concurrent_crawls, 0);
    assert!(!settings.crawler.seed_known_patterns);

    assert_eq!(settings.fetch.transport, TransportKind::Direct);
    assert!(settings.fetch.use_dynamic_fallback);
    assert_eq!(settings.fetch.static_timeout(), Duration::from_secs(30));
    assert_eq!(settings.fetch.dynamic_timeout(), Duration::from_secs(60));
    assert_eq!(settings.fetch.header_candidates, 2);
    assert!(settings.fetch.remote_browser_url.is_none());

    // Missing credentials are not an error
    assert!(settings.scrapeops.api_key.is_none());
    assert!(settings.scrapingant.api_key.is_none());
}

#[test]
fn test_environment_overrides() {
    std::env::set_var("PRODCRAWL__CRAWLER__MAX_CONCURRENT_CRAWLS", "4");
    std::env::set_var("PRODCRAWL__FETCH__TRANSPORT", "scrapingant");

    let settings = Settings::new();

    std::env::remove_var("PRODCRAWL__CRAWLER__MAX_CONCURRENT_CRAWLS");
    std::env::remove_var("PRODCRAWL__FETCH__TRANSPORT");

    let settings = settings.expect("environment overrides should deserialize");
    assert_eq!(settings.crawler.max_concurrent_crawls, 4);
    assert_eq!(settings.fetch.transport, TransportKind::Scrapingant);
}
