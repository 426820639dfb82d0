//! Session configuration
//!
//! This example shows the configuration presets and how to point a session at
//! self-hosted services. Nothing here touches the network.

use std::time::Duration;

use map_explorer::{Coordinate, ExplorerConfig, ExplorerConfigBuilder, OrderingPolicy};

fn main() -> anyhow::Result<()> {
    // Recommended defaults: newest request wins, clicks resolve entities
    let recommended = ExplorerConfig::default();
    describe("Default", &recommended);

    // Legacy behavior, including its response races
    let legacy = ExplorerConfigBuilder::legacy().build();
    describe("Legacy", &legacy);

    // Self-hosted geocoder with finer borders and a wider entity search
    let custom = ExplorerConfigBuilder::new()
        .geocoding_base("http://localhost:8088")
        .border_detail(10, 0.0005)?
        .geosearch(2500, 3)?
        .fallback_center(Some(Coordinate::BERLIN_FALLBACK))
        .ordering(OrderingPolicy::LastRequestWins)
        .initial_zoom(8)
        .user_agent("map-explorer-demo/0.1")
        .timeout(Duration::from_secs(5))
        .build();
    describe("Custom", &custom);

    // Invalid values are rejected up front
    if let Err(err) = ExplorerConfigBuilder::new().border_detail(25, 0.001) {
        println!("Rejected: {err}");
    }

    Ok(())
}

fn describe(name: &str, config: &ExplorerConfig) {
    println!("{name}:");
    println!("  geocoder:        {}", config.sources.geocoding_base);
    println!("  ordering:        {:?}", config.ordering);
    println!("  enrich on click: {}", config.enrich_on_click);
    println!(
        "  border zoom:     {} (threshold {})",
        config.sources.border.zoom, config.sources.border.polygon_threshold
    );
    println!(
        "  geosearch:       {} m, {} hit(s)",
        config.sources.geosearch.radius, config.sources.geosearch.limit
    );
    match config.fallback_center {
        Some(center) => println!("  fallback:        {center}\n"),
        None => println!("  fallback:        none\n"),
    }
}
