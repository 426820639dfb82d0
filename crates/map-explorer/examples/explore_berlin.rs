//! A live session against the public services
//!
//! This example walks through what a user of the map page does:
//! - Seeding the map from the caller's IP
//! - Searching for a place and picking the first hit
//! - Reading the border overlay and the info panel
//! - Clicking somewhere else on the map
//!
//! Set `GEOCODING_API` to use a self-hosted Nominatim instead of the public one.

use map_explorer::{Coordinate, Explorer, ExplorerConfigBuilder, Flavor, MapView};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    map_explorer::init_logging(tracing::Level::INFO)?;

    let config = ExplorerConfigBuilder::from_env()
        .fallback_center(Some(Coordinate::BERLIN_FALLBACK))
        .build();
    let explorer = Explorer::new(config)?;

    match explorer.bootstrap().await {
        Some(seed) => println!("Map seeded at {seed}"),
        None => println!("Map left unseeded"),
    }

    println!("\nSearching for 'Berlin':");
    let candidates = explorer.search(Some("Berlin")).await;
    for (i, candidate) in candidates.iter().take(5).enumerate() {
        println!("  {}. {} ({})", i + 1, candidate.display_name, candidate.coordinate());
    }

    if explorer.select_nth(0).await == Some(true) {
        print_view(&explorer.view());
    } else {
        println!("No entity found near the first hit");
    }

    println!("\nClicking on Paris:");
    explorer.click(Coordinate::new(48.8566, 2.3522)).await;
    print_view(&explorer.view());

    explorer.close_panel();
    Ok(())
}

fn print_view(view: &MapView) {
    for flavor in [Flavor::Clicked, Flavor::Selected] {
        if let Some(overlay) = view.overlay(flavor) {
            println!(
                "  {flavor} border: {} ({} features)",
                overlay.geometry.display_name().unwrap_or("unnamed"),
                overlay.geometry.feature_count()
            );
        }
    }
    if let Some(facts) = view.panel.facts() {
        println!("\n{facts}");
    }
}
