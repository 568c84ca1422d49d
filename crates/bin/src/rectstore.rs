//! Rectstore - demo driver for the layered point-location index.

mod config;
mod generator;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rectstore::RectangleStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Rectstore v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = config::Config::load("config.toml")?;
    info!("Loaded configuration");
    info!("  Bounds: {}", config.bounds);
    info!("  Random rectangles: {}", config.generator.count);
    info!("  Fixed rectangles: {}", config.rectangles.len());
    info!("  Capacity: {}, min size: {}", config.tree.capacity, config.tree.min_size);

    let mut rng = match config.generator.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut rectangles = generator::random_rectangles(&mut rng, &config.bounds, config.generator.count);
    rectangles.extend(config.rectangles.iter().cloned());

    let mut store = RectangleStore::with_config(config.tree);
    store.initialize(config.bounds.clone(), rectangles)?;

    for &[x, y] in &config.queries {
        match store.find_rectangle_at(x, y)? {
            Some(hit) => println!("Point ({x}, {y}) -> {} (rank {})", hit.rectangle(), hit.rank()),
            None => println!("Point ({x}, {y}) -> None"),
        }
    }

    Ok(())
}
