mod build;
mod config;
mod errors;
mod loaders;
mod models;
mod render;
mod schema;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use build::NetworkBuilder;
use config::Config;
use render::TeraEngine;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "netforge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::load();
    tracing::info!("Starting NetForge");
    tracing::info!("Topology: {}", cfg.topology_path);
    tracing::info!("Templates Dir: {}", cfg.templates_dir);
    tracing::info!("Render Strategy: {:?}", cfg.render_strategy);

    // Load inputs from their external sources
    let communities = loaders::load_communities(&cfg.communities_path)?;
    let secrets = loaders::load_secrets(&cfg.secrets_path)?;
    let network = loaders::load_topology(&cfg.topology_path)?;
    tracing::info!("Loaded {} devices", network.devices.len());

    // Build: enrich, persist schemas, render configs
    let engine = TeraEngine::load(&cfg.templates_dir)?;
    let builder = NetworkBuilder::new(&cfg, engine);
    let rendered = builder.run(network, &communities, &secrets)?;

    tracing::info!("Rendered {} device configurations", rendered.len());
    Ok(())
}
