use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quick_actions::actions::ActionRegistry;
use quick_actions::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // This binary ships no quick actions. A binary that does registers them
    // here with `registry.register(name, action)?`, so a bad registration
    // exits non-zero before anything binds.
    let registry = ActionRegistry::new();

    quick_actions::server::serve(&config, registry).await
}
