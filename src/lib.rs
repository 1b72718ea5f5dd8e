pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, commands};
pub use config::Config;

/// Runs the CLI with a config the caller loaded before starting the runtime.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&config);

    match Config::source_path() {
        Some(path) => tracing::info!("Loaded config from: {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::cmd_serve(config).await,
        Commands::Migrate => commands::cmd_migrate(&config).await,
        Commands::Init => commands::cmd_init(),
        Commands::CreateAdmin {
            email,
            name,
            password,
        } => commands::cmd_create_admin(config, &email, &name, &password).await,
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
