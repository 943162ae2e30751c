use clap::Parser;
use kanban::KanbanApp;
use kanban::cli::{Cli, commands};
use mimalloc::MiMalloc;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = &kanban::config::CONFIG.basic;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    debug!(
        api_url = %cfg.api_url,
        database_url = %cfg.database_url,
        proxy = %cfg.proxy.as_ref().map_or("<none>", url::Url::as_str),
        loglevel = %cfg.loglevel,
    );

    let app = KanbanApp::connect(cfg).await?;
    if let Err(e) = commands::run(cli, &app).await {
        error!(error = %e, "command failed");
        return Err(e);
    }
    Ok(())
}
