use anyhow::Result;
use tracing_subscriber::EnvFilter;

use tripplanner::PlannerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = PlannerConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tripplanner::web::run(config).await
}
