use std::sync::Arc;

use rolegate_api::Config;
use rolegate_auth::RoleRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rolegate_observability::init();

    let config = Config::from_env()?;

    let registry = Arc::new(RoleRegistry::build(&config.roles));
    if registry.is_empty() {
        tracing::warn!("ROLEGATE_ROLES not set; every guarded route will deny");
    }

    let app = rolegate_api::app::build_app(registry, config.deny);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
