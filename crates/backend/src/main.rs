pub mod handlers;
pub mod routes;
pub mod shared;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    shared::logging::init_tracing()?;

    let config = shared::config::load_config()?;
    let port = config.server.port;
    tracing::info!(
        "admin API: {} ({:?}, proxy: {})",
        config.admin_api.base_url,
        config.admin_api.flavor,
        config.admin_api.proxy
    );

    let app = routes::build_router(routes::AppState::new(config)?);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            tracing::error!("Port {} is already in use", port);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Serving on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
