use moneta_server::config::Config;
use moneta_server::{api, build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env();
    let listen_addr = config.listen_addr;

    let state = build_state(&config).await?;
    let app = api::app_router(state, &config);

    tracing::info!(%listen_addr, "starting moneta-server");
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
