use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use a2ui_server::http;
use a2ui_server::service::AppState;

#[derive(Debug, Parser)]
#[command(name = "a2ui-server")]
struct Args {
    #[arg(long, env = "A2UI_HTTP_ADDR", default_value = "127.0.0.1:8080")]
    http_addr: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Composition root: one store and one registry for the whole process.
    let state = AppState::new();
    let app = http::router(state);

    let listener = tokio::net::TcpListener::bind(&args.http_addr)
        .await
        .expect("failed to bind http listener");

    info!(addr = %args.http_addr, "a2ui server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .expect("http server crashed");
}
