use advanta::interfaces::http;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let bind_addr =
        std::env::var("ADVANTA_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:3001".to_string());

    tracing::info!(%bind_addr, "Starting Advanta server");

    http::start_server(&bind_addr)?.await
}
