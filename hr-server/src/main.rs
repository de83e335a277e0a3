use hr_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv is optional; real env vars win)
    dotenv::dotenv().ok();

    // 2. Load configuration and set up logging
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), None);

    tracing::info!("HR server starting...");

    // 3. Initialize server state (store, schema, services)
    let state = ServerState::initialize(&config).await;

    // 4. Run the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
