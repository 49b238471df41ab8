use waffle_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, log directory, logger)
    setup_environment()?;

    print_banner();

    tracing::info!("🧇 Waffle Server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. Server state (work dir, database, services, admin bootstrap)
    let state = ServerState::initialize(&config).await;

    // 4. Serve until Ctrl-C
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
