use inquiry_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, store, routes)
    let (_state, router) = inquiry_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    inquiry_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
