use snaprelay_core::Config;

// Use mimalloc as the global allocator for better performance and lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    snaprelay_api::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Initialize the application (mail transport, state, routes)
    let (_state, router) = snaprelay_api::setup::initialize_app(config.clone())?;

    // Start the server
    snaprelay_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
