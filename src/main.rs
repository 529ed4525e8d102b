use anyhow::Result;
use famtree::web::WebServer;
use famtree::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger from environment variable or default to info level
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("chat");

    match command {
        "serve" => {
            // Web front end
            run_web_server().await?;
        }
        // "chat" and anything else: interactive CLI loop
        _ => {
            run_cli().await?;
        }
    }

    Ok(())
}

/// Run the web front end
async fn run_web_server() -> Result<()> {
    log::info!("Starting Famtree web server v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    log::info!("Family tree file: {}", config.store_path().display());

    let server = WebServer::new(config);
    server.run().await?;

    Ok(())
}

/// Run the interactive CLI loop
async fn run_cli() -> Result<()> {
    let config = Config::load()?;
    log::debug!("Family tree file: {}", config.store_path().display());

    famtree::cli::run(&config).await?;

    Ok(())
}
