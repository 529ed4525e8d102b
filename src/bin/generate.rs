//! Send a prompt to the local generation service and stream the reply to
//! stdout. Smoke test for the Ollama collaborator; independent of the family
//! tree store and extractor.

use famtree::ollama::OllamaClient;
use famtree::Config;
use std::io::Write;

/// Parse CLI args: all positional args joined form the prompt.
fn parse_prompt() -> anyhow::Result<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let prompt = args.join(" ");
    if prompt.trim().is_empty() {
        anyhow::bail!(
            "Usage: generate <prompt...>\nExample: generate \"Create a simple family tree in JSON.\""
        );
    }
    Ok(prompt)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    // Load configuration
    let config = Config::load()?;

    let prompt = parse_prompt()?;

    let client = OllamaClient::new(
        config.ollama.base_url.clone(),
        config.ollama.model.clone(),
        config.ollama.timeout_secs,
    );

    log::info!("Querying model {} ...", client.model());

    // Print fragments as they arrive
    client
        .generate(&prompt, |fragment| {
            print!("{}", fragment);
            let _ = std::io::stdout().flush();
        })
        .await?;
    println!();

    Ok(())
}
