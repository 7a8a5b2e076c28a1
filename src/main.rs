//! hateoas-agent - HATEOAS REST API agent
//!
//! Main entry point for the CLI application.

use clap::Parser;
use hateoas_agent::{Agent, Config};
use tracing_subscriber::EnvFilter;

/// Navigate a HATEOAS API with an LLM planner
#[derive(Parser, Debug)]
#[command(name = "hateoas-agent")]
#[command(about, long_about = None)]
struct Args {
    /// The prompt for the agent
    #[arg(long, short = 'p')]
    prompt: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load()?;

    // RUST_LOG wins over the configured filter; logs go to stderr so stdout
    // carries only the final answer
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let agent = Agent::with_config(config)?;
    agent.initialize().await?;

    let answer = agent.run(args.prompt.as_deref()).await?;
    println!("{}", answer);

    Ok(())
}
