use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use whatif_client::{
    config,
    scenario::{DEFAULT_HISTORY_LIMIT, Scenario, ScenarioClient, validate_question},
};

#[derive(Parser)]
#[command(name = "whatif", version, about = "Ask \"what if\" and get a scenario back")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a scenario for a question
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show recent scenarios for this session
    History {
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
        #[arg(long)]
        json: bool,
    },
    /// Print the session identity
    Session,
    /// Check that the scenario source is reachable
    Health,
}

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

/// RUST_LOG directives win over the configured level when they parse
fn log_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

fn render(scenario: &Scenario) {
    println!("{} {}", scenario.mood.emoji(), scenario.mood);
    println!();
    println!("{}", scenario.share_text());
    println!();
    println!("{}", scenario.timestamp);
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => fail(&format!("Failed to load configuration: {}", e)),
    };

    // Only the configured level is checked; RUST_LOG may hold full directives
    let log_level = config.logs.level.clone();
    if let Err(e) = validate_log_level(&log_level) {
        fail(&e.to_string());
    }

    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), &log_level))
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Starting whatif client with configured log level: {}", log_level);

    let client = ScenarioClient::from_config(&config)?;

    match cli.command {
        Command::Ask { question, json } => {
            let question =
                validate_question(&question.join(" ")).unwrap_or_else(|e| fail(&e.message));
            let scenario = client
                .generate(&question)
                .await
                .unwrap_or_else(|e| fail(&e.message));

            if json {
                println!("{}", serde_json::to_string_pretty(&scenario)?);
            } else {
                render(&scenario);
            }
        }
        Command::History { limit, json } => {
            let scenarios = client.history(limit).await.unwrap_or_else(|e| fail(&e.message));

            if json {
                println!("{}", serde_json::to_string_pretty(&scenarios)?);
            } else if scenarios.is_empty() {
                println!("No scenarios yet.");
            } else {
                for scenario in &scenarios {
                    render(scenario);
                    println!("---");
                }
            }
        }
        Command::Session => println!("{}", client.session_id()),
        Command::Health => {
            let message = client.health().await.unwrap_or_else(|e| fail(&e.message));
            println!("[{}] {}", client.source_name(), message);
        }
    }

    Ok(())
}
