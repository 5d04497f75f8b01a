use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gitlease::aggregator::{OutputFormat, ReleaseNotesGenerator, ReleaseNotesRequest};
use gitlease::config::Config;
use gitlease::github::{self, GitHubClient};

#[derive(Parser)]
#[command(name = "gitlease")]
#[command(about = "Generate release notes for a public GitHub repository")]
struct Cli {
    /// GitHub token (can also be set via GITHUB_TOKEN env var)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub REST API root, for GitHub Enterprise
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate release notes for a date range
    Generate {
        /// Repository as owner/name
        #[arg(short, long)]
        repo: String,

        /// Start of the period (YYYY-MM-DD or RFC 3339)
        #[arg(short, long)]
        start: Option<String>,

        /// End of the period (YYYY-MM-DD or RFC 3339)
        #[arg(short, long)]
        end: Option<String>,

        /// Output format: markdown or plaintext
        #[arg(short = 'f', long)]
        format: Option<OutputFormat>,

        /// Output file path (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report whether a token is configured and the remaining API quota
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?.with_overrides(cli.token, cli.api_url);
    let github_client = GitHubClient::new(&config.github)?;

    match cli.command {
        Commands::Generate {
            repo,
            start,
            end,
            format,
            output,
        } => {
            let request = ReleaseNotesRequest {
                repo,
                start_date: start,
                end_date: end,
                format: format.unwrap_or(config.output.format),
            };

            let generator = ReleaseNotesGenerator::new(github_client);
            let content = match generator.generate(&request).await {
                Ok(content) => content,
                Err(err) if err.is_private_repository() => {
                    eprintln!("🔒 {}", err);
                    std::process::exit(2);
                }
                Err(err) => return Err(err.into()),
            };

            if let Some(output_path) = output {
                std::fs::write(output_path, content)?;
                println!("Release notes written successfully!");
            } else {
                println!("{}", content);
            }
        }
        Commands::Status => {
            let report = github::check_status(&github_client).await;
            println!("{}", serde_json::to_string_pretty(&report)?);

            if report.http_status() == 500 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
