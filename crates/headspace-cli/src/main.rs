use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "headspace")]
#[command(about = "Headspace CLI - client for the coding-agent monitoring dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown file to sanitized HTML on stdout
    Render {
        /// Markdown file to render
        file: String,
        /// Derive slug ids for headers
        #[arg(long)]
        header_ids: bool,
        /// Wrap fenced code blocks with a copy action
        #[arg(long)]
        copy_buttons: bool,
    },
    /// Check whether a link target is safe to render as an anchor
    CheckUrl {
        /// Candidate URL
        url: String,
    },
    /// Gap-fill hourly history buckets, optionally rolled up by day
    History {
        /// JSON file of hourly buckets, or `-` for stdin
        file: String,
        /// Aggregate by local calendar day
        #[arg(long)]
        daily: bool,
    },
    /// Forward text to an agent's control socket
    Respond {
        /// Agent identifier
        agent_id: String,
        /// Text to forward
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            file,
            header_ids,
            copy_buttons,
        } => commands::render::run(&file, header_ids, copy_buttons)?,
        Commands::CheckUrl { url } => {
            if !commands::check_url::run(&url) {
                std::process::exit(1);
            }
        }
        Commands::History { file, daily } => commands::history::run(&file, daily)?,
        Commands::Respond { agent_id, text } => {
            if !commands::respond::run(&agent_id, &text).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
