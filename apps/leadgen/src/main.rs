use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use leadgen::client::BioClient;
use leadgen::config::Config;
use leadgen::csv::DOWNLOAD_FILE_NAME;
use leadgen::flow::{BatchFlow, FlowState, SingleLeadFlow};

/// Generate lead bios via the remote bio-generation service.
#[derive(Debug, Parser)]
#[command(name = "leadgen", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a bio for one lead.
    Single {
        /// Free-text lead name; split on the first space into first/last.
        lead_name: String,
        /// Free-text context to guide generation (becomes the company field).
        #[arg(long, default_value = "")]
        info: String,
    },
    /// Upload a CSV of leads and download the generated results.
    Batch {
        /// The CSV file of leads to submit.
        file: Option<PathBuf>,
        /// Where to write the results.
        #[arg(long, default_value = DOWNLOAD_FILE_NAME)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let client = BioClient::new(config.service_url.clone());
    info!("bio client ready (service: {})", config.service_url);

    let code = match cli.command {
        Command::Single { lead_name, info } => {
            let mut flow = SingleLeadFlow::new();
            flow.submit(&client, &lead_name, &info).await;
            render_single(&flow.state)
        }
        Command::Batch { file, output } => {
            let mut flow = BatchFlow::new();
            flow.submit(&client, file.as_deref(), &output).await;
            render_batch(&flow.state)
        }
    };

    Ok(code)
}

fn render_single(state: &FlowState<leadgen::models::GeneratedLead>) -> ExitCode {
    match state {
        FlowState::Success(lead) => {
            println!("{}", lead.bio);
            println!("Email: {}", lead.email);
            if let Some(phone) = &lead.phone {
                println!("Phone: {phone}");
            }
            ExitCode::SUCCESS
        }
        FlowState::Failed(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        // The CLI submits exactly once, so the flow always settles.
        FlowState::Idle | FlowState::Submitting => ExitCode::SUCCESS,
    }
}

fn render_batch(state: &FlowState<leadgen::flow::BatchOutcome>) -> ExitCode {
    match state {
        FlowState::Success(outcome) => {
            println!(
                "Wrote {} result(s) to {}",
                outcome.rows,
                outcome.output_path.display()
            );
            ExitCode::SUCCESS
        }
        FlowState::Failed(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        FlowState::Idle | FlowState::Submitting => ExitCode::SUCCESS,
    }
}
