use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use topflow::application::flow::FlowEngine;
use topflow::application::processing::Dwells;
use topflow::infrastructure::demo_auth::DemoCredentialVerifier;
use topflow::interfaces::script::{EventReader, TraceWriter, run_script};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input flow script (JSON array of events)
    script: PathBuf,

    /// Skip the simulated delays (login and processing dwells)
    #[arg(long)]
    no_delay: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut engine = if cli.no_delay {
        FlowEngine::with_timing(
            Box::new(DemoCredentialVerifier),
            Dwells::zero(),
            Duration::ZERO,
        )
    } else {
        FlowEngine::new(Box::new(DemoCredentialVerifier))
    };

    let file = File::open(cli.script).into_diagnostic()?;
    let events = EventReader::new(file).events().into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = TraceWriter::new(stdout.lock());
    run_script(&mut engine, events, &mut writer)
        .await
        .into_diagnostic()?;

    Ok(())
}
