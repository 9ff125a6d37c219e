use cfnres_core::ResponseStatus;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cfnres")]
#[command(about = "Drive CloudFormation custom resource requests through the lifecycle controller")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (overrides CFNRES_CONFIG env var)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log stream name reported to CloudFormation
    #[arg(long, global = true)]
    pub log_stream: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an event through the controller against the configured REST resource
    Process(ProcessArgs),
    /// Send a status report for an event without touching any resource
    Signal(SignalArgs),
    /// Print the response document a signal would send
    Render(SignalArgs),
}

#[derive(clap::Args)]
pub struct ProcessArgs {
    /// Event JSON file, or "-" for stdin
    #[arg(short, long, default_value = "-")]
    pub event: String,
}

#[derive(clap::Args)]
pub struct SignalArgs {
    /// Event JSON file, or "-" for stdin
    #[arg(short, long, default_value = "-")]
    pub event: String,
    /// Status to report (SUCCESS or FAILED)
    #[arg(short, long)]
    pub status: ResponseStatus,
    /// Reason text; defaults to a pointer at the log stream
    #[arg(short, long)]
    pub reason: Option<String>,
    /// Physical resource id to report
    #[arg(long)]
    pub physical_id: Option<String>,
}
