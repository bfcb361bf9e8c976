//! AskOmics CLI - Upload local files and integrate them into an AskOmics triplestore

mod commands;
mod logging;

use anyhow::{Context, Result};
use askomics_core::domain::{IntegrationKind, ServerEndpoint};
use askomics_infra_http::ReqwestTransport;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "askocli")]
#[command(about = "Integrate CSV, GFF and TTL files into AskOmics", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub auth: AuthArgs,

    /// Request timeout in seconds (transport default when unset)
    #[arg(long, env = "ASKOMICS_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the AskOmics server lives
#[derive(Args)]
pub struct ServerArgs {
    /// AskOmics URL
    #[arg(short = 'a', long = "askomics", env = "ASKOMICS_URL")]
    pub url: String,

    /// AskOmics port
    #[arg(short, long, env = "ASKOMICS_PORT")]
    pub port: Option<u16>,
}

#[derive(Args)]
pub struct AuthArgs {
    /// An API key associated with your account
    #[arg(short = 'k', long, env = "ASKOMICS_API_KEY", hide_env_values = true)]
    pub apikey: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Integrate a CSV/TSV file
    Csv(CsvArgs),

    /// Integrate a GFF file
    Gff(GffArgs),

    /// Integrate a Turtle (TTL) file
    Ttl(TtlArgs),
}

impl Commands {
    pub fn kind(&self) -> IntegrationKind {
        match self {
            Commands::Csv(_) => IntegrationKind::Csv,
            Commands::Gff(_) => IntegrationKind::Gff,
            Commands::Ttl(_) => IntegrationKind::Ttl,
        }
    }

    pub fn dataset(&self) -> &DatasetArgs {
        match self {
            Commands::Csv(args) => &args.dataset,
            Commands::Gff(args) => &args.dataset,
            Commands::Ttl(args) => &args.dataset,
        }
    }
}

/// Options shared by every integration
#[derive(Args)]
pub struct DatasetArgs {
    /// File to upload and integrate
    pub file: PathBuf,

    /// Dataset type sent as forced_type (default: the subcommand name)
    #[arg(short = 't', long)]
    pub forced_type: Option<String>,

    /// Make the dataset public
    #[arg(long)]
    pub public: bool,
}

#[derive(Args)]
pub struct CsvArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Key column indices, comma separated (default: 0)
    #[arg(long, value_delimiter = ',')]
    pub key_columns: Vec<String>,

    /// Column indices to leave out, comma separated
    #[arg(long, value_delimiter = ',')]
    pub disabled_columns: Vec<String>,

    /// Column types, comma separated; guessed by the server when omitted
    #[arg(long, value_delimiter = ',')]
    pub col_types: Vec<String>,
}

#[derive(Args)]
pub struct GffArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Taxon of the annotated organism
    #[arg(long)]
    pub taxon: String,

    /// Entities to integrate, comma separated (e.g. gene,mRNA)
    #[arg(long, value_delimiter = ',')]
    pub entities: Vec<String>,
}

#[derive(Args)]
pub struct TtlArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init()?;

    let endpoint =
        ServerEndpoint::new(&cli.server.url, cli.server.port).context("Invalid AskOmics URL")?;

    let mut builder = ReqwestTransport::builder(endpoint);
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let transport = builder.build().context("Failed to create HTTP client")?;

    info!(server = %transport.endpoint(), kind = %cli.command.kind(), "Connecting to AskOmics");

    let report = commands::run(transport, &cli.auth.apikey, &cli.command)?;

    eprintln!(
        "{}",
        format!("✓ {} integration submitted", cli.command.kind())
            .green()
            .bold()
    );
    println!("{}", commands::render_report(&report));

    Ok(())
}
