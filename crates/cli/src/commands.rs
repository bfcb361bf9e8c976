//! Integration flows: login, upload, configure, integrate

use crate::{Commands, CsvArgs, DatasetArgs};
use anyhow::{Context, Result};
use askomics_core::domain::IntegrationKind;
use askomics_core::port::HttpTransport;
use askomics_core::Session;
use tracing::info;

/// Run one integration end to end and return the server's report
pub fn run<T: HttpTransport>(transport: T, api_key: &str, command: &Commands) -> Result<String> {
    let dataset = command.dataset();
    let mut session = Session::new(transport, api_key, forced_type(dataset, command.kind()));
    session.set_visibility(dataset.public);

    session.authenticate()?;
    session
        .upload_file(&dataset.file)
        .with_context(|| format!("Could not upload {}", dataset.file.display()))?;

    let report = match command {
        Commands::Csv(args) => integrate_csv(&mut session, args)?,
        Commands::Gff(args) => session.integrate_gff(&args.taxon, &args.entities)?,
        Commands::Ttl(_) => session.integrate_ttl()?,
    };

    Ok(report)
}

fn integrate_csv<T: HttpTransport>(session: &mut Session<T>, args: &CsvArgs) -> Result<String> {
    if !args.key_columns.is_empty() {
        session
            .set_key_columns(&args.key_columns)
            .context("Invalid --key-columns")?;
    }
    if !args.disabled_columns.is_empty() {
        session
            .set_disabled_columns(&args.disabled_columns)
            .context("Invalid --disabled-columns")?;
    }

    if args.col_types.is_empty() {
        let types = session.guess_column_types()?;
        info!(types = ?types.as_slice(), "Using guessed column types");
    } else {
        session.force_column_types(&args.col_types);
    }

    Ok(session.integrate_csv()?)
}

fn forced_type(dataset: &DatasetArgs, kind: IntegrationKind) -> String {
    dataset
        .forced_type
        .clone()
        .unwrap_or_else(|| kind.to_string().to_lowercase())
}

/// Pretty-print JSON reports, pass anything else through
pub fn render_report(report: &str) -> String {
    serde_json::from_str::<serde_json::Value>(report)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| report.trim_end().to_string())
}
