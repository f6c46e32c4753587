pub mod cli;
pub mod intake;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod schema;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result, bail};
use clap::Parser;
use itertools::Itertools;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands, InspectArgs, OutputFormat, SchemaArgs, ValidateArgs},
    intake::RawFile,
    schema::Schema,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("niaga_ingest", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Validate(args) => handle_validate(&args),
        Commands::Inspect(args) => handle_inspect(&args),
        Commands::Schema(args) => handle_schema(&args),
    }
}

fn handle_validate(args: &ValidateArgs) -> Result<()> {
    let schema = resolve_schema(args)?;
    let file = RawFile::read(&args.input)?;
    info!(
        "Validating '{}' ({} byte(s)) against {} column rule(s)",
        args.input.display(),
        file.len(),
        schema.columns.len()
    );
    let result = pipeline::validate(&file, &schema);
    match args.format {
        OutputFormat::Text => print!("{}", report::render_text(&result)),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&result).context("Serializing report JSON")?
            );
        }
    }
    if !result.is_valid {
        bail!(
            "{} validation error(s) in {:?}",
            result.errors.len(),
            args.input
        );
    }
    info!(
        "✓ {:?} passed with {} warning(s)",
        args.input,
        result.warnings.len()
    );
    Ok(())
}

fn resolve_schema(args: &ValidateArgs) -> Result<Schema> {
    let mut schema = match &args.schema {
        Some(path) => {
            Schema::load(path).with_context(|| format!("Loading schema from {path:?}"))?
        }
        None => Schema::transactions(),
    };
    if let Some(policy) = args.region_policy {
        schema.set_region_policy(policy.into());
    }
    if args.reject_duplicates {
        schema.set_reject_duplicates(true);
    }
    Ok(schema)
}

fn handle_inspect(args: &InspectArgs) -> Result<()> {
    let file = RawFile::read(&args.input)?;
    intake::check_file(&file)
        .with_context(|| format!("Inspecting {:?}", args.input))?;
    let text = intake::decode_text(&file)
        .with_context(|| format!("Decoding {:?}", args.input))?;

    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let Some(first_line) = lines.next() else {
        bail!("{:?} has no content lines", args.input);
    };
    let delimiter = table::infer_delimiter(first_line);
    let header = table::tokenize_line(first_line, delimiter);
    let data_rows = lines.count();

    info!("Delimiter: '{delimiter}'");
    info!("Columns ({}): {}", header.len(), header.iter().join(", "));
    info!("Data rows: {data_rows}");
    Ok(())
}

fn handle_schema(args: &SchemaArgs) -> Result<()> {
    let schema = Schema::transactions();
    schema
        .save(&args.output)
        .with_context(|| format!("Writing schema to {:?}", args.output))?;
    info!(
        "Default transaction schema with {} column(s) written to {:?}",
        schema.columns.len(),
        args.output
    );
    Ok(())
}
