use anyhow::{Context, Result};
use clap::Parser;
use geogrid_cli::cli::{Cli, Commands};
use geogrid_cli::{convert_csv_file, convert_inline, logging, AppConfig, CsvJob};
use geogrid_core::NorthAxis;
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    }
    .with_overrides(cli.meters_per_unit, cli.north.map(NorthAxis::from));
    config.validate().context("Invalid settings")?;

    let converter = config.converter();
    let base = config.base_point;
    debug!(?converter, ?base, "Settings");

    match cli.command {
        Commands::Var(args) => {
            let converted = convert_inline(args.direction, &args.values, &converter, &base)?;
            println!("{}", serde_json::to_string(&converted)?);
        }
        Commands::Csv(args) => {
            let job = CsvJob::from_args(&args);
            let summary = convert_csv_file(&args.input, &args.output, &job, &converter, &base)
                .with_context(|| format!("Failed to convert {}", args.input.display()))?;
            info!(
                rows = summary.rows,
                converted = summary.converted,
                skipped = summary.skipped,
                output = %args.output.display(),
                "CSV conversion finished"
            );
        }
    }

    Ok(())
}
