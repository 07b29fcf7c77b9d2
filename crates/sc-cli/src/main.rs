//! skycut CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod filter;
mod local;

use filter::{DEFAULT_AREA_LIMIT_DEG2, DEFAULT_MASS_FRACTION, FilterOptions};

#[derive(Parser)]
#[command(name = "skycut")]
#[command(about = "skycut - Credible-region sky-area filter for GW superevents")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter superevents by credible-region sky area
    Filter {
        /// Input file: one superevent ID per line (`#` comments allowed)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for retained IDs, one per line
        #[arg(short, long)]
        output: PathBuf,

        /// Keep events with credible area strictly below this, in deg^2
        #[arg(long, default_value_t = DEFAULT_AREA_LIMIT_DEG2)]
        area_limit: f64,

        /// Probability mass the credible region must contain
        #[arg(long, default_value_t = DEFAULT_MASS_FRACTION)]
        mass_fraction: f64,

        /// Sky-map file to download for each event
        #[arg(long, default_value = sc_gracedb::DEFAULT_SKYMAP_FILENAME)]
        skymap_file: String,

        /// GraceDB service URL
        #[arg(long, default_value = sc_gracedb::DEFAULT_BASE_URL)]
        service_url: String,

        /// Read maps from <DIR>/<id>.fits[.gz] instead of a service
        #[arg(long, conflicts_with = "service_url")]
        skymap_dir: Option<PathBuf>,

        /// Output file for the full per-event report (pretty JSON)
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Credible-region area of one local sky-map file
    Area {
        /// Input sky map (.fits or .fits.gz)
        #[arg(short, long)]
        input: PathBuf,

        /// Probability mass the credible region must contain
        #[arg(long, default_value_t = DEFAULT_MASS_FRACTION)]
        mass_fraction: f64,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Filter {
            input,
            output,
            area_limit,
            mass_fraction,
            skymap_file,
            service_url,
            skymap_dir,
            report,
        } => cmd_filter(
            &input,
            &output,
            FilterOptions { area_limit, mass_fraction },
            &skymap_file,
            &service_url,
            skymap_dir.as_ref(),
            report.as_ref(),
        ),
        Commands::Area { input, mass_fraction, output } => {
            cmd_area(&input, mass_fraction, output.as_ref())
        }
        Commands::Version => {
            println!("skycut {}", sc_core::VERSION);
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_filter(
    input: &PathBuf,
    output: &PathBuf,
    opts: FilterOptions,
    skymap_file: &str,
    service_url: &str,
    skymap_dir: Option<&PathBuf>,
    report: Option<&PathBuf>,
) -> Result<()> {
    opts.validate()?;
    let ids = read_id_list(input)
        .with_context(|| format!("reading ID list {}", input.display()))?;
    tracing::info!(events = ids.len(), "ID list loaded");

    let batch = match skymap_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "using local sky-map directory");
            let source = local::DirSkyMapSource::new(dir);
            filter::filter_events(&source, &ids, &opts)
        }
        None => {
            let client = sc_gracedb::GraceDbClient::new(service_url)?;
            let source = sc_gracedb::GraceDbSkyMapSource::with_filename(client, skymap_file);
            filter::filter_events(&source, &ids, &opts)
        }
    };

    write_id_list(output, &batch.kept_ids())
        .with_context(|| format!("writing retained IDs to {}", output.display()))?;
    if let Some(path) = report {
        write_json(Some(path), serde_json::to_value(&batch)?)
            .with_context(|| format!("writing report to {}", path.display()))?;
    }

    println!(
        "{} checked: {} kept, {} rejected, {} skipped",
        batch.events.len(),
        batch.n_kept(),
        batch.n_rejected(),
        batch.n_skipped()
    );
    Ok(())
}

fn cmd_area(input: &PathBuf, mass_fraction: f64, output: Option<&PathBuf>) -> Result<()> {
    tracing::info!(path = %input.display(), "reading sky map");
    let map = sc_fits::read_sky_map(input)
        .with_context(|| format!("reading sky map {}", input.display()))?;
    let area = sc_healpix::credible_area_deg2(&map.prob, map.nside, mass_fraction)?;
    tracing::info!(nside = map.nside, area_deg2 = area, "area computed");

    let output_json = serde_json::json!({
        "input": input.display().to_string(),
        "nside": map.nside,
        "ordering": map.ordering.as_str(),
        "npix": map.npix(),
        "mass_fraction": mass_fraction,
        "area_deg2": area,
    });

    write_json(output, output_json)
}

/// One ID per line; surrounding whitespace trimmed, blank lines and `#`
/// comments dropped.
fn read_id_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn write_id_list(path: &Path, ids: &[&str]) -> Result<()> {
    let mut text = ids.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    std::fs::write(path, text)?;
    Ok(())
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
