use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use offcheck::analysis::{Check, analyze};
use offcheck::config::FileConfig;
use offcheck::off::OffReader;

/// Check an OFF mesh for duplicate triangles and open or non-manifold edges
///
/// Examples:
///   # Run every check
///   offcheck hull.off
///
///   # Skip boundary edges on a mesh that is not meant to be closed
///   offcheck terrain.off --skip open-edges
///
///   # Use a config file
///   offcheck hull.off --config my-checks.toml
#[derive(Parser, Debug)]
#[command(name = "offcheck")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the OFF mesh
    path: PathBuf,

    /// Path to config file (optional, auto-searches offcheck.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Check to skip; may be repeated
    #[arg(long, value_enum)]
    skip: Vec<Check>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Check one mesh and write the report
///
/// Anomalies in the mesh are reported, not returned as errors; only I/O,
/// config, header and parse failures make this fail.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let total_start = Instant::now();

    let file_config = match args.config {
        Some(ref config_path) => Some(FileConfig::from_path(config_path)?),
        None => FileConfig::load(),
    };

    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    let checks = file_config
        .as_ref()
        .map(|c| c.checks)
        .unwrap_or_default()
        .without(&args.skip);

    writeln!(out, "Opening: {}", args.path.display())?;

    if verbose {
        writeln!(out, "Configuration:")?;
        for check in Check::ALL {
            writeln!(
                out,
                "  {:?}: {}",
                check,
                if checks.is_enabled(check) {
                    "enabled"
                } else {
                    "skipped"
                }
            )?;
        }
    }

    let reader = OffReader::open(&args.path)
        .with_context(|| format!("Failed to load mesh: {}", args.path.display()))?;
    let counts = reader.counts();
    writeln!(out)?;
    writeln!(out, "Verts: {} Tris: {}", counts.vertices, counts.triangles)?;

    let spinner = create_spinner("Parsing OFF file...");
    let start = Instant::now();
    let mesh = reader
        .read_mesh()
        .with_context(|| format!("Failed to load mesh: {}", args.path.display()))?;
    spinner.finish_with_message(format!(
        "Parsed {} vertices, {} triangles [{:.1}s]",
        mesh.vertex_count(),
        mesh.triangle_count(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Analyzing mesh...");
    let start = Instant::now();
    let diagnostics = analyze(&mesh, checks);
    spinner.finish_with_message(format!(
        "Found {} issues [{:.1}s]",
        diagnostics.issue_count(),
        start.elapsed().as_secs_f32()
    ));

    if verbose && let Some(edges) = &diagnostics.edges {
        writeln!(
            out,
            "  Edges: {}, watertight: {}, manifold: {}",
            edges.edge_count(),
            edges.is_watertight(),
            edges.is_manifold()
        )?;
    }

    diagnostics
        .write_report(&mesh, out)
        .context("Failed to write report")?;

    if verbose {
        writeln!(
            out,
            "Done! Total time: {:.1}s",
            total_start.elapsed().as_secs_f32()
        )?;
    }

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
