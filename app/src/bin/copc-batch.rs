use std::path::PathBuf;

use clap::Parser;

use copc_stac::{
    batch::{expand_globs, read_records, run_batch},
    init_logger, upload::Uploader, AppError, EngineArgs,
};

#[derive(Parser, Debug)]
#[command(
    name = "copc-batch",
    about = "Convert LAS point clouds to COPC and upload them to object storage",
    author = "MIERUNE Inc.",
    version
)]
struct Cli {
    /// Sources or local glob patterns
    #[arg(value_name = "SOURCE", required_unless_present = "records")]
    sources: Vec<String>,

    /// File listing one source per line
    #[arg(short, long, value_name = "FILE")]
    records: Option<PathBuf>,

    /// Upload destination: `s3://bucket/prefix` or a local directory
    #[arg(short, long, value_name = "URL")]
    destination: String,

    /// Where converted files are staged before upload (defaults to a temporary directory)
    #[arg(short, long, value_name = "DIR")]
    work_dir: Option<PathBuf>,

    #[command(flatten)]
    engines: EngineArgs,
}

fn run(args: Cli) -> Result<(), AppError> {
    let mut patterns = args.sources;
    if let Some(records) = &args.records {
        patterns.extend(read_records(records)?);
    }
    let sources = expand_globs(patterns)?;
    log::info!("{} sources", sources.len());
    log::info!("destination: {}", args.destination);
    if sources.is_empty() {
        log::warn!("nothing to convert");
        return Ok(());
    }

    let uploader = Uploader::new(&args.destination)?;
    let engine = args.engines.engine();

    let staging = tempfile::tempdir()?;
    let work_dir = args.work_dir.unwrap_or_else(|| staging.path().to_path_buf());

    let summary = run_batch(&engine, &sources, &work_dir, &uploader);
    log::info!(
        "uploaded {}, failed {}",
        summary.uploaded.len(),
        summary.failed.len()
    );
    for (source, reason) in &summary.failed {
        log::warn!("failed: {} ({})", source, reason);
    }
    summary.into_result()?;
    Ok(())
}

fn main() {
    init_logger();

    let start = std::time::Instant::now();
    if let Err(e) = run(Cli::parse()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
    log::info!("Elapsed: {:?}", start.elapsed());
}
