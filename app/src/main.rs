use std::path::PathBuf;

use clap::{Parser, Subcommand};

use copc_stac::{init_logger, AppError, EngineArgs};
use pcd_stac::{
    build_collection,
    family::{DatasetFamily, GEDI_CALVAL, PANAMA},
    save_collection, save_item, ItemBuilder,
};

#[derive(Parser, Debug)]
#[command(
    name = "copc-stac",
    about = "Create STAC Collections and Items for COPC lidar datasets",
    author = "MIERUNE Inc.",
    version
)]
struct Cli {
    #[command(flatten)]
    engines: EngineArgs,

    #[command(subcommand)]
    family: FamilyCommand,
}

#[derive(Subcommand, Debug)]
enum FamilyCommand {
    /// GEDI CalVal airborne lidar
    #[command(name = "gedicalvalcopc", visible_alias = "gedi-calval")]
    GediCalval {
        #[command(subcommand)]
        command: Command,
    },
    /// Panama ALS survey
    #[command(name = "panamacopc", visible_alias = "panama")]
    Panama {
        #[command(subcommand)]
        command: Command,
    },
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the dataset's STAC Collection
    CreateCollection {
        /// Output collection JSON file
        destination: PathBuf,
    },
    /// Write a STAC Item for one point cloud
    CreateItem {
        /// Point cloud path or URL
        source: String,
        /// Output directory
        destination: PathBuf,
        /// Convert the source to COPC in the destination first
        #[arg(long)]
        copc: bool,
    },
}

fn run(family: &DatasetFamily, command: Command, engines: &EngineArgs) -> Result<(), AppError> {
    match command {
        Command::CreateCollection { destination } => {
            log::info!("family: {}", family.id);
            log::info!("destination: {:?}", destination);
            let mut collection = build_collection(family);
            save_collection(&mut collection, &destination)?;
        }
        Command::CreateItem {
            source,
            destination,
            copc,
        } => {
            log::info!("family: {}", family.id);
            log::info!("source: {}", source);
            log::info!("destination: {:?}", destination);
            log::info!("convert to COPC: {}", copc);
            log::info!("PDAL: {:?}", engines.pdal);

            let engine = engines.engine();
            let crs = engines.crs_transform();
            let mut item = ItemBuilder::new(family, &engine, &crs)
                .convert_to_copc(copc)
                .build(&source, &destination)?;
            save_item(&mut item, &destination)?;
        }
    }
    Ok(())
}

fn main() {
    init_logger();

    let args = Cli::parse();
    let start = std::time::Instant::now();

    let (family, command) = match args.family {
        FamilyCommand::GediCalval { command } => (&GEDI_CALVAL, command),
        FamilyCommand::Panama { command } => (&PANAMA, command),
    };

    if let Err(e) = run(family, command, &args.engines) {
        log::error!("{}", e);
        std::process::exit(1);
    }

    log::info!("Elapsed: {:?}", start.elapsed());
}
