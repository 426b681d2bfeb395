use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use hitlink::cli::{self, GffArgs, NeighborsArgs, ReportArgs};
use log::{error, LevelFilter};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "hitlink")]
#[command(version = "0.1.0")]
#[command(about = "Neighbor detection and cross-reference reports for BLAST hits", long_about = None)]
struct Cli {
    /// Log progress (info level) and draw progress bars
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a tabular hit file with neighboring hits
    Neighbors(NeighborsArgs),

    /// Expand hits into a linked JSON or XML report
    Report(ReportArgs),

    /// Export hits as GFF3
    Gff(GffArgs),
}

fn setup_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(if verbose { LevelFilter::Info } else { LevelFilter::Warn })
        .format_timestamp(None);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn main() -> ExitCode {
    let opts = match Cli::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    setup_logging(opts.verbose);

    let result = match opts.command {
        Commands::Neighbors(args) => cli::neighbors::run(args, opts.verbose),
        Commands::Report(args) => cli::report::run(args),
        Commands::Gff(args) => cli::gff::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
