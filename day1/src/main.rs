use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use day1::{run, MaxStart, Options, TrailingGroup};
use tracing::error;

/// Sums calories per elf and reports the biggest loads.
#[derive(Debug, Parser)]
#[command(name = "day1")]
struct Args {
    /// Input file, one number per line with blank lines between elves; `-` reads stdin
    #[arg(default_value = "data.txt")]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = MaxStart::Zero)]
    max_start: MaxStart,

    #[arg(long, value_enum, default_value_t = TrailingGroup::Flush)]
    trailing_group: TrailingGroup,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

impl From<Args> for Options {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            max_start: args.max_start,
            trailing_group: args.trailing_group,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    util::init_logger(args.verbose);

    let report = match run(&args.into()) {
        Ok(report) => report,
        Err(e) => {
            error!("{e}");
            eprintln!("{}", util::render_report(&e)?);
            std::process::exit(1);
        }
    };

    println!("{report}");

    Ok(())
}
