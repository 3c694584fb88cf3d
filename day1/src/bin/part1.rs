use day1::{run, MissingDigitPolicy};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use util::InputSource;

#[derive(Parser, Debug)]
#[command(name = "part1", version, about = "Sum the calibration values of a document")]
struct Cli {
    #[arg(
        env = "DAY1_INPUT",
        default_value = "input.txt",
        help = "Calibration document to read, `-` for stdin"
    )]
    input: InputSource,

    #[arg(
        long,
        env = "DAY1_ON_MISSING_DIGIT",
        default_value = "fail",
        help = "What to do with a line that contains no digit (fail or zero)"
    )]
    on_missing_digit: MissingDigitPolicy,

    #[arg(long, help = "Print every line with its digit pair and value")]
    trace: bool,

    #[arg(long, short, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_logging(cli.log_level);

    let summary = run(&cli.input, cli.on_missing_digit, |calibration| {
        if cli.trace {
            println!("{calibration}");
        }
    })?;

    println!("total lines: {}", summary.lines);
    println!("grand total: {}", summary.total);

    Ok(())
}
