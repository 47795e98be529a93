use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use log::{debug, error};
use vcf_to_csv::{
    converter::{convert, csv_path_for},
    table::write_csv_as_table,
};

const USAGE: &str = "Usage: vcf-to-csv <vcfFilePath> [--print | -p]";

#[derive(Parser, Debug)]
#[command(name = "vcf-to-csv")]
#[command(about = "Convert a vCard file into a CSV file written next to it")]
struct Cli {
    /// vCard file to convert
    vcf_file_path: Option<PathBuf>,

    /// Print the generated CSV as a table
    #[arg(short, long)]
    print: bool,
}

/// Converts the requested file, then prints the table to `out` when asked.
///
/// Without a path only the usage line is written.
fn run<W: Write>(cli: &Cli, out: &mut W) -> ExitCode {
    let Some(vcf_path) = cli.vcf_file_path.as_deref() else {
        if let Err(err) = writeln!(out, "{}", USAGE) {
            error!("Failed to print usage: {}", err);
        }
        return ExitCode::SUCCESS;
    };

    let csv_path = csv_path_for(vcf_path);
    debug!("Converting {} into {}", vcf_path.display(), csv_path.display());

    let converted = convert(vcf_path, &csv_path);

    if cli.print {
        if let Err(err) = write_csv_as_table(&csv_path, out) {
            error!("Failed to print {}: {}", csv_path.display(), err);
        }
    }

    if converted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    run(&cli, &mut io::stdout().lock())
}
