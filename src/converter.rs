use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, error, info};

use crate::{
    core::step::{StepBuilder, StepExecution},
    item::{csv::csv_writer::CsvItemWriterBuilder, vcard::vcard_reader::VcardItemReaderBuilder},
    BatchError,
};

const STEP_NAME: &str = "vcf-to-csv";

/// Path of the CSV file written next to `vcf_path`: same stem, `csv` extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use vcf_to_csv::converter::csv_path_for;
///
/// assert_eq!(csv_path_for("contacts.vcf"), Path::new("contacts.csv"));
/// assert_eq!(csv_path_for("dir/contacts"), Path::new("dir/contacts.csv"));
/// ```
pub fn csv_path_for<P: AsRef<Path>>(vcf_path: P) -> PathBuf {
    vcf_path.as_ref().with_extension("csv")
}

/// Reads every contact of `vcf_path` and writes them all to `csv_path`.
///
/// The CSV text is built in memory and written in one go once the whole
/// source has been parsed, so a failure leaves the destination untouched.
pub fn try_convert<P, Q>(vcf_path: P, csv_path: Q) -> Result<StepExecution, BatchError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let reader = VcardItemReaderBuilder::new().from_path(&vcf_path)?;
    let writer = CsvItemWriterBuilder::new().from_writer(Vec::new());

    let execution = StepBuilder::new(&reader, &writer)
        .name(STEP_NAME)
        .build()
        .execute()?;

    fs::write(&csv_path, writer.into_inner()?)?;
    debug!(
        "Wrote {} rows to {}",
        execution.write_count,
        csv_path.as_ref().display()
    );

    Ok(execution)
}

/// Converts `vcf_path` to `csv_path` and reports the outcome on stdout.
///
/// Any failure is caught here and printed as `Error: <message>`.
///
/// # Returns
/// `true` when the CSV file was written.
pub fn convert<P, Q>(vcf_path: P, csv_path: Q) -> bool
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    match try_convert(&vcf_path, &csv_path) {
        Ok(execution) => {
            info!(
                "Converted {} contacts in {:?}",
                execution.write_count, execution.duration
            );
            println!(
                "Conversion successful. CSV file saved at: {}",
                csv_path.as_ref().display()
            );
            true
        }
        Err(err) => {
            error!("Conversion of {} failed: {}", vcf_path.as_ref().display(), err);
            println!("Error: {}", err);
            false
        }
    }
}
