#![allow(dead_code, unused_imports)]

pub mod mocks;

use std::{env::temp_dir, fs, path::PathBuf};

use rand::distr::{Alphanumeric, SampleString};

pub use mocks::{MockSink, MockSource};

/// A fresh path in the temp directory with the given extension.
pub fn temp_path(extension: &str) -> PathBuf {
    let file_name = Alphanumeric.sample_string(&mut rand::rng(), 16);
    temp_dir().join(format!("{}.{}", file_name, extension))
}

/// Writes `content` to a fresh `.vcf` file and returns its path.
pub fn write_vcf(content: impl AsRef<[u8]>) -> PathBuf {
    let path = temp_path("vcf");
    fs::write(&path, content).expect("Failed to write VCF file");
    path
}
