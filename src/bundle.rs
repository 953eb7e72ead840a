//! Build driver: writes the HTML header, expands the entry file into the
//! same stream and closes the document with the footer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::BuildConfig;
use crate::error::{BundleError, Result};
use crate::expander::{Expander, FileRole};
use crate::shell;

/// Summary of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub output: PathBuf,
    pub bytes_written: usize,
    pub files_read: usize,
}

/// Write the complete bundle for `entry` into `out`. Returns the number of
/// files read.
pub fn write_bundle<W: Write>(entry: &Path, title: &str, out: &mut W) -> Result<usize> {
    let mut expander = Expander::new();
    out.write_all(shell::header(title).as_bytes())
        .map_err(BundleError::output)?;
    expander.expand(entry, FileRole::Entry, out)?;
    out.write_all(shell::FOOTER.as_bytes())
        .map_err(BundleError::output)?;
    Ok(expander.files_read())
}

/// Build `config.output` from `config.entry`.
///
/// The output file is created up front and written as the expansion streams;
/// a failed build leaves whatever was written so far on disk.
pub fn build(config: &BuildConfig) -> Result<BuildReport> {
    let file = File::create(&config.output).map_err(BundleError::output)?;
    let mut out = CountingWriter::new(BufWriter::new(file));

    let files_read = write_bundle(&config.entry, &config.title, &mut out)?;
    out.flush().map_err(BundleError::output)?;

    let report = BuildReport {
        output: config.output.clone(),
        bytes_written: out.count,
        files_read,
    };
    info!(
        output = %report.output.display(),
        bytes = report.bytes_written,
        files = report.files_read,
        "bundle written"
    );
    Ok(report)
}

/// Build the bundle for `config` in memory.
pub fn bundle_to_string(config: &BuildConfig) -> Result<String> {
    let mut out = Vec::new();
    write_bundle(&config.entry, &config.title, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

struct CountingWriter<W> {
    inner: W,
    count: usize,
}

impl<W> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
