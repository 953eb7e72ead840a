pub mod bundle;
pub mod config;
pub mod error;
pub mod expander;
pub mod shell;
pub mod token;

use std::path::Path;

use error::Result;

pub use bundle::{build, bundle_to_string, BuildReport};
pub use config::BuildConfig;
pub use error::{BundleError, ErrorKind, Location};
pub use expander::{expand, Expander, FileRole};

/// Expand an entry file to its script body, without the HTML shell.
pub fn expand_to_string(entry: &Path) -> Result<String> {
    let mut out = Vec::new();
    expand(entry, FileRole::Entry, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Expand an entry file into a sink, only reporting whether it succeeds.
pub fn check(entry: &Path) -> Result<usize> {
    let mut expander = Expander::new();
    expander.expand(entry, FileRole::Entry, &mut std::io::sink())?;
    Ok(expander.files_read())
}
