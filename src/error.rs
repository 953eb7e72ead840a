use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// All errors produced while bundling.
#[derive(Debug)]
pub struct BundleError {
    pub kind: ErrorKind,
    /// Directive that triggered the error. `None` for failures outside any
    /// directive (unreadable entry file, output sink, config).
    pub location: Option<Location>,
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A directive has no closing `)` on its line.
    #[error("Missing closing delimiter")]
    MissingDelimiter,
    /// `@insert` used outside the entry file.
    #[error("Inserts only allowed in main file")]
    InclusionNotAllowed,
    /// The text after `@` is not a known directive keyword.
    #[error("Invalid command")]
    UnknownDirective(String),
    /// A referenced file could not be opened or read.
    #[error("cannot read '{}': {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Writing to the output stream failed.
    #[error("cannot write output: {0}")]
    Output(#[source] io::Error),
    /// The build manifest could not be read or parsed.
    #[error("invalid config '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

/// Position of a directive marker in a source file. Line and column are 1-based;
/// the column counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{location}: ")?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for BundleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

pub type Result<T> = std::result::Result<T, BundleError>;

/// Shorthand constructors.
impl BundleError {
    pub fn at(kind: ErrorKind, location: Location) -> Self {
        Self {
            kind,
            location: Some(location),
        }
    }

    pub fn unreadable(path: &Path, source: io::Error) -> Self {
        Self {
            kind: ErrorKind::UnreadableFile {
                path: path.to_path_buf(),
                source,
            },
            location: None,
        }
    }

    pub fn output(source: io::Error) -> Self {
        Self {
            kind: ErrorKind::Output(source),
            location: None,
        }
    }

    pub fn config(path: &Path, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Config {
                path: path.to_path_buf(),
                message: message.into(),
            },
            location: None,
        }
    }

    /// Attach a directive location if the error does not carry one yet.
    pub fn located(mut self, location: Location) -> Self {
        if self.location.is_none() {
            self.location = Some(location);
        }
        self
    }
}
