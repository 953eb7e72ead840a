//! Directive expander: streams a source file to an output sink, replacing
//! `@insert(path)` with the expanded contents of `path` and `@base64(path)`
//! with the base64 encoding of the raw bytes of `path`.
//!
//! Rules:
//! - A directive and its argument must sit on one line.
//! - Only the entry file may use `@insert`; inserted files may still embed.
//! - Relative arguments resolve against the directory of the file that
//!   contains the directive.
//! - The first error aborts the expansion. Output already written stays in
//!   the sink.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use base64::prelude::*;
use logos::Logos;
use tracing::debug;

use crate::error::{BundleError, ErrorKind, Location, Result};
use crate::token::Token;

/// Whether a file is the build's entry file, which decides if `@insert` is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Entry,
    Included,
}

/// Expand `path` into `out`. Convenience wrapper around [`Expander`].
pub fn expand<W: Write>(path: &Path, role: FileRole, out: &mut W) -> Result<()> {
    Expander::new().expand(path, role, out)
}

/// Recursive directive expander. Tracks how many files it has read so the
/// driver can report it.
#[derive(Debug, Default)]
pub struct Expander {
    files_read: usize,
}

impl Expander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files (sources and embedded assets) read so far.
    pub fn files_read(&self) -> usize {
        self.files_read
    }

    /// Read `path` as text and expand it into `out`.
    pub fn expand<W: Write>(&mut self, path: &Path, role: FileRole, out: &mut W) -> Result<()> {
        let source = self.read_text(path)?;
        self.expand_source(path, &source, role, out)
    }

    /// Expand already-loaded `source`. `path` names the file in diagnostics and
    /// anchors relative directive arguments.
    pub fn expand_source<W: Write>(
        &mut self,
        path: &Path,
        source: &str,
        role: FileRole,
        out: &mut W,
    ) -> Result<()> {
        debug!(file = %path.display(), ?role, "expanding");

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let mut lexer = Token::lexer(source);
        let mut line = 1;
        let mut line_start = 0;

        while let Some(result) = lexer.next() {
            let span = lexer.span();
            let token = match result {
                Ok(token) => token,
                Err(()) => {
                    let location = locate(path, source, line, line_start, span.start);
                    return Err(BundleError::at(
                        ErrorKind::UnknownDirective(lexer.slice().to_string()),
                        location,
                    ));
                }
            };

            match token {
                Token::Text => write_str(out, lexer.slice())?,
                Token::Newline => {
                    write_str(out, "\n")?;
                    line += 1;
                    line_start = span.end;
                }
                Token::Insert | Token::Base64 | Token::Marker => {
                    let location = locate(path, source, line, line_start, span.start);

                    let rest = lexer.remainder();
                    let line_rest = &rest[..rest.find('\n').unwrap_or(rest.len())];
                    let Some(close) = line_rest.find(')') else {
                        return Err(BundleError::at(ErrorKind::MissingDelimiter, location));
                    };
                    let argument = &line_rest[..close];
                    lexer.bump(close + 1);

                    self.dispatch(token, argument, base_dir, role, location, out)?;
                }
            }
        }

        Ok(())
    }

    fn dispatch<W: Write>(
        &mut self,
        token: Token,
        argument: &str,
        base_dir: &Path,
        role: FileRole,
        location: Location,
        out: &mut W,
    ) -> Result<()> {
        match token {
            Token::Insert => {
                if role != FileRole::Entry {
                    return Err(BundleError::at(ErrorKind::InclusionNotAllowed, location));
                }
                let target = resolve(base_dir, argument);
                debug!(
                    at = %location,
                    directive = token.directive_name(),
                    target = %target.display(),
                    "directive"
                );
                let source = self
                    .read_text(&target)
                    .map_err(|e| e.located(location))?;
                self.expand_source(&target, &source, FileRole::Included, out)
            }
            Token::Base64 => {
                let target = resolve(base_dir, argument);
                debug!(
                    at = %location,
                    directive = token.directive_name(),
                    target = %target.display(),
                    "directive"
                );
                let bytes = fs::read(&target)
                    .map_err(|e| BundleError::unreadable(&target, e).located(location))?;
                self.files_read += 1;
                write_str(out, &BASE64_STANDARD.encode(bytes))
            }
            _ => {
                // `@foo(bar` -> `foo`
                let name = argument.split('(').next().unwrap_or_default();
                Err(BundleError::at(
                    ErrorKind::UnknownDirective(name.to_string()),
                    location,
                ))
            }
        }
    }

    fn read_text(&mut self, path: &Path) -> Result<String> {
        let source = fs::read_to_string(path).map_err(|e| BundleError::unreadable(path, e))?;
        self.files_read += 1;
        Ok(source)
    }
}

/// Location of the byte offset `at`, on the line starting at `line_start`.
fn locate(path: &Path, source: &str, line: usize, line_start: usize, at: usize) -> Location {
    Location {
        file: path.to_path_buf(),
        line,
        column: source[line_start..at].chars().count() + 1,
    }
}

/// Resolve a directive argument relative to the including file's directory.
/// Absolute arguments replace the base entirely.
fn resolve(base_dir: &Path, argument: &str) -> PathBuf {
    base_dir.join(argument)
}

fn write_str<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).map_err(BundleError::output)
}
