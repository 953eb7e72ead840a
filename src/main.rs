use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use demo_bundler::{BuildConfig, BundleError};

#[derive(Parser)]
#[command(name = "bundle", version)]
#[command(about = "Bundle a WebGL demo into one self-contained HTML file")]
struct Cli {
    /// Log every expanded file and directive
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand the entry file and write the HTML bundle
    Build {
        /// JSON build manifest (default: ./bundle.json if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Entry script, the only file allowed to use @insert
        #[arg(long)]
        entry: Option<PathBuf>,

        /// Output HTML file
        #[arg(short)]
        o: Option<PathBuf>,

        /// Page title
        #[arg(long)]
        title: Option<String>,
    },

    /// Validate all directives without writing output
    Check {
        /// Entry script (default: from ./bundle.json or scripts/main.js)
        entry: Option<PathBuf>,
    },

    /// Print the expanded script body without the HTML shell
    Expand {
        /// Entry script (default: from ./bundle.json or scripts/main.js)
        entry: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        match e.downcast_ref::<BundleError>() {
            Some(bundle_error) => print_error(bundle_error),
            None => eprintln!("error: {e:#}"),
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    let cwd = env::current_dir().context("cannot determine working directory")?;

    match command {
        Commands::Build {
            config,
            entry,
            o,
            title,
        } => {
            let mut build_config = match config {
                Some(path) => BuildConfig::load(&path)?,
                None => BuildConfig::discover(&cwd)?,
            };
            if let Some(entry) = entry {
                build_config.entry = entry;
            }
            if let Some(output) = o {
                build_config.output = output;
            }
            if let Some(title) = title {
                build_config.title = title;
            }

            let report = demo_bundler::build(&build_config)?;
            eprintln!(
                "wrote {} ({} bytes, {} files)",
                report.output.display(),
                report.bytes_written,
                report.files_read
            );
        }

        Commands::Check { entry } => {
            let entry = match entry {
                Some(entry) => entry,
                None => BuildConfig::discover(&cwd)?.entry,
            };
            let files_read = demo_bundler::check(&entry)?;
            eprintln!("{}: ok ({files_read} files)", entry.display());
        }

        Commands::Expand { entry } => {
            let entry = match entry {
                Some(entry) => entry,
                None => BuildConfig::discover(&cwd)?.entry,
            };
            let mut stdout = io::stdout().lock();
            demo_bundler::expand(&entry, demo_bundler::FileRole::Entry, &mut stdout)?;
            stdout.flush().context("cannot flush stdout")?;
        }
    }

    Ok(())
}

fn print_error(e: &BundleError) {
    eprintln!("Error: Compilation aborted.");
    eprintln!("{e}");

    let Some(location) = &e.location else {
        return;
    };
    let Ok(source) = fs::read_to_string(&location.file) else {
        return;
    };
    if let Some(line) = source.lines().nth(location.line - 1) {
        let line_num = location.line.to_string();
        let gutter = " ".repeat(line_num.len());
        let marker_offset: String = line
            .chars()
            .take(location.column - 1)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();

        eprintln!();
        eprintln!("  {line_num} | {line}");
        eprintln!("  {gutter} | {marker_offset}^");
    }
}
