//! CLI entry point for srccat

use std::path::PathBuf;
use std::process;

use clap::Parser;
use srccat::{OutputFormat, ScanConfig, Scanner, print_output};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "srccat")]
#[command(
    about = "List and display contents of source code files in a directory, respecting .gitignore and excluding unnecessary files"
)]
#[command(version)]
struct Args {
    /// Directory to process
    #[arg(short = 'd', long = "dir")]
    dir: PathBuf,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output only the list of file names (same as --format list)
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Custom exclude pattern, e.g. '*.css' (can be used multiple times)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Number of parallel workers for reading files
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Do not print progress to stderr
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

/// Log to stderr, `warn` and above unless RUST_LOG says otherwise.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging();

    let format = if args.list {
        OutputFormat::List
    } else {
        args.format
    };

    let config = ScanConfig {
        root: args.dir,
        read_content: format.reads_content(),
        exclude_patterns: args.exclude,
        jobs: args.jobs,
        show_progress: !args.quiet,
    };

    if let Err(e) = run(config, format) {
        eprintln!("srccat: {}", e);
        process::exit(1);
    }
}

fn run(config: ScanConfig, format: OutputFormat) -> srccat::Result<()> {
    let scanner = Scanner::new(config)?;
    let outcome = scanner.scan()?;
    print_output(format, &outcome.records)?;
    Ok(())
}
