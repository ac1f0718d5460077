/// serialrec command-line tool — pack, unpack, inspect, validate, and
/// analyse length-prefixed record streams.
///
/// # Command overview
///
/// ```text
/// serialrec <COMMAND> [OPTIONS]
///
/// Commands:
///   pack       Frame input files (or JSON lines) into a record stream
///   unpack     Split a record stream back into its payloads
///   inspect    Print a per-record summary of a record stream
///   validate   Check a record stream for structural correctness
///   stats      Print size and framing-overhead statistics
///   help       Print help information
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_inspect;
mod cmd_pack;
mod cmd_stats;
mod cmd_unpack;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The serialrec command-line tool.
///
/// Pack, unpack, inspect, validate, and analyse record-stream files.
#[derive(Parser)]
#[command(name = "serialrec", version, about = "Length-prefixed record stream CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Frame input files (or JSON lines) into a record stream.
    Pack(PackArgs),
    /// Split a record stream back into its payloads.
    Unpack(UnpackArgs),
    /// Print a per-record summary of a record stream.
    Inspect(InspectArgs),
    /// Check a record stream for structural correctness.
    Validate(ValidateArgs),
    /// Print size and framing-overhead statistics.
    Stats(StatsArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `serialrec pack`.
///
/// Each input file becomes one record, framed in argument order. With
/// `--jsonl`, every non-empty line of the given file is parsed as a JSON
/// document and written through the message path instead, after any file
/// records.
#[derive(clap::Args)]
pub struct PackArgs {
    /// Input files; each file's contents become one record.
    pub inputs: Vec<PathBuf>,

    /// Output record-stream file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Read JSON documents, one per line, and frame each as a record.
    #[arg(long)]
    pub jsonl: Option<PathBuf>,
}

/// Arguments for `serialrec unpack`.
///
/// By default every record is written to a numbered file under
/// `--out-dir`. `--raw` concatenates the payloads to stdout instead;
/// `--jsonl` decodes each record as a JSON document and prints one per
/// line.
#[derive(clap::Args)]
pub struct UnpackArgs {
    /// Record-stream file to unpack.
    pub file: PathBuf,

    /// Directory for the numbered payload files.
    #[arg(short = 'd', long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Write raw payload bytes to stdout instead of files.
    #[arg(long, conflicts_with = "jsonl")]
    pub raw: bool,

    /// Decode each record as JSON and print one document per line.
    #[arg(long, conflicts_with = "raw")]
    pub jsonl: bool,
}

/// Arguments for `serialrec inspect`.
///
/// Walks the stream and prints one summary line per record (or a single
/// record when `--record` is set).
///
/// ```text
/// ┌─────────────┬───────────────────────────────────────────────────────┐
/// │ Flag        │ Effect                                                │
/// ├─────────────┼───────────────────────────────────────────────────────┤
/// │ --show-body │ Include first 80 chars of the payload (UTF-8 lossy)   │
/// │ --show-hex  │ Include 16-byte-per-line hex dump of the payload      │
/// │ --record N  │ Show only the record at index N                       │
/// └─────────────┴───────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Record-stream file to inspect.
    pub file: PathBuf,

    /// Show payload content (first 80 characters, UTF-8 lossy).
    #[arg(long)]
    pub show_body: bool,

    /// Show raw hex dump of payloads (16 bytes per line).
    #[arg(long)]
    pub show_hex: bool,

    /// Inspect only the record at this zero-based index.
    #[arg(long)]
    pub record: Option<usize>,
}

/// Arguments for `serialrec validate`.
///
/// Walks every frame in the file and reports either a set of success
/// checkmarks or a diagnostic error naming the failing record and byte
/// offset. The process exits with code 0 on success and code 1 on any
/// structural problem.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Record-stream file to validate.
    pub file: PathBuf,
}

/// Arguments for `serialrec stats`.
///
/// Walks the stream and prints record count, payload byte totals,
/// framing overhead, and the min/avg/max record sizes.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Record-stream file to analyse.
    pub file: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pack(args) => cmd_pack::run(&args),
        Commands::Unpack(args) => cmd_unpack::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Stats(args) => cmd_stats::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
