/// Implementation of `serialrec validate`.
///
/// Walks every frame in the file and reports either a series of success
/// checkmarks (`✓`) or a diagnostic failure line (`✗`). The command
/// exits with code 0 on a valid file and code 1 on any error (the main
/// dispatcher converts `Err` to exit code 1).
///
/// # Success output
///
/// ```text
/// ✓ Frames: 4 records parsed successfully
/// ✓ Lengths: every header's payload length was satisfied
/// ✓ Boundary: stream ends exactly on a frame boundary
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: record 2 at offset 31 — short read for body: got 3 of 5 bytes
/// ```
///
/// A short header mid-stream means truncation or a desynchronized frame
/// boundary; a short body means the final frame was cut off. Either way
/// the stream should be treated as unusable past the reported offset.
use std::fs::File;
use std::io::{BufReader, SeekFrom};

use anyhow::{Context, Result, anyhow};
use serialrec_reader::{ReadError, RecordReader};

use crate::ValidateArgs;

/// Run the `serialrec validate` command.
///
/// Prints a validation report to stdout and returns `Ok(())` on
/// success. On any structural error, prints a `✗` diagnostic to stdout
/// and returns `Err`, which the main dispatcher converts to exit
/// code 1.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if the record stream
/// fails any structural check.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;
    let mut reader = RecordReader::seekable(BufReader::new(file));

    let mut records = 0usize;

    loop {
        let offset = reader.seek(SeekFrom::Current(0))?;
        match reader.read_record() {
            Ok(_) => records += 1,
            Err(ReadError::Eof) => break,
            Err(e) => {
                println!(
                    "✗ Error: record {records} at offset {offset} — {}",
                    read_error_diagnostic(&e)
                );
                return Err(anyhow!("validation failed"));
            }
        }
    }

    println!(
        "✓ Frames: {records} record{} parsed successfully",
        if records == 1 { "" } else { "s" }
    );
    println!("✓ Lengths: every header's payload length was satisfied");
    println!("✓ Boundary: stream ends exactly on a frame boundary");
    Ok(())
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a `ReadError` into a human-readable diagnostic string.
///
/// ```text
/// ┌──────────────────────────┬──────────────────────────────────────────┐
/// │ ReadError variant        │ Diagnostic message                       │
/// ├──────────────────────────┼──────────────────────────────────────────┤
/// │ ShortHeaderRead          │ "<display> (truncated or desynchronized)"│
/// │ ShortBodyRead            │ "<display> (final frame cut off)"        │
/// │ anything else            │ "<error Display>"                        │
/// └──────────────────────────┴──────────────────────────────────────────┘
/// ```
fn read_error_diagnostic(e: &ReadError) -> String {
    match e {
        ReadError::ShortHeaderRead { .. } => {
            format!("{e} (stream truncated or desynchronized from frame boundaries)")
        }
        ReadError::ShortBodyRead { .. } => format!("{e} (final frame cut off)"),
        other => other.to_string(),
    }
}
