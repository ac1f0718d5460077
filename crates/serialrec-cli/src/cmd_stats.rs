/// Implementation of `serialrec stats`.
///
/// Walks the record stream and prints a statistics report covering file
/// size, record count, payload byte totals, framing overhead, and the
/// record-size distribution.
///
/// # Example output
///
/// ```text
/// File:     data.rec  (1234 bytes)
/// Records:  42
/// Payload:  1066 bytes
/// Framing:  168 bytes overhead (4 bytes/record, 13.6% of the wire)
///
/// Record length      Min      Avg      Max
/// ─────────────────────────────────────────
/// bytes                0     25.4      512
/// ```
use std::fs::{self, File};
use std::io::BufReader;

use anyhow::{Context, Result};
use serialrec_reader::{ReadError, RecordReader};
use serialrec_wire::LEN_PREFIX_SIZE;

use crate::StatsArgs;

/// Run the `serialrec stats` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the stream is
/// structurally invalid.
pub fn run(args: &StatsArgs) -> Result<()> {
    let file_size = fs::metadata(&args.file)
        .with_context(|| format!("cannot stat {}", args.file.display()))?
        .len();

    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;
    let mut reader = RecordReader::seekable(BufReader::new(file));

    let mut lengths: Vec<u64> = Vec::new();
    loop {
        match reader.read_record() {
            Ok(payload) => lengths.push(payload.len() as u64),
            Err(ReadError::Eof) => break,
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("record {} failed to read", lengths.len()));
            }
        }
    }

    let records = lengths.len() as u64;
    let payload_total: u64 = lengths.iter().sum();
    let overhead = records * LEN_PREFIX_SIZE as u64;
    let wire_total = payload_total + overhead;

    println!("File:     {}  ({file_size} bytes)", args.file.display());
    println!("Records:  {records}");
    println!("Payload:  {payload_total} bytes");
    if wire_total == 0 {
        println!("Framing:  0 bytes overhead");
    } else {
        #[allow(clippy::cast_precision_loss)]
        let share = overhead as f64 / wire_total as f64 * 100.0;
        println!(
            "Framing:  {overhead} bytes overhead ({} bytes/record, {share:.1}% of the wire)",
            LEN_PREFIX_SIZE
        );
    }

    if records > 0 {
        let min = lengths.iter().min().copied().unwrap_or(0);
        let max = lengths.iter().max().copied().unwrap_or(0);
        #[allow(clippy::cast_precision_loss)]
        let avg = payload_total as f64 / records as f64;

        println!();
        println!("Record length      Min      Avg      Max");
        println!("─────────────────────────────────────────");
        println!("bytes         {min:>8} {avg:>8.1} {max:>8}");
    }

    Ok(())
}
