/// Implementation of `serialrec inspect`.
///
/// Walks the record stream and prints one summary line per record to
/// stdout. Optionally shows payload content (`--show-body`) or a raw hex
/// dump (`--show-hex`). When `--record N` is given, only the record at
/// index N is shown.
///
/// # Output format
///
/// ```text
/// Record 0: offset 0, length 5
///           Body: Hello
/// Record 1: offset 9, length 5
///           Body: World
/// ---
/// 2 records, 10 payload bytes, 18 bytes on the wire
/// ```
use std::fs::File;
use std::io::{BufReader, SeekFrom};

use anyhow::{Context, Result};
use serialrec_reader::{ReadError, RecordReader};

use crate::InspectArgs;

/// Run the `serialrec inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the stream is
/// truncated or otherwise structurally invalid.
pub fn run(args: &InspectArgs) -> Result<()> {
    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;
    let mut reader = RecordReader::seekable(BufReader::new(file));

    let mut records = 0usize;
    let mut payload_total = 0u64;

    loop {
        let offset = reader.seek(SeekFrom::Current(0))?;
        let payload = match reader.read_record() {
            Ok(payload) => payload,
            Err(ReadError::Eof) => break,
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("record {records} at offset {offset} is unreadable"));
            }
        };

        let idx = records;
        records += 1;
        payload_total += payload.len() as u64;

        // When --record N is specified, skip all other indices.
        if let Some(target) = args.record
            && idx != target
        {
            continue;
        }

        println!("Record {idx}: offset {offset}, length {}", payload.len());

        if args.show_body {
            let body = String::from_utf8_lossy(&payload);
            let truncated: String = body.chars().take(80).collect();
            let ellipsis = if body.chars().count() > 80 { "…" } else { "" };
            println!("          Body: {truncated}{ellipsis}");
        }

        if args.show_hex {
            println!("          Hex dump:");
            for (i, chunk) in payload.chunks(16).enumerate() {
                let line_offset = i * 16;
                let hex: String =
                    chunk
                        .iter()
                        .fold(String::with_capacity(chunk.len() * 3), |mut s, b| {
                            use std::fmt::Write as _;
                            if !s.is_empty() {
                                s.push(' ');
                            }
                            let _ = write!(s, "{b:02x}");
                            s
                        });
                let ascii: String = chunk
                    .iter()
                    .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
                    .collect();
                println!("            {line_offset:04x}  {hex:<48}  {ascii}");
            }
        }
    }

    let wire_total = payload_total + 4 * records as u64;
    println!("---");
    println!(
        "{records} record{}, {payload_total} payload bytes, {wire_total} bytes on the wire",
        if records == 1 { "" } else { "s" }
    );

    Ok(())
}
