/// Implementation of `serialrec unpack`.
///
/// Walks the record stream and emits each payload:
///
///   - default: one numbered file per record under `--out-dir`
///     (`record-000000.bin`, `record-000001.bin`, ...)
///   - `--raw`: payload bytes concatenated to stdout
///   - `--jsonl`: each record decoded as a JSON document through the
///     message path, printed one per line
use std::fs::{self, File};
use std::io::{self, BufReader, Write};

use anyhow::{Context, Result};
use serialrec_message::Json;
use serialrec_reader::{ReadError, RecordReader};

use crate::UnpackArgs;

/// Run the `serialrec unpack` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the stream is
/// structurally invalid, a record does not decode as JSON in `--jsonl`
/// mode, or an output file cannot be written.
pub fn run(args: &UnpackArgs) -> Result<()> {
    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;
    let mut reader = RecordReader::seekable(BufReader::new(file));

    if !args.raw && !args.jsonl {
        fs::create_dir_all(&args.out_dir)
            .with_context(|| format!("cannot create {}", args.out_dir.display()))?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut records = 0usize;

    loop {
        if args.jsonl {
            let mut msg = Json(serde_json::Value::Null);
            match reader.read_message(&mut msg) {
                Ok(()) => writeln!(out, "{}", msg.0)?,
                Err(ReadError::Eof) => break,
                Err(e) => {
                    return Err(e).with_context(|| format!("record {records} failed to decode"));
                }
            }
        } else {
            let payload = match reader.read_record() {
                Ok(payload) => payload,
                Err(ReadError::Eof) => break,
                Err(e) => {
                    return Err(e).with_context(|| format!("record {records} failed to read"));
                }
            };
            if args.raw {
                out.write_all(&payload)?;
            } else {
                let path = args.out_dir.join(format!("record-{records:06}.bin"));
                fs::write(&path, &payload)
                    .with_context(|| format!("cannot write {}", path.display()))?;
            }
        }
        records += 1;
    }

    if !args.raw {
        eprintln!(
            "{records} record{} unpacked from {}",
            if records == 1 { "" } else { "s" },
            args.file.display()
        );
    }
    Ok(())
}
