/// Implementation of `serialrec pack`.
///
/// Frames each input file as one record, in argument order. With
/// `--jsonl`, every non-empty line of the given file is parsed as a JSON
/// document and written through the message path, so the output can be
/// read back with `unpack --jsonl` or any message-aware consumer.
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result, bail};
use serialrec_message::Json;
use serialrec_writer::RecordWriter;

use crate::PackArgs;

/// Run the `serialrec pack` command.
///
/// # Errors
///
/// Returns an error if no inputs were given, an input cannot be read, a
/// JSON line does not parse, or the output file cannot be written.
pub fn run(args: &PackArgs) -> Result<()> {
    if args.inputs.is_empty() && args.jsonl.is_none() {
        bail!("nothing to pack: pass input files or --jsonl");
    }

    let out = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    let mut writer = RecordWriter::new(BufWriter::new(out));
    let mut records = 0usize;

    for path in &args.inputs {
        let payload =
            fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
        writer
            .write(&payload)
            .with_context(|| format!("cannot frame {}", path.display()))?;
        records += 1;
    }

    if let Some(jsonl) = &args.jsonl {
        let file =
            File::open(jsonl).with_context(|| format!("cannot open {}", jsonl.display()))?;
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line =
                line.with_context(|| format!("cannot read line from {}", jsonl.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let value: serde_json::Value = serde_json::from_str(&line).with_context(|| {
                format!("line {} of {} is not valid JSON", idx + 1, jsonl.display())
            })?;
            writer
                .write_message(&Json(value))
                .with_context(|| format!("cannot frame line {} of {}", idx + 1, jsonl.display()))?;
            records += 1;
        }
    }

    let mut sink = writer.into_inner();
    sink.flush()
        .with_context(|| format!("cannot flush {}", args.output.display()))?;

    println!(
        "{records} record{} written to {}",
        if records == 1 { "" } else { "s" },
        args.output.display()
    );
    Ok(())
}
