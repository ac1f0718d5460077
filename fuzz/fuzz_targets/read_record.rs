#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use serialrec_reader::{ReadError, RecordReader};

// Fuzz target: drain a RecordReader over arbitrary bytes.
//
// The reader must never panic, every returned payload must fit inside
// the input (payload bytes come off the stream, after a 4-byte header),
// and the walk must terminate: each successful read consumes at least
// 4 bytes, and every error ends the loop.
//
// The length cap keeps a hostile header from forcing a giant
// allocation inside the fuzzer.
fuzz_target!(|data: &[u8]| {
    let mut reader =
        RecordReader::seekable(Cursor::new(data)).with_max_record_len(1 << 20);
    let mut consumed = 0usize;

    loop {
        match reader.read_record() {
            Ok(payload) => {
                consumed += 4 + payload.len();
                assert!(consumed <= data.len());
            }
            Err(ReadError::Eof) => {
                assert_eq!(consumed, data.len());
                break;
            }
            Err(_) => break,
        }
    }
});
