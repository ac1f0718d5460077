#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use serialrec_reader::RecordReader;
use serialrec_writer::RecordWriter;

// Fuzz target: write->read roundtrip for an arbitrary payload.
//
// Frames the input as one record, reads it back, and asserts the
// recovered payload is byte-identical and the wire image is exactly
// 4 bytes longer than the payload.
fuzz_target!(|data: &[u8]| {
    let mut writer = RecordWriter::new(Vec::with_capacity(data.len() + 4));
    let written = writer.write(data).unwrap();
    let wire = writer.into_inner();

    assert_eq!(written, data.len() + 4);
    assert_eq!(wire.len(), data.len() + 4);

    let mut reader = RecordReader::seekable(Cursor::new(wire));
    let payload = reader.read_record().unwrap();
    assert_eq!(payload, data);
});
