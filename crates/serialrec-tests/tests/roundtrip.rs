//! Roundtrip integration tests for the write → read pipeline.
//!
//! Each test frames payloads with [`RecordWriter`], reads them back with
//! [`RecordReader`], and asserts the recovered payloads are byte-exact.
//! The framing is deterministic — a payload of length `L` always
//! produces exactly `4 + L` wire bytes with the length big-endian in the
//! first four — so the tests also pin the wire image itself, not just
//! the roundtrip.

use std::io::Cursor;

use serde::{Deserialize, Serialize};
use serialrec_message::Json;
use serialrec_reader::{ReadError, RecordReader};
use serialrec_writer::RecordWriter;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Frame each payload in order and return the wire bytes.
fn wire_of(payloads: &[&[u8]]) -> Vec<u8> {
    let mut writer = RecordWriter::new(Vec::new());
    for payload in payloads {
        writer.write(payload).unwrap();
    }
    writer.into_inner()
}

// ── Byte roundtrips ──────────────────────────────────────────────────────────

#[test]
fn hello_world_writes_nine_byte_frames() {
    let mut writer = RecordWriter::new(Vec::new());

    assert_eq!(writer.write(b"Hello").unwrap(), 9);
    assert_eq!(writer.get_ref().len(), 9);

    assert_eq!(writer.write(b"World").unwrap(), 9);
    assert_eq!(writer.get_ref().len(), 18);
}

#[test]
fn hello_world_reads_back_in_order() {
    let wire = wire_of(&[b"Hello", b"World"]);
    let mut reader = RecordReader::seekable(Cursor::new(wire));

    let first = reader.read_record().unwrap();
    assert_eq!(first.len(), 5);
    assert_eq!(first, b"Hello");

    let second = reader.read_record().unwrap();
    assert_eq!(second.len(), 5);
    assert_eq!(second, b"World");

    assert!(matches!(reader.read_record(), Err(ReadError::Eof)));
}

#[test]
fn hello_world_through_caller_buffers() {
    let wire = wire_of(&[b"Hello", b"World"]);
    let mut reader = RecordReader::seekable(Cursor::new(wire));

    let mut buf = [0u8; 20];
    let n = reader.read_into(&mut buf).unwrap();
    assert_eq!(n, 5);
    assert_eq!(&buf[..n], b"Hello");

    let mut buf = [0u8; 20];
    let n = reader.read_into(&mut buf).unwrap();
    assert_eq!(n, 5);
    assert_eq!(&buf[..n], b"World");
}

#[test]
fn header_is_big_endian_length() {
    let wire = wire_of(&[b"Hello"]);
    assert_eq!(hex::encode(&wire[..4]), "00000005");
    assert_eq!(&wire[4..], b"Hello");
}

#[test]
fn empty_payload_roundtrips() {
    let wire = wire_of(&[b""]);
    assert_eq!(hex::encode(&wire), "00000000");

    let mut reader = RecordReader::seekable(Cursor::new(wire));
    assert_eq!(reader.read_record().unwrap(), b"");
    assert!(matches!(reader.read_record(), Err(ReadError::Eof)));
}

#[test]
fn sequencing_preserves_order_and_contents() {
    let payloads: Vec<Vec<u8>> = [0usize, 1, 3, 255, 256, 70_000]
        .iter()
        .enumerate()
        .map(|(i, &len)| {
            #[allow(clippy::cast_possible_truncation)]
            let fill = (i as u8).wrapping_mul(37).wrapping_add(1);
            vec![fill; len]
        })
        .collect();

    let mut writer = RecordWriter::new(Vec::new());
    for payload in &payloads {
        let n = writer.write(payload).unwrap();
        assert_eq!(n, 4 + payload.len());
    }

    let mut reader = RecordReader::seekable(Cursor::new(writer.into_inner()));
    for payload in &payloads {
        assert_eq!(&reader.read_record().unwrap(), payload);
    }
    assert!(matches!(reader.read_record(), Err(ReadError::Eof)));
}

#[test]
fn binary_payloads_pass_through_unchanged() {
    // Payload bytes that look like headers must not confuse the framing.
    let tricky: &[u8] = &[0x00, 0x00, 0x00, 0x05, 0xFF, 0xFF, 0xFF, 0xFF];
    let wire = wire_of(&[tricky, b"after"]);

    let mut reader = RecordReader::seekable(Cursor::new(wire));
    assert_eq!(reader.read_record().unwrap(), tricky);
    assert_eq!(reader.read_record().unwrap(), b"after");
}

// ── Message roundtrips ───────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct TestMessage {
    text: String,
}

#[test]
fn messages_roundtrip_through_the_stream() {
    let mut writer = RecordWriter::new(Vec::new());
    writer
        .write_message(&Json(TestMessage {
            text: "Test data".to_string(),
        }))
        .unwrap();
    writer
        .write_message(&Json(TestMessage {
            text: "Toast Data".to_string(),
        }))
        .unwrap();

    let mut reader = RecordReader::seekable(Cursor::new(writer.into_inner()));

    let mut msg = Json(TestMessage::default());
    reader.read_message(&mut msg).unwrap();
    assert_eq!(msg.0.text, "Test data");

    reader.read_message(&mut msg).unwrap();
    assert_eq!(msg.0.text, "Toast Data");

    assert!(matches!(
        reader.read_message(&mut msg),
        Err(ReadError::Eof)
    ));
}

#[test]
fn records_and_messages_interleave() {
    let mut writer = RecordWriter::new(Vec::new());
    writer.write(b"raw bytes").unwrap();
    writer
        .write_message(&Json(TestMessage {
            text: "structured".to_string(),
        }))
        .unwrap();
    writer.write(b"more raw").unwrap();

    let mut reader = RecordReader::seekable(Cursor::new(writer.into_inner()));
    assert_eq!(reader.read_record().unwrap(), b"raw bytes");

    let mut msg = Json(TestMessage::default());
    reader.read_message(&mut msg).unwrap();
    assert_eq!(msg.0.text, "structured");

    assert_eq!(reader.read_record().unwrap(), b"more raw");
}

#[test]
fn undecodable_record_reports_deserialize_and_consumes() {
    let mut writer = RecordWriter::new(Vec::new());
    writer.write(b"{definitely not json").unwrap();
    writer.write(b"\"fine\"").unwrap();

    let mut reader = RecordReader::seekable(Cursor::new(writer.into_inner()));

    let mut msg = Json(serde_json::Value::Null);
    assert!(matches!(
        reader.read_message(&mut msg),
        Err(ReadError::Deserialize(_))
    ));

    // The bad record was consumed; the stream stays on the next frame.
    reader.read_message(&mut msg).unwrap();
    assert_eq!(msg.0, serde_json::Value::String("fine".to_string()));
}
