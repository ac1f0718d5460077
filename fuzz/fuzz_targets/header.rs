#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: FrameHeader::read_from with arbitrary bytes.
//
// Catches bugs in:
// - Truncated header handling
// - Big-endian length decoding consistency
fuzz_target!(|data: &[u8]| {
    if let Ok(header) = serialrec_wire::FrameHeader::read_from(data) {
        // A successfully parsed header must re-encode to the same bytes.
        assert_eq!(&header.to_bytes()[..], &data[..4]);
    }
});
