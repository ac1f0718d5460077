use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serialrec_reader::{ReadError, RecordReader};
use serialrec_writer::RecordWriter;

fn stream_of(payload: &[u8], count: usize) -> Vec<u8> {
    let mut writer = RecordWriter::new(Vec::with_capacity((payload.len() + 4) * count));
    for _ in 0..count {
        writer.write(payload).unwrap();
    }
    writer.into_inner()
}

fn bench_read_hello(c: &mut Criterion) {
    let wire = stream_of(b"Hello", 1000);

    c.bench_function("read_hello_x1000", |b| {
        b.iter(|| {
            let mut reader = RecordReader::seekable(Cursor::new(wire.as_slice()));
            let mut records = 0usize;
            loop {
                match reader.read_record() {
                    Ok(payload) => {
                        assert_eq!(payload.len(), 5);
                        records += 1;
                    }
                    Err(ReadError::Eof) => break,
                    Err(e) => panic!("unexpected read error: {e}"),
                }
            }
            records
        });
    });
}

fn bench_read_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_throughput");

    for size_kb in [1, 10, 100] {
        let wire = stream_of(&vec![b'x'; size_kb * 1024], 1);
        group.throughput(Throughput::Bytes((size_kb * 1024) as u64));
        group.bench_with_input(
            BenchmarkId::new("read", format!("{size_kb}kb")),
            &wire,
            |b, wire| {
                b.iter(|| {
                    let mut reader = RecordReader::seekable(Cursor::new(wire.as_slice()));
                    reader.read_record().unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_read_hello, bench_read_throughput);
criterion_main!(benches);
