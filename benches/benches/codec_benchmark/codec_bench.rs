use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array2;
use sis_core::{thalammerize, FixedClock, SisReader, SisWriter, WriteOptions};
use sis_types::Layout;

fn frame(
    height: usize,
    width: usize,
) -> Array2<f64> {
    Array2::from_shape_fn((height, width), |(r, c)| ((r * 31 + c * 7) % 65_536) as f64)
}

fn writer() -> SisWriter<FixedClock> {
    let t = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    SisWriter::with_clock(WriteOptions::default(), FixedClock(t))
}

fn bench_thalammerize(c: &mut Criterion) {
    let mut group = c.benchmark_group("thalammerize");

    for &(h, w) in &[(256usize, 256usize), (1024, 1024)] {
        let image = frame(h, w);
        group.throughput(Throughput::Elements((h * w) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{h}x{w}")), &image, |b, img| {
            b.iter(|| {
                let mut copy = img.clone();
                thalammerize(&mut copy);
                copy
            })
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let writer = writer();
    let image = frame(512, 512);

    group.throughput(Throughput::Bytes((512 * 512 * 2 * 2) as u64));
    for layout in [Layout::Single, Layout::Double] {
        group.bench_with_input(BenchmarkId::from_parameter(layout), &layout, |b, &layout| {
            b.iter(|| writer.encode(image.view(), layout).unwrap())
        });
    }

    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.sis");
    writer()
        .write(&path, frame(1024, 1024).view(), Layout::Double)
        .unwrap();

    let reader = SisReader::default();

    c.bench_function("read_full_1024x1024", |b| {
        b.iter(|| reader.read_full(&path).unwrap())
    });
}

criterion_group!(benches, bench_thalammerize, bench_encode, bench_read);
criterion_main!(benches);
