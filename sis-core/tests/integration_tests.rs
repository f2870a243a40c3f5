use std::fs;

use chrono::NaiveDate;
use ndarray::Array2;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use sis_core::{
    read_sis, read_sis_full, read_sis_header, read_sis_image, tmp_path_for, FixedClock,
    ReadOptions, SisHeaderExt, SisRead, SisReader, SisWriter, WriteOptions, SIS_HEADER_LEN,
};
use sis_types::{Layout, Shape, SisError, SisHeader};
use tempfile::tempdir;

// ===========================================================================
// Helpers — детерминированные тест-данные
// ===========================================================================

fn fixed_clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 30, 45)
            .unwrap(),
    )
}

fn deterministic_writer(thalammer: bool) -> SisWriter<FixedClock> {
    SisWriter::with_clock(
        WriteOptions {
            thalammer,
            ..WriteOptions::default()
        },
        fixed_clock(),
    )
}

/// Пилообразный кадр: значения покрывают весь диапазон u16.
fn sawtooth_image(
    height: usize,
    width: usize,
) -> Array2<f64> {
    Array2::from_shape_fn((height, width), |(r, c)| {
        ((r * width + c) * 4099 % 65_536) as f64
    })
}

fn random_image(
    height: usize,
    width: usize,
    seed: u64,
) -> Array2<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    Array2::from_shape_fn((height, width), |_| rng.gen_range(0..=u16::MAX) as f64)
}

/// Собирает файл старого формата вручную: `[sentinel, h, w]` и кадр.
fn legacy_file(
    triplet: [u16; 3],
    samples: &[u16],
) -> Vec<u8> {
    let mut raw = vec![b'0'; SIS_HEADER_LEN];
    raw[0..8].copy_from_slice(b"SisV1.00");
    for (i, v) in triplet.iter().enumerate() {
        raw[8 + i * 2..10 + i * 2].copy_from_slice(&v.to_le_bytes());
    }
    raw[14..34].copy_from_slice(b"2011-11-11-T11:11:11");
    for v in samples {
        raw.extend_from_slice(&v.to_le_bytes());
    }
    raw
}

// ===========================================================================
// Test Vector #1 — побайтовая раскладка файла
// ===========================================================================

#[test]
fn test_vector_1_byte_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tv1.sis");
    let image = Array2::from_shape_vec((1, 2), vec![258.0, 65_535.0]).unwrap();

    deterministic_writer(false)
        .write(&path, image.view(), Layout::Double)
        .unwrap();

    let bytes = fs::read(&path).unwrap();

    assert_eq!(bytes.len(), SIS_HEADER_LEN + 2 * 2 * 2);
    assert_eq!(&bytes[0..8], b"SisV2.00", "magic");
    assert_eq!(&bytes[8..14], &[1, 0, 2, 0, 2, 0], "shape [1, 2, 2] LE");
    assert_eq!(&bytes[14..34], b"2024-01-01-T12:30:45", "timestamp");
    assert!(bytes[34..SIS_HEADER_LEN].iter().all(|&b| b == 0), "padding");
    // 258 = 0x0102
    assert_eq!(
        &bytes[SIS_HEADER_LEN..],
        &[0x02, 0x01, 0xFF, 0xFF, 0x02, 0x01, 0xFF, 0xFF],
        "pixels"
    );
}

#[test]
fn test_vector_1_deterministic() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.sis");
    let b = dir.path().join("b.sis");
    let image = sawtooth_image(8, 8);

    deterministic_writer(true)
        .write(&a, image.view(), Layout::Top)
        .unwrap();
    deterministic_writer(true)
        .write(&b, image.view(), Layout::Top)
        .unwrap();

    assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
}

// ===========================================================================
// Round-trip и раскладки
// ===========================================================================

#[test]
fn test_round_trip_single_no_transform() {
    let dir = tempdir().unwrap();

    for (i, (h, w)) in [(2, 2), (4, 7), (64, 33), (120, 160)].into_iter().enumerate() {
        let path = dir.path().join(format!("rt_{i}.sis"));
        let image = random_image(h, w, i as u64);

        deterministic_writer(false)
            .write(&path, image.view(), Layout::Single)
            .unwrap();

        let read = read_sis_image(&path).unwrap();
        assert_eq!(read, image, "shape {h}x{w}");
    }
}

#[test]
fn test_round_trip_extremes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("extremes.sis");
    let image = sawtooth_image(16, 16);

    deterministic_writer(false)
        .write(&path, image.view(), Layout::Single)
        .unwrap();

    match read_sis(&path, false).unwrap() {
        SisRead::Image(read) => assert_eq!(read, image),
        SisRead::Full(_) => panic!("expected the whole image"),
    }
}

#[test]
fn test_double_layout_split() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("double.sis");
    let image = random_image(10, 12, 7);

    deterministic_writer(false)
        .write(&path, image.view(), Layout::default())
        .unwrap();

    let frames = read_sis_full(&path).unwrap();

    assert_eq!(frames.top, image);
    assert_eq!(frames.bottom, image);
    assert_eq!(frames.shape, Shape::new(20, 12));
    assert_eq!(frames.timestamp, "2024-01-01-T12:30:45");
}

#[test]
fn test_top_slot_placement() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("top.sis");
    let image = random_image(6, 5, 11);

    deterministic_writer(false)
        .write(&path, image.view(), Layout::Top)
        .unwrap();

    let frames = read_sis_full(&path).unwrap();

    assert_eq!(frames.top, image);
    assert!(frames.bottom.iter().all(|&v| v == 0.0));
}

#[test]
fn test_bottom_slot_placement() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bottom.sis");
    let image = random_image(6, 5, 13);

    deterministic_writer(false)
        .write(&path, image.view(), Layout::Bottom)
        .unwrap();

    match read_sis(&path, true).unwrap() {
        SisRead::Full(frames) => {
            assert!(frames.top.iter().all(|&v| v == 0.0));
            assert_eq!(frames.bottom, image);
        }
        SisRead::Image(_) => panic!("expected split output"),
    }
}

#[test]
fn test_thalammer_applied_on_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("thal.sis");
    let image = Array2::from_shape_vec((1, 4), vec![0.0, 4.0, 8.0, 65_535.0]).unwrap();

    deterministic_writer(true)
        .write(&path, image.view(), Layout::Single)
        .unwrap();

    let read = read_sis_image(&path).unwrap();
    assert_eq!(read.as_slice().unwrap(), &[6_553.0, 32_768.0, 58_982.0, 65_535.0]);
}

#[test]
fn test_write_sis_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("defaults.sis");
    let image = Array2::<f64>::zeros((2, 2));

    sis_core::write_sis(&path, &image, Layout::Double, true).unwrap();

    let sis = SisReader::default().open(&path).unwrap();
    assert_eq!(sis.shape(), Shape::new(4, 2));
    assert!(sis.image.iter().all(|&v| v == 6_553.0));
    assert!(sis.header.datetime().is_some());
}

// ===========================================================================
// Legacy-формат
// ===========================================================================

#[test]
fn test_legacy_sentinel_files() {
    let dir = tempdir().unwrap();

    for sentinel in [1u16, 12_336] {
        let path = dir.path().join(format!("legacy_{sentinel}.sis"));
        fs::write(&path, legacy_file([sentinel, 2, 3], &[1, 2, 3, 4, 5, 6])).unwrap();

        let header = read_sis_header(&path, SIS_HEADER_LEN).unwrap();
        assert_eq!(header.shape, Shape::new(2, 3));
        assert_eq!(header.magic, "SisV1.00");
        assert_eq!(header.raw_shape, [sentinel, 2, 3]);

        let frames = read_sis_full(&path).unwrap();
        assert_eq!(frames.top.as_slice().unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(frames.bottom.as_slice().unwrap(), &[4.0, 5.0, 6.0]);
    }
}

#[test]
fn test_no_sentinel_uses_first_two_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nosentinel.sis");
    fs::write(&path, legacy_file([2, 2, 999], &[7, 8, 9, 10])).unwrap();

    let image = read_sis_image(&path).unwrap();
    assert_eq!(image.dim(), (2, 2));
    assert_eq!(image.as_slice().unwrap(), &[7.0, 8.0, 9.0, 10.0]);
}

#[test]
fn test_custom_header_len() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short_header.sis");
    let image = random_image(3, 3, 5);

    let writer = SisWriter::with_clock(
        WriteOptions {
            header_len: 64,
            thalammer: false,
        },
        fixed_clock(),
    );
    writer.write(&path, image.view(), Layout::Single).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 64 + 9 * 2);

    let reader = SisReader::new(ReadOptions {
        header_len: 64,
        verbose: true,
    });
    assert_eq!(reader.read_image(&path).unwrap(), image);
}

#[test]
fn test_odd_header_len_refused() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("odd_header.sis");
    let image = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();

    let writer = SisWriter::with_clock(
        WriteOptions {
            header_len: 65,
            thalammer: false,
        },
        fixed_clock(),
    );
    let result = writer.write(&path, image.view(), Layout::Single);

    assert!(matches!(result, Err(SisError::InvalidHeaderLength(65))));
    assert!(!path.exists());

    // Читатель тоже отказывается от нечётной длины
    deterministic_writer(false)
        .write(&path, image.view(), Layout::Single)
        .unwrap();
    let reader = SisReader::new(ReadOptions {
        header_len: 65,
        verbose: false,
    });
    assert!(matches!(
        reader.read_image(&path),
        Err(SisError::InvalidHeaderLength(65))
    ));
}

// ===========================================================================
// Ошибки
// ===========================================================================

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = read_sis_image(dir.path().join("absent.sis"));

    assert!(matches!(result, Err(SisError::Io(_))));
}

#[test]
fn test_truncated_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.sis");
    fs::write(&path, vec![0u8; 100]).unwrap();

    match read_sis_image(&path) {
        Err(SisError::TruncatedHeader { expected, found }) => {
            assert_eq!(expected, SIS_HEADER_LEN);
            assert_eq!(found, 100);
        }
        other => panic!("expected TruncatedHeader, got {other:?}"),
    }
}

#[test]
fn test_truncated_payload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cut.sis");
    let image = random_image(4, 4, 3);

    deterministic_writer(false)
        .write(&path, image.view(), Layout::Double)
        .unwrap();

    // Отрезаем последние 3 выборки
    let mut bytes = fs::read(&path).unwrap();
    bytes.truncate(bytes.len() - 6);
    fs::write(&path, &bytes).unwrap();

    match read_sis_full(&path) {
        Err(SisError::TruncatedPayload { expected, found }) => {
            assert_eq!(expected, 32);
            assert_eq!(found, 29);
        }
        other => panic!("expected TruncatedPayload, got {other:?}"),
    }
}

#[test]
fn test_zero_shape_is_invalid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("zero.sis");
    fs::write(&path, legacy_file([1, 0, 5], &[])).unwrap();

    assert!(matches!(
        read_sis_image(&path),
        Err(SisError::InvalidShape(_))
    ));
}

#[test]
fn test_write_empty_image_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.sis");
    let image = Array2::<f64>::zeros((0, 0));

    let result = deterministic_writer(false).write(&path, image.view(), Layout::Single);

    assert!(matches!(result, Err(SisError::InvalidShape(_))));
    assert!(!path.exists());
}

// ===========================================================================
// Атомарная запись
// ===========================================================================

#[test]
fn test_interrupted_write_keeps_previous_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shot.sis");
    let old = random_image(4, 4, 21);

    deterministic_writer(false)
        .write(&path, old.view(), Layout::Single)
        .unwrap();
    let before = fs::read(&path).unwrap();

    // tmp-путь занят каталогом: запись прерывается до rename
    fs::create_dir(tmp_path_for(&path)).unwrap();
    let new = random_image(4, 4, 22);
    let result = deterministic_writer(false).write(&path, new.view(), Layout::Single);

    assert!(matches!(result, Err(SisError::Io(_))));
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(read_sis_image(&path).unwrap(), old);
}

#[test]
fn test_overwrite_leaves_no_tmp() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shot.sis");

    for seed in 0..3 {
        deterministic_writer(false)
            .write(&path, random_image(2, 2, seed).view(), Layout::Double)
            .unwrap();
    }

    assert!(!tmp_path_for(&path).exists());
    assert_eq!(
        read_sis_full(&path).unwrap().top,
        random_image(2, 2, 2)
    );
}

#[test]
fn test_header_round_trip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hdr.sis");
    let header = SisHeader::new(Shape::new(2, 1), &fixed_clock().0);

    let mut bytes = header.serialize(SIS_HEADER_LEN).unwrap();
    bytes.extend_from_slice(&[1, 0, 2, 0]);
    fs::write(&path, bytes).unwrap();

    let parsed = read_sis_header(&path, SIS_HEADER_LEN).unwrap();
    assert_eq!(parsed.shape, header.shape);
    assert_eq!(parsed.timestamp, header.timestamp);
    assert_eq!(parsed.datetime(), Some(fixed_clock().0));
}
