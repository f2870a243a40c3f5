//! Пример: запись SIS-файла через SisWriter
//!
//! Демонстрирует:
//! - синтетический кадр (гауссово пятно)
//! - раскладку в верхний слот двойного изображения
//! - атомарную запись через `<path>.tmp`

use ndarray::Array2;
use sis_core::{SisWriter, WriteOptions};
use sis_types::Layout;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = "sis-core/test_output.sis";

    // --- Синтетический кадр: пятно в центре ---
    let (height, width) = (240usize, 320usize);
    let (cy, cx) = (height as f64 / 2.0, width as f64 / 2.0);
    let sigma = 25.0_f64;

    let image = Array2::from_shape_fn((height, width), |(y, x)| {
        let r2 = (y as f64 - cy).powi(2) + (x as f64 - cx).powi(2);
        60_000.0 * (-r2 / (2.0 * sigma * sigma)).exp()
    });

    // --- Без thalammerize: значения уже в диапазоне u16 ---
    let writer = SisWriter::new(WriteOptions {
        thalammer: false,
        ..WriteOptions::default()
    });
    writer.write(output_path, image.view(), Layout::Top)?;

    println!("✓ Записано: {output_path}");
    println!("  Frame    : {height}x{width}");
    println!("  On disk  : {}x{width} (top slot)", height * 2);

    Ok(())
}
