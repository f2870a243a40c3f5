//! Пример: чтение SIS-файла через SisReader
//!
//! Демонстрирует:
//! - разбор заголовка (включая legacy-сентинел)
//! - деление кадра на половины без копирования

use sis_core::{ReadOptions, SisHeaderExt, SisReader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input_path = "sis-core/test_output.sis";

    let reader = SisReader::new(ReadOptions {
        verbose: true,
        ..ReadOptions::default()
    });

    let sis = match reader.open(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("✗ Read failed: {e}");
            return Err(Box::new(e));
        }
    };

    let h = &sis.header;
    println!("✓ Header parsed");
    println!("  Magic         : {}", h.magic);
    println!("  Raw shape     : {:?}", h.raw_shape);
    println!("  Sentinel      : {}", h.has_depth_sentinel());
    println!("  Shape         : {}", h.shape);
    println!("  Timestamp     : {}", h.timestamp);

    let (top, bottom) = sis.halves();
    let top_max = top.iter().copied().fold(f64::MIN, f64::max);
    let bottom_max = bottom.iter().copied().fold(f64::MIN, f64::max);

    println!("\n✓ Frames");
    println!("  Top    : {:?}, max {top_max}", top.dim());
    println!("  Bottom : {:?}, max {bottom_max}", bottom.dim());

    Ok(())
}
