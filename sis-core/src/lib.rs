//! Библиотека формата SIS
//!
//! Эталонная реализация чтения и записи файлов SIS: 16-битные кадры
//! научных камер с фиксированным 512-байтным заголовком.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use ndarray::Array2;
//! use sis_core::{read_sis_full, write_sis};
//! use sis_types::Layout;
//!
//! let image = Array2::<f64>::zeros((480, 640));
//! write_sis("shot.sis", &image, Layout::Top, false)?;
//!
//! let frames = read_sis_full("shot.sis")?;
//! assert_eq!(frames.top, image);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod atomic;
pub mod binary;
pub mod clock;
pub mod format;
pub mod reader;
pub mod transform;
pub mod writer;

pub use atomic::*;
pub use binary::*;
pub use clock::*;
pub use format::*;
pub use reader::*;
pub use transform::*;
pub use writer::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
