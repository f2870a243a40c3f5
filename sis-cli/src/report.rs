use std::path::PathBuf;

use ndarray::ArrayView2;
use sis_core::SisHeaderExt;
use sis_types::{Shape, SisHeader};

/// Сводка по заголовку для `sis info`.
#[derive(Debug, Clone)]
pub struct HeaderReport {
    pub path: PathBuf,
    pub header: SisHeader,
    pub header_len: usize,
    pub file_len: u64,
    /// Выборок после заголовка (может быть больше, чем `shape.len()`)
    pub payload_samples: u64,
}

/// Простая статистика по кадру: min / max / mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub rows: usize,
    pub cols: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Итог `sis split` / `sis convert`.
#[derive(Debug, Clone)]
pub struct WriteReport {
    pub outputs: Vec<(PathBuf, Shape)>,
    pub frames: Vec<FrameStats>,
}

impl HeaderReport {
    pub fn new(
        path: PathBuf,
        header: SisHeader,
        header_len: usize,
        file_len: u64,
    ) -> Self {
        let payload_samples = file_len.saturating_sub(header_len as u64) / 2;

        Self {
            path,
            header,
            header_len,
            file_len,
            payload_samples,
        }
    }

    /// Хватает ли выборок после заголовка на заявленную форму.
    pub fn payload_complete(&self) -> bool {
        self.payload_samples >= self.header.shape.len() as u64
    }
}

impl FrameStats {
    pub fn from_view(frame: ArrayView2<'_, f64>) -> Self {
        let (rows, cols) = frame.dim();
        let n = frame.len();

        if n == 0 {
            return Self {
                rows,
                cols,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
            };
        }

        let min = frame.iter().copied().fold(f64::INFINITY, f64::min);
        let max = frame.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = frame.sum() / n as f64;

        Self {
            rows,
            cols,
            min,
            max,
            mean,
        }
    }
}

impl std::fmt::Display for HeaderReport {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let h = &self.header;
        let datetime = match h.datetime() {
            Some(t) => t.to_string(),
            None => "unparsed".to_string(),
        };

        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(f, "  File          : {:?}", self.path)?;
        writeln!(f, "  Size          : {} bytes", self.file_len)?;
        writeln!(f, "  Magic         : {:?}", h.magic)?;
        writeln!(
            f,
            "  Raw shape     : {:?} (sentinel: {})",
            h.raw_shape,
            h.has_depth_sentinel()
        )?;
        writeln!(f, "  Shape         : {}", h.shape)?;
        writeln!(f, "  Timestamp     : {:?} ({datetime})", h.timestamp)?;
        writeln!(
            f,
            "  Header        : {} bytes ({} tail)",
            self.header_len,
            h.tail.len()
        )?;
        writeln!(
            f,
            "  Payload       : {} samples ({})",
            self.payload_samples,
            if self.payload_complete() {
                "complete"
            } else {
                "TRUNCATED"
            }
        )?;
        write!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")
    }
}

impl std::fmt::Display for FrameStats {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}x{} min={:.0} max={:.0} mean={:.1}",
            self.rows, self.cols, self.min, self.max, self.mean
        )
    }
}
