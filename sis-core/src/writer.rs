use std::path::Path;

use log::{debug, info};
use ndarray::{concatenate, Array2, ArrayView2, Axis};
use sis_types::{Layout, Shape, SisError, SisHeader, SisResult};

use crate::{
    atomic::write_atomic,
    binary::append_samples_le,
    clock::{Clock, SystemClock},
    format::SIS_HEADER_LEN,
    transform::{narrow_sample, thalammerize},
    SisHeaderExt,
};

/// Настройки записи.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Длина заголовка в байтах
    pub header_len: usize,
    /// Применять thalammerize перед записью
    pub thalammer: bool,
}

/// Писатель SIS файлов.
///
/// Время для заголовка берётся из `clock`; в тестах удобно подставлять
/// [`FixedClock`](crate::FixedClock).
#[derive(Debug, Clone)]
pub struct SisWriter<C: Clock = SystemClock> {
    options: WriteOptions,
    clock: C,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            header_len: SIS_HEADER_LEN,
            thalammer: true,
        }
    }
}

impl SisWriter<SystemClock> {
    pub fn new(options: WriteOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }
}

impl Default for SisWriter<SystemClock> {
    fn default() -> Self {
        Self::new(WriteOptions::default())
    }
}

impl<C: Clock> SisWriter<C> {
    pub fn with_clock(
        options: WriteOptions,
        clock: C,
    ) -> Self {
        Self { options, clock }
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Собирает полное содержимое файла в памяти: заголовок + выборки.
    pub fn encode(
        &self,
        image: ArrayView2<'_, f64>,
        layout: Layout,
    ) -> SisResult<Vec<u8>> {
        let mut assembled = assemble(image, layout)?;
        let (height, width) = assembled.dim();
        let shape = Shape::from_dims(height, width)?;

        let header = SisHeader::new(shape, &self.clock.now());
        let mut buf = Vec::with_capacity(self.options.header_len + shape.len() * 2);
        header.write_to(&mut buf, self.options.header_len)?;

        if self.options.thalammer {
            thalammerize(&mut assembled);
        }

        let samples: Vec<u16> = assembled.iter().map(|&v| narrow_sample(v)).collect();
        append_samples_le(&mut buf, &samples);

        debug!(
            "Encoded {shape} ({layout}, thalammer={}) into {} bytes",
            self.options.thalammer,
            buf.len()
        );

        Ok(buf)
    }

    /// Кодирует кадр и атомарно записывает его в `path`.
    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
        image: ArrayView2<'_, f64>,
        layout: Layout,
    ) -> SisResult<()> {
        let path = path.as_ref();
        let bytes = self.encode(image, layout)?;

        write_atomic(path, &bytes)?;

        info!("sis written to {}", path.display());

        Ok(())
    }
}

/// Раскладывает кадр по «двойному» изображению согласно `layout`.
pub fn assemble(
    image: ArrayView2<'_, f64>,
    layout: Layout,
) -> SisResult<Array2<f64>> {
    if image.is_empty() {
        let (h, w) = image.dim();
        return Err(SisError::invalid_shape(format!("{h}x{w} image is empty")));
    }

    let zeros = Array2::<f64>::zeros(image.raw_dim());

    let stacked = match layout {
        Layout::Single => return Ok(image.to_owned()),
        Layout::Top => concatenate(Axis(0), &[image.view(), zeros.view()]),
        Layout::Bottom => concatenate(Axis(0), &[zeros.view(), image.view()]),
        Layout::Double => concatenate(Axis(0), &[image, image]),
    };

    stacked.map_err(|e| SisError::invalid_shape(e.to_string()))
}

/// Записывает кадр с настройками по умолчанию (заголовок 512 байт,
/// системное время).
pub fn write_sis<P: AsRef<Path>>(
    path: P,
    image: &Array2<f64>,
    layout: Layout,
    thalammer: bool,
) -> SisResult<()> {
    SisWriter::new(WriteOptions {
        thalammer,
        ..WriteOptions::default()
    })
    .write(path, image.view(), layout)
}
