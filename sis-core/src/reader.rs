use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::Path,
};

use log::{debug, info};
use ndarray::{s, Array2, ArrayView2};
use sis_types::{Shape, SisError, SisHeader, SisResult};

use crate::{binary::samples_from_le_bytes, format::SIS_HEADER_LEN, SisHeaderExt};

/// Настройки чтения.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Длина заголовка в байтах
    pub header_len: usize,
    /// Сообщать об открытии файла на уровне info (иначе debug)
    pub verbose: bool,
}

/// Прочитанный SIS файл: весь кадр и его заголовок.
///
/// Кадр принадлежит структуре. Половины можно получить как копии
/// ([`SisImage::split`]) или как срезы без копирования ([`SisImage::halves`]).
#[derive(Debug, Clone)]
pub struct SisImage {
    /// Весь кадр (height × width), обе половины вместе
    pub image: Array2<f64>,
    /// Заголовок файла
    pub header: SisHeader,
}

/// Кадр, разделённый на верхнюю и нижнюю половины.
#[derive(Debug, Clone, PartialEq)]
pub struct SisFrames {
    /// Строки `[0, height/2)`
    pub top: Array2<f64>,
    /// Строки `[height/2, height)`
    pub bottom: Array2<f64>,
    /// Форма всего кадра из заголовка
    pub shape: Shape,
    /// Метка времени из заголовка
    pub timestamp: String,
}

/// Результат [`read_sis`]: весь кадр или две половины.
#[derive(Debug, Clone)]
pub enum SisRead {
    Image(Array2<f64>),
    Full(SisFrames),
}

/// Читатель SIS файлов с заданными настройками.
#[derive(Debug, Clone, Default)]
pub struct SisReader {
    options: ReadOptions,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            header_len: SIS_HEADER_LEN,
            verbose: false,
        }
    }
}

impl SisImage {
    pub fn shape(&self) -> Shape {
        self.header.shape
    }

    pub fn timestamp(&self) -> &str {
        &self.header.timestamp
    }

    /// Верхняя и нижняя половины без копирования.
    pub fn halves(&self) -> (ArrayView2<'_, f64>, ArrayView2<'_, f64>) {
        let mid = self.header.shape.split_row();
        (
            self.image.slice(s![..mid, ..]),
            self.image.slice(s![mid.., ..]),
        )
    }

    /// Верхняя и нижняя половины как независимые копии.
    pub fn split(&self) -> (Array2<f64>, Array2<f64>) {
        let (top, bottom) = self.halves();
        (top.to_owned(), bottom.to_owned())
    }

    pub fn into_frames(self) -> SisFrames {
        let (top, bottom) = self.split();
        SisFrames {
            top,
            bottom,
            shape: self.header.shape,
            timestamp: self.header.timestamp,
        }
    }
}

impl SisReader {
    pub fn new(options: ReadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Читает только заголовок.
    pub fn read_header<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> SisResult<SisHeader> {
        let mut file = File::open(path.as_ref())?;
        SisHeader::read_from(&mut file, self.options.header_len)
    }

    /// Читает заголовок и весь кадр.
    pub fn open<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> SisResult<SisImage> {
        let path = path.as_ref();

        if self.options.verbose {
            info!("Opening {}", path.display());
        } else {
            debug!("Opening {}", path.display());
        }

        let mut file = File::open(path)?;
        let header = SisHeader::read_from(&mut file, self.options.header_len)?;

        // Второй проход по файлу целиком, независимо от разбора заголовка
        file.seek(SeekFrom::Start(0))?;
        let mut raw = Vec::new();
        file.read_to_end(&mut raw)?;

        let image = decode_payload(&raw, header.shape, self.options.header_len)?;

        Ok(SisImage { image, header })
    }

    /// Весь кадр, без деления на половины.
    pub fn read_image<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> SisResult<Array2<f64>> {
        Ok(self.open(path)?.image)
    }

    /// Две половины кадра, форма и метка времени.
    pub fn read_full<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> SisResult<SisFrames> {
        Ok(self.open(path)?.into_frames())
    }

    pub fn read<P: AsRef<Path>>(
        &self,
        path: P,
        full_output: bool,
    ) -> SisResult<SisRead> {
        if full_output {
            self.read_full(path).map(SisRead::Full)
        } else {
            self.read_image(path).map(SisRead::Image)
        }
    }
}

/// Собирает кадр из содержимого файла целиком.
///
/// Выборки выравниваются от начала файла, кадром считаются последние
/// `shape.len()` выборок. После заголовка их должно быть не меньше.
pub fn decode_payload(
    raw: &[u8],
    shape: Shape,
    header_len: usize,
) -> SisResult<Array2<f64>> {
    if shape.is_empty() {
        return Err(SisError::invalid_shape(format!(
            "declared shape {shape} has a zero dimension"
        )));
    }

    let expected = shape.len();
    let available = raw.len().saturating_sub(header_len) / 2;

    if available < expected {
        return Err(SisError::TruncatedPayload {
            expected,
            found: available,
        });
    }

    let total = raw.len() / 2;
    let start = (total - expected) * 2;
    let samples = samples_from_le_bytes(&raw[start..start + expected * 2]);
    let data: Vec<f64> = samples.into_iter().map(f64::from).collect();

    Array2::from_shape_vec(shape.dims(), data).map_err(|e| SisError::invalid_shape(e.to_string()))
}

/// Читает SIS файл с настройками по умолчанию.
///
/// `full_output = false` — весь кадр, `true` — половины, форма и время.
pub fn read_sis<P: AsRef<Path>>(
    path: P,
    full_output: bool,
) -> SisResult<SisRead> {
    SisReader::default().read(path, full_output)
}

/// Convenience: весь кадр.
pub fn read_sis_image<P: AsRef<Path>>(path: P) -> SisResult<Array2<f64>> {
    SisReader::default().read_image(path)
}

/// Convenience: половины кадра.
pub fn read_sis_full<P: AsRef<Path>>(path: P) -> SisResult<SisFrames> {
    SisReader::default().read_full(path)
}

/// Читает только заголовок длиной `header_len`.
pub fn read_sis_header<P: AsRef<Path>>(
    path: P,
    header_len: usize,
) -> SisResult<SisHeader> {
    SisReader::new(ReadOptions {
        header_len,
        ..ReadOptions::default()
    })
    .read_header(path)
}
