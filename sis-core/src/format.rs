//! Спецификация формата файлов SIS версия 2.00
//!
//! Фиксированный заголовок, за которым следуют 16-битные выборки кадра.
//! Все многобайтовые числа хранятся в порядке little-endian.
//!
//! ```text
//! [0..8]    MAGIC      "SisV2.00"
//! [8..14]   SHAPE      3 × u16 — [depth|sentinel, height, width]
//! [14..34]  TIMESTAMP  "YYYY-MM-DD-THH:MM:SS"
//! [34..H]   PADDING    нули, H = длина заголовка (512)
//! [H..]     PIXELS     u16 выборки, построчно
//! ```

use std::io::{Read, Write};

use chrono::NaiveDateTime;
use log::{debug, warn};
use sis_types::{Shape, SisError, SisHeader, SisResult};

use crate::binary::{read_text, read_u16_le, write_text, write_u16_le};

/// Мажорная версия формата
pub const SIS_VERSION_MAJOR: u8 = 2;

/// Минорная версия формата (в метке дополняется нулями до 2 символов)
pub const SIS_VERSION_MINOR: u8 = 0;

/// Метка формата и версии: b"SisV2.00"
pub const SIS_MAGIC: [u8; SIS_MAGIC_LEN] = *b"SisV2.00";

/// Длина заголовка по умолчанию (512 байт)
pub const SIS_HEADER_LEN: usize = 512;

pub const SIS_MAGIC_LEN: usize = 8;
pub const SIS_SHAPE_LEN: usize = 6;
pub const SIS_TIMESTAMP_LEN: usize = 20;

/// Сумма фиксированных полей: 8 + 6 + 20 = 34 байта
pub const SIS_HEADER_FIELDS_LEN: usize = SIS_MAGIC_LEN + SIS_SHAPE_LEN + SIS_TIMESTAMP_LEN;

/// Значения глубины в первом слоте, после которых идут (height, width).
///
/// 12336 = 0x3030, т.е. ASCII "00" в старых файлах.
pub const SIS_DEPTH_SENTINELS: [u16; 2] = [1, 12_336];

/// Глубина, которую пишет кодер
pub const SIS_DEPTH: u16 = 1;

/// Формат метки времени (ровно 20 символов)
pub const SIS_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-T%H:%M:%S";

/// Кодирование/декодирование заголовка SIS.
pub trait SisHeaderExt: Sized {
    /// Заголовок текущей версии для кадра `shape`, записанного в `timestamp`.
    fn new(
        shape: Shape,
        timestamp: &NaiveDateTime,
    ) -> Self;

    /// Сериализация заголовка ровно в `header_len` байт.
    fn serialize(
        &self,
        header_len: usize,
    ) -> SisResult<Vec<u8>>;

    /// Десериализация заголовка; длина заголовка = `buf.len()`.
    fn deserialize(buf: &[u8]) -> SisResult<Self>;

    /// Пишет заголовок в `sink`, сдвигая курсор ровно на `header_len` байт.
    fn write_to<W: Write>(
        &self,
        sink: &mut W,
        header_len: usize,
    ) -> SisResult<()>;

    /// Читает `header_len` байт из `source` и разбирает их.
    fn read_from<R: Read>(
        source: &mut R,
        header_len: usize,
    ) -> SisResult<Self>;

    /// Метка времени как дата, если она в стандартном формате.
    fn datetime(&self) -> Option<NaiveDateTime>;

    /// `true`, если первый слот формы — legacy-сентинел глубины.
    fn has_depth_sentinel(&self) -> bool;
}

impl SisHeaderExt for SisHeader {
    fn new(
        shape: Shape,
        timestamp: &NaiveDateTime,
    ) -> Self {
        SisHeader {
            magic: sis_magic(),
            raw_shape: [SIS_DEPTH, shape.height, shape.width],
            shape,
            timestamp: format_timestamp(timestamp),
            tail: Vec::new(),
        }
    }

    fn serialize(
        &self,
        header_len: usize,
    ) -> SisResult<Vec<u8>> {
        check_header_len(header_len)?;

        let mut buf = vec![0u8; header_len];
        let mut off = 0;

        write_text(&mut buf, &mut off, self.magic.as_bytes(), SIS_MAGIC_LEN);

        for v in self.raw_shape {
            write_u16_le(&mut buf, &mut off, v);
        }

        write_text(
            &mut buf,
            &mut off,
            self.timestamp.as_bytes(),
            SIS_TIMESTAMP_LEN,
        );

        // [34..header_len] — tail, остаток уже нули
        let rest = header_len - off;
        write_text(&mut buf, &mut off, &self.tail, rest);

        Ok(buf)
    }

    fn deserialize(buf: &[u8]) -> SisResult<Self> {
        check_header_len(buf.len())?;

        let mut off = 0;

        let magic = read_text(buf, &mut off, SIS_MAGIC_LEN);

        let mut raw_shape = [0u16; 3];
        for v in raw_shape.iter_mut() {
            *v = read_u16_le(buf, &mut off);
        }

        let timestamp = read_text(buf, &mut off, SIS_TIMESTAMP_LEN);
        let tail = buf[off..].to_vec();
        let shape = decode_shape(raw_shape);

        debug!("SIS header: magic={magic:?} raw_shape={raw_shape:?} shape={shape}");

        Ok(SisHeader {
            magic,
            raw_shape,
            shape,
            timestamp,
            tail,
        })
    }

    fn write_to<W: Write>(
        &self,
        sink: &mut W,
        header_len: usize,
    ) -> SisResult<()> {
        sink.write_all(&self.serialize(header_len)?)?;
        Ok(())
    }

    fn read_from<R: Read>(
        source: &mut R,
        header_len: usize,
    ) -> SisResult<Self> {
        check_header_len(header_len)?;

        let mut buf = Vec::with_capacity(header_len);
        source.take(header_len as u64).read_to_end(&mut buf)?;

        if buf.len() < header_len {
            return Err(SisError::TruncatedHeader {
                expected: header_len,
                found: buf.len(),
            });
        }

        Self::deserialize(&buf)
    }

    fn datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, SIS_TIMESTAMP_FORMAT).ok()
    }

    fn has_depth_sentinel(&self) -> bool {
        SIS_DEPTH_SENTINELS.contains(&self.raw_shape[0])
    }
}

/// Метка текущей версии: "SisV" + major + "." + minor (2 цифры).
pub fn sis_magic() -> String {
    format!("SisV{SIS_VERSION_MAJOR}.{SIS_VERSION_MINOR:02}")
}

/// Форматирует время как "YYYY-MM-DD-THH:MM:SS".
pub fn format_timestamp(t: &NaiveDateTime) -> String {
    t.format(SIS_TIMESTAMP_FORMAT).to_string()
}

/// Приводит три u16 из заголовка к (height, width).
///
/// Сентинел в первом слоте отбрасывается. Без сентинела форма берётся из
/// первых двух значений.
pub fn decode_shape(raw: [u16; 3]) -> Shape {
    if SIS_DEPTH_SENTINELS.contains(&raw[0]) {
        Shape::new(raw[1], raw[2])
    } else {
        warn!(
            "SIS shape {raw:?} has no depth sentinel, using ({}, {})",
            raw[0], raw[1]
        );
        Shape::new(raw[0], raw[1])
    }
}

/// Заголовок не короче фиксированных полей и чётной длины: выборки
/// выравниваются от начала файла.
fn check_header_len(header_len: usize) -> SisResult<()> {
    if header_len < SIS_HEADER_FIELDS_LEN || header_len % 2 != 0 {
        return Err(SisError::InvalidHeaderLength(header_len));
    }
    Ok(())
}
