use byteorder::{ByteOrder, LittleEndian};

pub fn write_u16_le(
    buf: &mut [u8],
    off: &mut usize,
    val: u16,
) {
    LittleEndian::write_u16(&mut buf[*off..*off + 2], val);
    *off += 2;
}

/// Копирует `text` в поле фиксированной длины `len`.
///
/// Лишние байты обрезаются, недостающие остаются нулями.
pub fn write_text(
    buf: &mut [u8],
    off: &mut usize,
    text: &[u8],
    len: usize,
) {
    let n = text.len().min(len);
    buf[*off..*off + n].copy_from_slice(&text[..n]);
    *off += len;
}

/// Дописывает выборки в `buf` как u16 little-endian.
pub fn append_samples_le(
    buf: &mut Vec<u8>,
    samples: &[u16],
) {
    let start = buf.len();
    buf.resize(start + samples.len() * 2, 0);
    LittleEndian::write_u16_into(samples, &mut buf[start..]);
}
