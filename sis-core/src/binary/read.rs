use byteorder::{ByteOrder, LittleEndian};

pub fn read_u16_le(
    buf: &[u8],
    off: &mut usize,
) -> u16 {
    let v = LittleEndian::read_u16(&buf[*off..*off + 2]);
    *off += 2;
    v
}

/// Читает `len` байт как текст (невалидный UTF-8 заменяется на U+FFFD).
pub fn read_text(
    buf: &[u8],
    off: &mut usize,
    len: usize,
) -> String {
    let text = String::from_utf8_lossy(&buf[*off..*off + len]).into_owned();
    *off += len;
    text
}

/// Раскладывает байты в u16 little-endian выборки.
///
/// Нечётный последний байт отбрасывается.
pub fn samples_from_le_bytes(bytes: &[u8]) -> Vec<u16> {
    let mut samples = vec![0u16; bytes.len() / 2];
    LittleEndian::read_u16_into(&bytes[..samples.len() * 2], &mut samples);
    samples
}
