use crate::Shape;

/// Заголовок SIS файла (фиксированный размер, по умолчанию 512 байт)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SisHeader {
    /// Метка формата и версии, например "SisV2.00"
    pub magic: String,
    /// Три u16 ровно в том виде, в каком они лежат в файле
    pub raw_shape: [u16; 3],
    /// Размер кадра после разбора legacy-сентинела
    pub shape: Shape,
    /// Время записи в формате "YYYY-MM-DD-THH:MM:SS"
    pub timestamp: String,
    /// Остаток заголовка после фиксированных полей (непрозрачные байты)
    pub tail: Vec<u8>,
}
