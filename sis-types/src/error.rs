use thiserror::Error;

/// Результат для операций SIS
pub type SisResult<T> = std::result::Result<T, SisError>;

/// Типы ошибок формата SIS.
#[derive(Debug, Error)]
pub enum SisError {
    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Файл короче заголовка (в байтах)
    #[error("Truncated header: expected {expected} bytes, found {found}")]
    TruncatedHeader { expected: usize, found: usize },

    /// После заголовка не хватает выборок (в u16 выборках)
    #[error("Truncated payload: expected {expected} samples, found {found}")]
    TruncatedPayload { expected: usize, found: usize },

    /// Нулевая, слишком большая или несовместимая размерность
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Длина заголовка меньше суммы фиксированных полей или нечётная
    #[error("Invalid header length: {0} bytes")]
    InvalidHeaderLength(usize),
}

impl SisError {
    /// Удобный конструктор
    pub fn invalid_shape<S: Into<String>>(s: S) -> Self {
        Self::InvalidShape(s.into())
    }
}
