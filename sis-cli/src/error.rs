use thiserror::Error;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Некорректные аргументы
    #[error("Config error: {0}")]
    Config(String),

    /// Ошибка записи/чтения файла
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка формата SIS
    #[error("SIS error: {0}")]
    Sis(#[from] sis_types::SisError),
}
