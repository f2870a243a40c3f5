use std::path::PathBuf;

use sis_core::{ReadOptions, WriteOptions, SIS_HEADER_FIELDS_LEN, SIS_HEADER_LEN};
use sis_types::Layout;

use crate::{CliError, CliResult};

/// Параметры `sis info`.
#[derive(Debug, Clone)]
pub struct InfoConfig {
    /// Путь к .sis файлу
    pub input_path: PathBuf,
    /// Длина заголовка (байт)
    pub header_len: usize,
}

/// Параметры `sis split`.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Исходный двойной .sis файл
    pub input_path: PathBuf,
    /// Куда записать верхнюю половину
    pub top_path: PathBuf,
    /// Куда записать нижнюю половину
    pub bottom_path: PathBuf,
    /// Длина заголовка (байт)
    pub header_len: usize,
    /// Сообщать об открытии файлов
    pub verbose: bool,
}

/// Параметры `sis convert`.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Исходный .sis файл
    pub input_path: PathBuf,
    /// Выходной .sis файл
    pub output_path: PathBuf,
    /// Размещение кадра в выходном файле
    pub layout: Layout,
    /// Применять thalammerize
    pub thalammer: bool,
    /// Длина заголовка (байт), одинаковая для входа и выхода
    pub header_len: usize,
    /// Сообщать об открытии файлов
    pub verbose: bool,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl InfoConfig {
    pub fn validate(&self) -> CliResult<()> {
        check_header_len(self.header_len)
    }
}

impl SplitConfig {
    pub fn validate(&self) -> CliResult<()> {
        check_header_len(self.header_len)?;

        if self.top_path == self.bottom_path {
            return Err(CliError::Config(format!(
                "--top and --bottom point to the same file {:?}",
                self.top_path
            )));
        }

        Ok(())
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            header_len: self.header_len,
            verbose: self.verbose,
        }
    }

    /// Половины пишутся как есть: без дублирования и без перекодировки.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            header_len: self.header_len,
            thalammer: false,
        }
    }
}

impl ConvertConfig {
    pub fn validate(&self) -> CliResult<()> {
        check_header_len(self.header_len)
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            header_len: self.header_len,
            verbose: self.verbose,
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            header_len: self.header_len,
            thalammer: self.thalammer,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input.sis"),
            output_path: PathBuf::from("output.sis"),
            layout: Layout::default(),
            thalammer: true,
            header_len: SIS_HEADER_LEN,
            verbose: false,
        }
    }
}

fn check_header_len(header_len: usize) -> CliResult<()> {
    if header_len < SIS_HEADER_FIELDS_LEN {
        return Err(CliError::Config(format!(
            "--header-len {header_len} is shorter than the fixed fields ({SIS_HEADER_FIELDS_LEN} bytes)"
        )));
    }
    if header_len % 2 != 0 {
        return Err(CliError::Config(format!(
            "--header-len {header_len} must be even"
        )));
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
