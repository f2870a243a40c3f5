//! Запись файла через временный `<path>.tmp` и rename.
//!
//! Читатель, опрашивающий путь (в том числе по медленной сетевой ФС), видит
//! либо старый файл, либо новый целиком.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::debug;
use sis_types::SisResult;

/// Путь временного файла: `<path>.tmp`.
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Пишет `data` в `<path>.tmp`, затем переименовывает поверх `path`.
///
/// Если не удалась запись во временный файл, `path` не трогается. Если не
/// удался rename, временный файл может остаться на диске.
pub fn write_atomic<P: AsRef<Path>>(
    path: P,
    data: &[u8],
) -> SisResult<()> {
    let path = path.as_ref();
    let tmp = tmp_path_for(path);

    debug!("Writing {} bytes to {}", data.len(), tmp.display());

    if let Err(e) = write_tmp(&tmp, data) {
        // Недописанный tmp никому не нужен; ошибку удаления игнорируем
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    rename_tmp_overwrite(&tmp, path)?;

    debug!("Renamed {} -> {}", tmp.display(), path.display());

    Ok(())
}

fn write_tmp(
    tmp: &Path,
    data: &[u8],
) -> io::Result<()> {
    let mut file = File::create(tmp)?;
    file.write_all(data)?;
    file.sync_all()
}

/// `fs::rename` заменяет существующий `dst` на всех платформах, так что
/// путь не исчезает ни на мгновение.
fn rename_tmp_overwrite(
    src: &Path,
    dst: &Path,
) -> io::Result<()> {
    fs::rename(src, dst)
}
