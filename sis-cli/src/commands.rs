use std::fs;

use log::info;
use sis_core::{SisReader, SisWriter};
use sis_types::{Layout, Shape};

use crate::{
    CliResult, ConvertConfig, FrameStats, HeaderReport, InfoConfig, SplitConfig, WriteReport,
};

/// `sis info`: читает только заголовок и размер файла.
pub fn run_info(cfg: &InfoConfig) -> CliResult<HeaderReport> {
    cfg.validate()?;

    let header = sis_core::read_sis_header(&cfg.input_path, cfg.header_len)?;
    let file_len = fs::metadata(&cfg.input_path)?.len();

    Ok(HeaderReport::new(
        cfg.input_path.clone(),
        header,
        cfg.header_len,
        file_len,
    ))
}

/// `sis split`: делит двойной кадр и пишет половины отдельными файлами.
pub fn run_split(cfg: &SplitConfig) -> CliResult<WriteReport> {
    cfg.validate()?;

    let reader = SisReader::new(cfg.read_options());
    let sis = reader.open(&cfg.input_path)?;
    let (top, bottom) = sis.halves();

    info!(
        "Splitting {} frame at row {}",
        sis.shape(),
        sis.shape().split_row()
    );

    let writer = SisWriter::new(cfg.write_options());
    writer.write(&cfg.top_path, top, Layout::Single)?;
    writer.write(&cfg.bottom_path, bottom, Layout::Single)?;

    Ok(WriteReport {
        outputs: vec![
            (cfg.top_path.clone(), Shape::from_dims(top.nrows(), top.ncols())?),
            (
                cfg.bottom_path.clone(),
                Shape::from_dims(bottom.nrows(), bottom.ncols())?,
            ),
        ],
        frames: vec![FrameStats::from_view(top), FrameStats::from_view(bottom)],
    })
}

/// `sis convert`: перечитывает кадр целиком и пишет с новой раскладкой.
pub fn run_convert(cfg: &ConvertConfig) -> CliResult<WriteReport> {
    cfg.validate()?;

    let reader = SisReader::new(cfg.read_options());
    let image = reader.read_image(&cfg.input_path)?;

    let writer = SisWriter::new(cfg.write_options());
    writer.write(&cfg.output_path, image.view(), cfg.layout)?;

    let (height, width) = image.dim();
    let out_shape = Shape::from_dims(height * cfg.layout.height_factor(), width)?;

    Ok(WriteReport {
        outputs: vec![(cfg.output_path.clone(), out_shape)],
        frames: vec![FrameStats::from_view(image.view())],
    })
}
