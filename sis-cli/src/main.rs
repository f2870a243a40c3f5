use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{error, info};
use sis_cli::{
    run_convert, run_info, run_split, ConvertConfig, InfoConfig, SplitConfig, WriteReport,
};
use sis_core::SIS_HEADER_LEN;
use sis_types::Layout;

#[derive(Parser, Debug)]
#[command(
    name = "sis",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect, split and rewrite .sis camera image files",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Тихий режим (только ошибки)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Подробный вывод (debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Показать заголовок файла
    Info {
        /// Путь к .sis файлу
        input: PathBuf,
        /// Длина заголовка, байт
        #[arg(long, default_value_t = SIS_HEADER_LEN)]
        header_len: usize,
    },
    /// Разделить двойной кадр на два файла
    Split {
        /// Исходный .sis файл
        input: PathBuf,
        /// Файл для верхней половины
        #[arg(long)]
        top: PathBuf,
        /// Файл для нижней половины
        #[arg(long)]
        bottom: PathBuf,
        /// Длина заголовка, байт
        #[arg(long, default_value_t = SIS_HEADER_LEN)]
        header_len: usize,
    },
    /// Перезаписать кадр с другой раскладкой
    Convert {
        /// Исходный .sis файл
        input: PathBuf,
        /// Выходной .sis файл
        output: PathBuf,
        /// Раскладка: single, top, bottom, double
        #[arg(short, long, default_value = "double")]
        layout: Layout,
        /// Не применять thalammerize
        #[arg(long)]
        no_thalammer: bool,
        /// Длина заголовка, байт
        #[arg(long, default_value_t = SIS_HEADER_LEN)]
        header_len: usize,
    },
}

fn print_write_report(report: &WriteReport) {
    for stats in &report.frames {
        info!("  Frame         : {stats}");
    }
    for (path, shape) in &report.outputs {
        info!("✓ Written: {path:?} ({shape})");
    }
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    let result = match cli.command {
        Command::Info { input, header_len } => run_info(&InfoConfig {
            input_path: input,
            header_len,
        })
        .map(|report| {
            // Сводка идёт в stdout, логи — в stderr
            println!("{report}");
        }),

        Command::Split {
            input,
            top,
            bottom,
            header_len,
        } => run_split(&SplitConfig {
            input_path: input,
            top_path: top,
            bottom_path: bottom,
            header_len,
            verbose: cli.verbose,
        })
        .map(|report| print_write_report(&report)),

        Command::Convert {
            input,
            output,
            layout,
            no_thalammer,
            header_len,
        } => run_convert(&ConvertConfig {
            input_path: input,
            output_path: output,
            layout,
            thalammer: !no_thalammer,
            header_len,
            verbose: cli.verbose,
        })
        .map(|report| print_write_report(&report)),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}
