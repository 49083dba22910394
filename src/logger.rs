use std::fs;
use std::path::PathBuf;

const LOG_FILE: &str = "tickerline-current.log";

/// Crates that flood the log at debug level.
const QUIET_TARGETS: [&str; 6] = [
    "wgpu",
    "wgpu_core",
    "wgpu_hal",
    "naga",
    "iced_wgpu",
    "cosmic_text",
];

pub fn setup(is_debug: bool) -> Result<PathBuf, fern::InitError> {
    let log_level = if is_debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let log_path = data::data_path(Some(LOG_FILE));
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}:{} [{}:{}] -- {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
                message
            ));
        })
        .level(log_level);

    for target in QUIET_TARGETS {
        dispatch = dispatch.level_for(target, log::LevelFilter::Warn);
    }

    dispatch
        .chain(std::io::stdout())
        .chain(fern::log_file(&log_path)?)
        .apply()?;

    Ok(log_path)
}
