/// Log file persistence
///
/// One file per process start: `logs/tokenboard_<YYYY-MM-DD_HH-MM-SS>.log`.
/// Writes are buffered; `flush_file_logging` is called on shutdown.
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

static LOG_FILE: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

pub fn init_file_logging() {
    if !super::config::get_logger_config().file_logging {
        return;
    }

    let dir = crate::paths::get_logs_directory();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Failed to create logs directory {}: {}", dir.display(), e);
        return;
    }

    let name = format!("tokenboard_{}.log", chrono::Local::now().format("%Y-%m-%d_%H-%M-%S"));
    let path = dir.join(name);

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            *LOG_FILE.lock() = Some(BufWriter::new(file));
        }
        Err(e) => eprintln!("Failed to open log file {}: {}", path.display(), e),
    }
}

pub fn write_to_file(line: &str) {
    if let Some(writer) = LOG_FILE.lock().as_mut() {
        let _ = writeln!(writer, "{}", line);
    }
}

pub fn flush_file_logging() {
    if let Some(writer) = LOG_FILE.lock().as_mut() {
        let _ = writer.flush();
    }
}
