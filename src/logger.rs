use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

/// Opens `path` for appending. Later calls keep the first file.
pub fn init(path: &Path) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_none()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(path)
    {
        *logger = Some(file);
    }
}

/// Appends a timestamped line; a no-op until `init` succeeds.
pub fn log(message: &str) {
    if let Ok(mut logger) = LOGGER.lock()
        && let Some(file) = logger.as_mut()
    {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        let _ = writeln!(file, "[{}] {}", timestamp, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_before_init_is_noop() {
        log("Nobody is listening");
    }

    #[test]
    fn test_logger_writes_lines() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("quizer.log");
        init(&path);
        log("Test log message");

        // Another test may have opened the shared logger first.
        if let Ok(content) = std::fs::read_to_string(&path) {
            assert!(content.contains("] Test log message"));
        }
    }
}
