//! Simple log file writer with timestamps

use crate::utils::Utils;
use crate::{Error, Result};
use chrono::{Local, Utc};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Buffered log file with elapsed-seconds prefixes.
///
/// Every line carries the seconds since the log was opened and the delta
/// since the previous line, which is what makes pipeline stage timings
/// readable without instrumenting the stages themselves. Clones share
/// the same underlying file.
#[derive(Clone)]
pub struct LogFile {
    inner: Arc<LogFileInner>,
}

struct LogFileInner {
    state: Mutex<LogState>,
    start: Instant,
    output_to_console: bool,
}

struct LogState {
    writer: BufWriter<File>,
    last_seconds: f32,
}

impl LogFile {
    /// Open a log file. With no path, a date-stamped file is created in
    /// the documents folder.
    pub fn new(path: Option<&str>, output_to_console: bool) -> Result<Self> {
        let path = match path {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => {
                let base = Utils::documents_folder()?;
                let name = Utils::date_time_filename("relief_", ".log");
                base.join(name)
            }
        };

        let file = File::create(&path).map_err(|e| {
            Error::FileSave(format!("Unable to create file {}: {}", path.display(), e))
        })?;
        let writer = BufWriter::new(file);

        let inner = LogFileInner {
            state: Mutex::new(LogState {
                writer,
                last_seconds: 0.0,
            }),
            start: Instant::now(),
            output_to_console,
        };

        let log = Self {
            inner: Arc::new(inner),
        };

        log.log(format!("Opened {}", path.display()))?;
        log.log_time()?;

        Ok(log)
    }

    pub fn log(&self, message: impl AsRef<str>) -> Result<()> {
        self.inner.log_lines(message.as_ref())
    }

    pub fn log_time(&self) -> Result<()> {
        let utc = Utc::now();
        let local = Local::now();
        self.log(format!(
            "Current time (UTC): {}",
            utc.format("%Y-%m-%d %H:%M:%S (UTC)")
        ))?;
        self.log(format!(
            "Current local time: {}",
            local.format("%Y-%m-%d %H:%M:%S (%z)")
        ))?;
        Ok(())
    }
}

impl LogFileInner {
    fn log_lines(&self, message: &str) -> Result<()> {
        let seconds = self.start.elapsed().as_secs_f32();

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let diff = seconds - state.last_seconds;
        let prefix = format!("{:7.0}s {:6.1}+ ", seconds, diff);

        for line in message.split('\n') {
            if self.output_to_console {
                println!("{}{}", prefix, line);
            }
            state.writer.write_all(prefix.as_bytes())?;
            state.writer.write_all(line.as_bytes())?;
            state.writer.write_all(b"\n")?;
            state.writer.flush()?;
            state.last_seconds = seconds;
        }

        Ok(())
    }
}

impl Drop for LogFileInner {
    fn drop(&mut self) {
        let _ = self.log_lines("Closing log file.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TempFolder;
    use std::fs;

    #[test]
    fn test_log_writes_prefixed_lines() {
        let tmp = TempFolder::new().expect("temp folder");
        let path = tmp.path().join("test.log");
        {
            let log = LogFile::new(Some(path.to_str().unwrap()), false).expect("log");
            log.log("first line").expect("log line");
            log.log("second\nthird").expect("log lines");
        }

        let text = fs::read_to_string(&path).expect("read log");
        assert!(text.contains("first line"));
        assert!(text.contains("second"));
        assert!(text.contains("third"));
        assert!(text.contains("Closing log file."));
        for line in text.lines() {
            assert!(line.contains("s "), "missing prefix: {}", line);
        }
    }
}
