//! JSON-lines file sink with size-based rotation

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use framewatch_utils::{FramewatchError, Result};

use super::{LogRecord, LogSink};

/// Options for [`FileSink`]
#[derive(Debug, Clone)]
pub struct FileSinkOptions {
    /// Active log file; rotated files sit next to it as `stem.N.ext`
    pub path: PathBuf,
    /// Maximum size in bytes before rotation (default: 10MB)
    pub max_file_size: u64,
    /// Maximum number of rotated files to keep (default: 5)
    pub max_rotated_files: u32,
}

impl FileSinkOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_file_size: 10 * 1024 * 1024,
            max_rotated_files: 5,
        }
    }
}

struct FileState {
    writer: Option<BufWriter<File>>,
    size: u64,
}

/// Appends one JSON object per record to a file
///
/// Writes are buffered; the buffer is flushed on [`LogSink::flush`] and on drop.
pub struct FileSink {
    options: FileSinkOptions,
    state: Mutex<FileState>,
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink")
            .field("options", &self.options)
            .field("size", &self.state.lock().size)
            .finish()
    }
}

impl FileSink {
    /// Open (or create) the log file, creating parent directories as needed
    pub fn open(options: FileSinkOptions) -> Result<Self> {
        if options.max_file_size == 0 {
            return Err(FramewatchError::config("max_file_size must be greater than 0"));
        }

        if let Some(parent) = options.path.parent() {
            if !parent.as_os_str().is_empty() {
                framewatch_utils::ensure_dir(parent).map_err(|e| FramewatchError::FileWrite {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = open_append(&options.path)?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            options,
            state: Mutex::new(FileState {
                writer: Some(BufWriter::new(file)),
                size,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.options.path
    }

    /// Path of the `index`-th rotated file (1 is the most recent)
    pub fn rotated_path(&self, index: u32) -> PathBuf {
        let path = &self.options.path;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match path.extension() {
            Some(ext) => format!("{}.{}.{}", stem, index, ext.to_string_lossy()),
            None => format!("{}.{}", stem, index),
        };
        path.with_file_name(name)
    }

    fn rotate(&self, state: &mut FileState) -> Result<()> {
        // Flush and close current file
        if let Some(ref mut w) = state.writer {
            let _ = w.flush();
        }
        state.writer = None;

        let max = self.options.max_rotated_files;
        if max == 0 {
            let _ = fs::remove_file(&self.options.path);
        } else {
            let oldest = self.rotated_path(max);
            if oldest.exists() {
                let _ = fs::remove_file(&oldest);
            }

            // Shift existing rotated files
            for i in (1..max).rev() {
                let old_path = self.rotated_path(i);
                if old_path.exists() {
                    let _ = fs::rename(&old_path, self.rotated_path(i + 1));
                }
            }

            if self.options.path.exists() {
                let rotated = self.rotated_path(1);
                fs::rename(&self.options.path, &rotated).map_err(|e| {
                    FramewatchError::FileWrite {
                        path: rotated,
                        source: e,
                    }
                })?;
            }
        }

        state.writer = Some(BufWriter::new(open_append(&self.options.path)?));
        state.size = 0;

        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FramewatchError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
}

impl LogSink for FileSink {
    fn write(&self, record: &LogRecord) -> Result<()> {
        let mut line = record.to_json_line()?;
        line.push('\n');
        let len = line.len() as u64;

        let mut state = self.state.lock();
        if state.size > 0 && state.size + len > self.options.max_file_size {
            self.rotate(&mut state)?;
        }

        let writer = state
            .writer
            .as_mut()
            .ok_or_else(|| FramewatchError::sink("file sink is closed"))?;
        writer
            .write_all(line.as_bytes())
            .map_err(|e| FramewatchError::FileWrite {
                path: self.options.path.clone(),
                source: e,
            })?;
        state.size += len;

        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(ref mut writer) = self.state.lock().writer {
            writer.flush().map_err(|e| FramewatchError::FileWrite {
                path: self.options.path.clone(),
                source: e,
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = LogSink::flush(self);
    }
}
