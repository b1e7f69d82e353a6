//! File sink with rotation, retention, and compression
//!
//! Policy inputs are the opaque strings carried on the sink options:
//! rotation is a size threshold ("500 MB", "64 KB", "1 GB", or plain bytes),
//! retention either an age ("10 days") or a backup count ("5"), and
//! compression a format name ("gz", "gzip", "zip" all produce gzip). Strings
//! that do not parse disable the corresponding behavior; a malformed policy
//! must not break logging.

use super::template::FormatTemplate;
use crate::core::error::{RegistryError, Result};
use crate::core::record::LogRecord;
use chrono::Local;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Retention {
    Age(Duration),
    Count(usize),
}

pub struct FileSink {
    path: PathBuf,
    template: FormatTemplate,
    writer: Option<BufWriter<File>>,
    current_size: u64,
    max_bytes: Option<u64>,
    retention: Option<Retention>,
    compress: bool,
}

impl FileSink {
    /// Open (or create) the target file for appending. Missing parent
    /// directories are created first; the create is idempotent.
    pub fn open(
        path: impl Into<PathBuf>,
        template: FormatTemplate,
        rotation: Option<&str>,
        retention: Option<&str>,
        compression: Option<&str>,
    ) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| RegistryError::backend("creating log directory", e))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| RegistryError::backend("opening log file", e))?;
        let current_size = file
            .metadata()
            .map_err(|e| RegistryError::backend("reading log file metadata", e))?
            .len();

        Ok(Self {
            path,
            template,
            writer: Some(BufWriter::new(file)),
            current_size,
            max_bytes: rotation.and_then(parse_size),
            retention: retention.and_then(parse_retention),
            compress: compression.is_some_and(is_gzip_format),
        })
    }

    pub fn write(&mut self, record: &LogRecord) -> Result<()> {
        let mut line = self.template.render(record);
        line.push('\n');

        if let Some(max) = self.max_bytes {
            if self.current_size > 0 && self.current_size + line.len() as u64 > max {
                self.rotate()?;
            }
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| RegistryError::backend(
                "writing log record",
                std::io::Error::new(std::io::ErrorKind::NotConnected, "sink already closed"),
            ))?;
        writer
            .write_all(line.as_bytes())
            .map_err(|e| RegistryError::backend("writing log record", e))?;
        self.current_size += line.len() as u64;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer
                .flush()
                .map_err(|e| RegistryError::backend("flushing log file", e))?;
        }
        Ok(())
    }

    /// Flush and release the file handle. Further writes fail.
    pub fn close(&mut self) -> Result<()> {
        self.flush()?;
        self.writer = None;
        Ok(())
    }

    /// Rename the active file to a timestamped backup, compress it if
    /// configured, reopen a fresh file, then prune old backups.
    ///
    /// The file is reopened even when the rename fails: a transient
    /// filesystem error surfaces once and the sink keeps writing into the
    /// reopened file instead of staying closed.
    fn rotate(&mut self) -> Result<()> {
        self.flush()?;
        self.writer = None;

        let backup = self.backup_path();
        let renamed = fs::rename(&self.path, &backup)
            .map_err(|e| RegistryError::backend("rotating log file", e));

        if renamed.is_ok() && self.compress {
            // Best effort: a failed compression keeps the uncompressed backup.
            let _ = compress_file(&backup);
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RegistryError::backend("reopening log file after rotation", e))?;
        // After a failed rename the un-rotated content is still there.
        self.current_size = file.metadata().map(|m| m.len()).unwrap_or(0);
        self.writer = Some(BufWriter::new(file));

        renamed?;
        self.prune_backups();
        Ok(())
    }

    fn backup_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let mut candidate = self.path.with_extension(format!("{stamp}.log"));
        let mut counter = 1;
        while candidate.exists() || candidate.with_extension("log.gz").exists() {
            candidate = self.path.with_extension(format!("{stamp}.{counter}.log"));
            counter += 1;
        }
        candidate
    }

    /// Delete rotated backups that fall outside the retention policy.
    /// Failures here are silent: retention is housekeeping, not correctness.
    fn prune_backups(&self) {
        let Some(retention) = self.retention else {
            return;
        };
        let mut backups = self.list_backups();

        match retention {
            Retention::Age(max_age) => {
                let cutoff = SystemTime::now()
                    .checked_sub(max_age)
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                for (path, modified) in backups {
                    if modified < cutoff {
                        let _ = fs::remove_file(path);
                    }
                }
            }
            Retention::Count(keep) => {
                // Newest first, drop everything past the keep count
                backups.sort_by(|a, b| b.1.cmp(&a.1));
                for (path, _) in backups.into_iter().skip(keep) {
                    let _ = fs::remove_file(path);
                }
            }
        }
    }

    fn list_backups(&self) -> Vec<(PathBuf, SystemTime)> {
        let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Vec::new();
        };
        let Some(stem) = self.path.file_stem().and_then(|s| s.to_str()) else {
            return Vec::new();
        };
        let prefix = format!("{stem}.");

        let Ok(entries) = fs::read_dir(parent) else {
            return Vec::new();
        };
        entries
            .flatten()
            .filter(|entry| {
                entry.path() != self.path
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| name.starts_with(&prefix))
            })
            .filter_map(|entry| {
                let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
                Some((entry.path(), modified))
            })
            .collect()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Parse a size policy like "500 MB" into bytes. A bare number is bytes.
fn parse_size(policy: &str) -> Option<u64> {
    let policy = policy.trim();
    let split = policy
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(policy.len());
    let (number, unit) = policy.split_at(split);
    let number: u64 = number.parse().ok()?;

    let multiplier = match unit.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "KB" => 1024,
        "MB" => 1024 * 1024,
        "GB" => 1024 * 1024 * 1024,
        _ => return None,
    };
    number.checked_mul(multiplier)
}

/// Parse a retention policy: "10 days" keeps by age, a bare number keeps
/// that many backups.
fn parse_retention(policy: &str) -> Option<Retention> {
    let policy = policy.trim();
    if let Ok(count) = policy.parse::<usize>() {
        return Some(Retention::Count(count));
    }

    let (number, unit) = policy.split_once(' ')?;
    let number: u64 = number.trim().parse().ok()?;
    let seconds = match unit.trim().to_ascii_lowercase().as_str() {
        "day" | "days" => number.checked_mul(24 * 3600)?,
        "hour" | "hours" => number.checked_mul(3600)?,
        "week" | "weeks" => number.checked_mul(7 * 24 * 3600)?,
        _ => return None,
    };
    Some(Retention::Age(Duration::from_secs(seconds)))
}

fn is_gzip_format(format: &str) -> bool {
    matches!(
        format.trim().to_ascii_lowercase().as_str(),
        "gz" | "gzip" | "zip"
    )
}

fn compress_file(path: &Path) -> std::io::Result<()> {
    let mut source = File::open(path)?;
    let target_path = {
        let mut os = path.as_os_str().to_owned();
        os.push(".gz");
        PathBuf::from(os)
    };
    let target = File::create(&target_path)?;
    let mut encoder = GzEncoder::new(BufWriter::new(target), Compression::default());
    std::io::copy(&mut source, &mut encoder)?;
    encoder.finish()?.flush()?;
    fs::remove_file(path)?;
    Ok(())
}
