//! File I/O utilities with atomic writes
//!
//! Vault files are plain text, one entry per line, with a trailing newline
//! after the final line.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::VaultError;

/// Read every line of a text file, newline terminators stripped
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, VaultError> {
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| VaultError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    BufReader::new(file)
        .lines()
        .enumerate()
        .map(|(line_num, line)| {
            line.map_err(|e| {
                VaultError::Io(format!(
                    "Failed to read {} line {}: {}",
                    path.display(),
                    line_num + 1,
                    e
                ))
            })
        })
        .collect()
}

/// Write lines to a file atomically (write to temp, then rename)
///
/// Each line is followed by `\n`. The target is either completely written or
/// left as it was.
pub fn write_lines_atomic<P, L>(path: P, lines: &[L]) -> Result<(), VaultError>
where
    P: AsRef<Path>,
    L: AsRef<str>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            VaultError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory so the rename stays atomic
    let temp_path = path.with_extension("dat.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| VaultError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = lines.iter().try_for_each(|line| {
        writer.write_all(line.as_ref().as_bytes())?;
        writer.write_all(b"\n")
    });

    if let Err(e) = written.and_then(|()| writer.flush()) {
        let _ = fs::remove_file(&temp_path);
        return Err(VaultError::Io(format!("Failed to write data: {}", e)));
    }

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| VaultError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        VaultError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.dat");

        write_lines_atomic(&path, &["first", "second"]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        assert_eq!(read_lines(&path).unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.dat");

        write_lines_atomic::<_, &str>(&path, &[]).unwrap();

        assert!(path.exists());
        assert!(read_lines(&path).unwrap().is_empty());
    }

    #[test]
    fn test_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.dat");

        write_lines_atomic(&path, &["a", "b", "c"]).unwrap();
        write_lines_atomic(&path, &["z"]).unwrap();

        assert_eq!(read_lines(&path).unwrap(), vec!["z"]);
    }

    #[test]
    fn test_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.dat");

        write_lines_atomic(&path, &["line"]).unwrap();

        assert!(!temp_dir.path().join("test.dat.tmp").exists());
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.dat");

        write_lines_atomic(&path, &["line"]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_lines(temp_dir.path().join("missing.dat")).unwrap_err();
        assert!(matches!(err, VaultError::Io(_)));
    }

    #[test]
    fn test_crlf_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("crlf.dat");
        fs::write(&path, "a\r\nb\r\n").unwrap();

        assert_eq!(read_lines(&path).unwrap(), vec!["a", "b"]);
    }
}
