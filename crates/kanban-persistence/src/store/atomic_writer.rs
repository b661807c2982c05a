use kanban_core::KanbanResult;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Atomic file writer that prevents data corruption
/// Uses write-to-temp-file → atomic-rename pattern for safety
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write data to a file atomically, creating the parent directory if needed
    pub fn write_atomic(path: &Path, data: &[u8]) -> KanbanResult<()> {
        // Temp file lives next to the target so the rename stays on one filesystem
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(data)?;
        temp_file.flush()?;
        temp_file.persist(path).map_err(|e| e.error)?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a file as UTF-8, `None` when it does not exist
    pub fn read_optional(path: &Path) -> KanbanResult<Option<String>> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!("Read {} bytes from {}", contents.len(), path.display());
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");

        AtomicWriter::write_atomic(&file_path, b"Hello, World!").unwrap();

        let read_data = AtomicWriter::read_optional(&file_path).unwrap();
        assert_eq!(read_data.as_deref(), Some("Hello, World!"));
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");

        AtomicWriter::write_atomic(&file_path, b"First").unwrap();
        AtomicWriter::write_atomic(&file_path, b"Second").unwrap();

        let read_data = AtomicWriter::read_optional(&file_path).unwrap();
        assert_eq!(read_data.as_deref(), Some("Second"));
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested").join("state");

        AtomicWriter::write_atomic(&file_path, b"{}").unwrap();
        assert!(file_path.exists());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let read_data = AtomicWriter::read_optional(&dir.path().join("missing")).unwrap();
        assert!(read_data.is_none());
    }
}
