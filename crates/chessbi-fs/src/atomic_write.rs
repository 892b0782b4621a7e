use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default)]
pub struct AtomicWriteOptions {
    pub sync:           bool,
    pub create_parents: bool,
}

impl AtomicWriteOptions {
    pub fn new() -> Self { Self::default() }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Create missing parent directories before writing.
    pub fn create_parents(mut self, create_parents: bool) -> Self {
        self.create_parents = create_parents;
        self
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn atomic_write(
    path: impl AsRef<Path>,
    content: &[u8],
    options: AtomicWriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let parent = parent_dir(path);

    if options.create_parents {
        fs::create_dir_all(&parent).map_err(|e| Error::CreateDir {
            path:   parent.clone(),
            source: e,
        })?;
    }

    let tmp_path = parent.join(format!(".tmp.{}.chessbi", uuid::Uuid::new_v4()));

    let placed = write_temp(&tmp_path, content, options.sync).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|e| Error::Write {
            path:   path.to_path_buf(),
            source: e,
        })
    });

    // The temp file may exist even when the write itself failed part way.
    if placed.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    placed
}

fn write_temp(tmp_path: &Path, content: &[u8], sync: bool) -> Result<()> {
    let to_error = |e: std::io::Error| Error::Write {
        path:   tmp_path.to_path_buf(),
        source: e,
    };

    fs::write(tmp_path, content).map_err(to_error)?;
    if sync {
        fs::File::open(tmp_path).and_then(|file| file.sync_all()).map_err(to_error)?;
    }
    Ok(())
}

pub fn atomic_read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::Read {
        path:   path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("etags.json");
        atomic_write(&path, b"{}", AtomicWriteOptions::new()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"{}");
    }

    #[test]
    fn test_atomic_write_missing_parent_without_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("etags.json");
        let err = atomic_write(&path, b"{}", AtomicWriteOptions::new()).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_atomic_write_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("2024-01.json");
        atomic_write(&path, b"[]", AtomicWriteOptions::new().create_parents(true)).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"[]");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        atomic_write(&path, b"1", AtomicWriteOptions::new()).unwrap();
        atomic_write(&path, b"2", AtomicWriteOptions::new().sync(true)).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.json")]);
        assert_eq!(fs::read(&path).unwrap(), b"2");
    }

    #[test]
    fn test_parent_dir_of_bare_file_name() {
        assert_eq!(parent_dir(Path::new("bare.json")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("out/bare.json")), PathBuf::from("out"));
    }

    #[test]
    fn test_failed_placement_removes_temp_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory at the target makes the rename fail.
        let path = dir.path().join("2024-01.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"").unwrap();

        let err = atomic_write(&path, b"{}", AtomicWriteOptions::new().sync(true)).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("2024-01.json")]);
    }

    #[test]
    fn test_atomic_read_not_found() {
        let dir = tempdir().unwrap();
        let err = atomic_read(dir.path().join("nope")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.path(), dir.path().join("nope"));
    }
}
