//! Streaming file copy with on-demand directory creation

use crate::types::MirrorError;
use filetime::FileTime;
use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::Path;
use tracing::{debug, warn};

/// Copy `src` to `dest`, creating missing destination directories
///
/// 1. Open the source. With `skip_if_permission_denied`, a tolerable open
///    failure drops the copy and returns `Ok(None)`.
/// 2. Create (truncate) the destination. If that fails with `NotFound`,
///    create all missing parent directories and retry once.
/// 3. Stream all bytes across.
/// 4. Stat the source again and set the destination's access and
///    modification times both to the source's modification time.
///
/// # Returns
/// * `Ok(Some(bytes))` - Number of bytes copied
/// * `Ok(None)` - Source could not be opened and the failure was tolerated
/// * `Err(MirrorError)` - Any other failure
pub fn copy_file(
    src: &Path,
    dest: &Path,
    skip_if_permission_denied: bool,
) -> Result<Option<u64>, MirrorError> {
    let mut src_file = match File::open(src) {
        Ok(file) => file,
        Err(source) => {
            let error = MirrorError::OpenSource {
                path: src.to_path_buf(),
                source,
            };
            if skip_if_permission_denied && error.is_skippable() {
                warn!("Skipping copy: {}", error);
                return Ok(None);
            }
            return Err(error);
        }
    };

    let mut dest_file = create_destination(dest)?;

    let bytes = io::copy(&mut src_file, &mut dest_file).map_err(|source| {
        MirrorError::CopyContents {
            from: src.to_path_buf(),
            to: dest.to_path_buf(),
            source,
        }
    })?;

    // Close both handles before touching timestamps
    drop(dest_file);
    drop(src_file);

    let mtime = fs::metadata(src)
        .and_then(|metadata| metadata.modified())
        .map_err(|source| MirrorError::StatSource {
            path: src.to_path_buf(),
            source,
        })?;

    let file_time = FileTime::from_system_time(mtime);
    filetime::set_file_times(dest, file_time, file_time).map_err(|source| {
        MirrorError::SetTimes {
            path: dest.to_path_buf(),
            source,
        }
    })?;

    Ok(Some(bytes))
}

/// Create the destination file, making parent directories on the first miss
fn create_destination(dest: &Path) -> Result<File, MirrorError> {
    match File::create(dest) {
        Ok(file) => Ok(file),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            if let Some(parent) = dest.parent() {
                debug!("Create directory: {}", parent.display());
                fs::create_dir_all(parent).map_err(|source| MirrorError::CreateDirectory {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            File::create(dest).map_err(|source| MirrorError::CreateDestination {
                path: dest.to_path_buf(),
                source,
            })
        }
        Err(source) => Err(MirrorError::CreateDestination {
            path: dest.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    #[test]
    fn test_copy_basic_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let src = temp_dir.path().join("source.txt");
        let dest = temp_dir.path().join("dest.txt");
        fs::write(&src, b"Hello, mirror!").expect("write source");

        let bytes = copy_file(&src, &dest, false).expect("copy should succeed");

        assert_eq!(bytes, Some(14));
        assert_eq!(fs::read(&dest).expect("read dest"), b"Hello, mirror!");
    }

    #[test]
    fn test_copy_creates_missing_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let src = temp_dir.path().join("source.txt");
        let dest = temp_dir.path().join("a/b/c/dest.txt");
        fs::write(&src, b"nested").expect("write source");

        copy_file(&src, &dest, false).expect("copy should create parents");

        assert_eq!(fs::read(&dest).expect("read dest"), b"nested");
    }

    #[test]
    fn test_copy_sets_both_times_to_source_mtime() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let src = temp_dir.path().join("source.txt");
        let dest = temp_dir.path().join("dest.txt");
        fs::write(&src, b"timed").expect("write source");
        let pinned = FileTime::from_system_time(UNIX_EPOCH + Duration::from_secs(1_000_000));
        filetime::set_file_mtime(&src, pinned).expect("pin source mtime");

        copy_file(&src, &dest, false).expect("copy should succeed");

        let metadata = fs::metadata(&dest).expect("stat dest");
        assert_eq!(FileTime::from_last_modification_time(&metadata), pinned);
        assert_eq!(FileTime::from_last_access_time(&metadata), pinned);
    }

    #[test]
    fn test_copy_overwrites_existing_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let src = temp_dir.path().join("source.txt");
        let dest = temp_dir.path().join("dest.txt");
        fs::write(&src, b"short").expect("write source");
        fs::write(&dest, b"a much longer previous version").expect("write dest");

        copy_file(&src, &dest, false).expect("copy should succeed");

        assert_eq!(fs::read(&dest).expect("read dest"), b"short");
    }

    #[test]
    fn test_missing_source_is_fatal_without_tolerance() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let src = temp_dir.path().join("vanished.txt");
        let dest = temp_dir.path().join("dest.txt");

        let result = copy_file(&src, &dest, false);

        assert!(matches!(result, Err(MirrorError::OpenSource { .. })));
        assert!(!dest.exists());
    }

    #[test]
    fn test_missing_source_is_skipped_with_tolerance() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let src = temp_dir.path().join("vanished.txt");
        let dest = temp_dir.path().join("dest.txt");

        let result = copy_file(&src, &dest, true).expect("tolerated");

        assert_eq!(result, None);
        assert!(!dest.exists());
    }

    #[test]
    fn test_uncreatable_directory_is_fatal() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let src = temp_dir.path().join("source.txt");
        fs::write(&src, b"x").expect("write source");
        // A regular file where a directory is needed
        fs::write(temp_dir.path().join("blocker"), b"file").expect("write blocker");
        let dest = temp_dir.path().join("blocker/sub/dest.txt");

        let result = copy_file(&src, &dest, true);

        assert!(matches!(
            result,
            Err(MirrorError::CreateDirectory { .. }) | Err(MirrorError::CreateDestination { .. })
        ));
    }
}
