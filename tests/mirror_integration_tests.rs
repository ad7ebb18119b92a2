//! End-to-end mirror runs over temp directories

use filetime::FileTime;
use std::fs;
use std::path::Path;
use std::time::{Duration, UNIX_EPOCH};
use tempfile::TempDir;
use treemirror::commands::mirror::run;
use treemirror::config::ScanMode;
use treemirror::{Config, MirrorError};

fn config_for(source: &Path, destination: &Path) -> Config {
    Config {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        ..Config::default()
    }
}

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write file");
}

fn pin_mtime(path: &Path, secs: i64) {
    filetime::set_file_mtime(path, FileTime::from_unix_time(secs, 0)).expect("set mtime");
}

#[test]
fn test_basic_mirror_into_empty_destination() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write(src.path(), "root.txt", b"root-content");
    write(src.path(), "nested/inner.txt", b"inner-content");

    let summary = run(&config_for(src.path(), dst.path())).expect("mirror run");

    assert_eq!(summary.execution.files_copied, 2);
    assert_eq!(
        fs::read(dst.path().join("root.txt")).expect("read root copy"),
        b"root-content"
    );
    assert_eq!(
        fs::read(dst.path().join("nested/inner.txt")).expect("read nested copy"),
        b"inner-content"
    );
}

#[test]
fn test_scenario_copy_noop_delete() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write(src.path(), "a.txt", &[b'a'; 100]);
    write(src.path(), "b.txt", &[b'b'; 50]);
    write(dst.path(), "b.txt", &[b'b'; 50]);
    write(dst.path(), "c.txt", &[b'c'; 10]);
    pin_mtime(&src.path().join("a.txt"), 100);
    pin_mtime(&src.path().join("b.txt"), 50);
    pin_mtime(&dst.path().join("b.txt"), 50);
    pin_mtime(&dst.path().join("c.txt"), 10);

    let config = Config {
        perform_deletes: true,
        ..config_for(src.path(), dst.path())
    };
    let summary = run(&config).expect("mirror run");

    assert_eq!(summary.plan.copy_new, 1);
    assert_eq!(summary.plan.unchanged, 1);
    assert_eq!(summary.plan.delete, 1);
    assert!(dst.path().join("a.txt").exists());
    assert!(!dst.path().join("c.txt").exists());
}

#[test]
fn test_second_run_is_all_noop() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write(src.path(), "one.txt", b"1");
    write(src.path(), "dir/two.txt", b"22");
    write(src.path(), "dir/sub/three.txt", b"333");
    write(dst.path(), "stale/leftover.txt", b"old");

    let config = Config {
        perform_deletes: true,
        ..config_for(src.path(), dst.path())
    };
    run(&config).expect("first run");
    let second = run(&config).expect("second run");

    assert_eq!(second.plan.copies(), 0);
    assert_eq!(second.plan.delete, 0);
    assert_eq!(second.plan.unchanged, 3);
    assert_eq!(second.execution.unchanged, 3);
}

#[test]
fn test_emptied_directory_is_kept_and_not_reported() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write(dst.path(), "sub/only.txt", b"x");

    let config = Config {
        perform_deletes: true,
        ..config_for(src.path(), dst.path())
    };
    let first = run(&config).expect("first run");
    assert_eq!(first.execution.files_deleted, 1);
    assert!(dst.path().join("sub").is_dir());
    assert!(!dst.path().join("sub/only.txt").exists());

    let second = run(&config).expect("second run");
    assert_eq!(second.plan.delete, 0);
    assert_eq!(second.plan.unchanged, 0);
    assert!(dst.path().join("sub").is_dir());
}

#[test]
fn test_extraneous_files_kept_without_delete_flag() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write(src.path(), "keep.txt", b"k");
    write(dst.path(), "extra.txt", b"e");

    let summary = run(&config_for(src.path(), dst.path())).expect("mirror run");

    assert_eq!(summary.plan.delete, 1);
    assert_eq!(summary.execution.deletes_skipped, 1);
    assert_eq!(summary.execution.files_deleted, 0);
    assert!(dst.path().join("extra.txt").exists());
}

#[test]
fn test_changed_and_stale_files_are_recopied() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write(src.path(), "resized.txt", b"longer content");
    write(dst.path(), "resized.txt", b"short");
    write(src.path(), "stale.txt", b"newer");
    write(dst.path(), "stale.txt", b"older");
    pin_mtime(&src.path().join("stale.txt"), 2_000);
    pin_mtime(&dst.path().join("stale.txt"), 1_000);
    write(src.path(), "newer-dest.txt", b"same!");
    write(dst.path(), "newer-dest.txt", b"local");
    pin_mtime(&src.path().join("newer-dest.txt"), 1_000);
    pin_mtime(&dst.path().join("newer-dest.txt"), 2_000);

    let summary = run(&config_for(src.path(), dst.path())).expect("mirror run");

    assert_eq!(summary.plan.copy_changed, 2);
    assert_eq!(summary.plan.unchanged, 1);
    assert_eq!(
        fs::read(dst.path().join("resized.txt")).expect("read"),
        b"longer content"
    );
    assert_eq!(fs::read(dst.path().join("stale.txt")).expect("read"), b"newer");
    // Same size and newer on the destination: left alone
    assert_eq!(
        fs::read(dst.path().join("newer-dest.txt")).expect("read"),
        b"local"
    );
    let copied = fs::metadata(dst.path().join("stale.txt")).expect("stat");
    assert_eq!(
        FileTime::from_last_modification_time(&copied),
        FileTime::from_unix_time(2_000, 0)
    );
}

#[test]
fn test_dry_run_changes_nothing() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write(src.path(), "new.txt", b"new");
    write(dst.path(), "extra.txt", b"extra");

    let config = Config {
        dry_run: true,
        perform_deletes: true,
        ..config_for(src.path(), dst.path())
    };
    let summary = run(&config).expect("dry run");

    assert!(summary.dry_run);
    assert_eq!(summary.plan.copy_new, 1);
    assert_eq!(summary.plan.delete, 1);
    assert!(!dst.path().join("new.txt").exists());
    assert!(dst.path().join("extra.txt").exists());
}

#[test]
fn test_spool_is_neither_copied_nor_deleted() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write(src.path(), "var/spool/job.txt", b"job");
    write(dst.path(), "var/spool/old-job.txt", b"old");

    let config = Config {
        perform_deletes: true,
        ..config_for(src.path(), dst.path())
    };
    let summary = run(&config).expect("mirror run");

    assert_eq!(summary.source_files, 0);
    assert_eq!(summary.destination_files, 0);
    assert!(!dst.path().join("var/spool/job.txt").exists());
    assert!(dst.path().join("var/spool/old-job.txt").exists());
}

#[test]
fn test_missing_destination_root() {
    let src = TempDir::new().expect("create src tempdir");
    let scratch = TempDir::new().expect("create scratch tempdir");
    let dst = scratch.path().join("fresh/backup");
    write(src.path(), "a/b/c.txt", b"abc");

    let strict = run(&config_for(src.path(), &dst));
    assert!(matches!(strict, Err(MirrorError::OpenDirectory { .. })));

    let tolerant = Config {
        skip_if_permission_denied: true,
        ..config_for(src.path(), &dst)
    };
    let summary = run(&tolerant).expect("tolerant run");

    assert_eq!(summary.destination_files, 0);
    assert_eq!(fs::read(dst.join("a/b/c.txt")).expect("read"), b"abc");
}

#[test]
fn test_scan_modes_produce_same_outcome() {
    let make = || {
        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");
        for i in 0..30 {
            write(src.path(), &format!("s{}/f{}.dat", i % 4, i), b"data");
        }
        for i in 0..10 {
            write(dst.path(), &format!("d{}/g{}.dat", i % 2, i), b"old");
        }
        (src, dst)
    };

    let (src_a, dst_a) = make();
    let (src_b, dst_b) = make();
    let sequential = run(&Config {
        scan_mode: ScanMode::Sequential,
        ..config_for(src_a.path(), dst_a.path())
    })
    .expect("sequential run");
    let concurrent = run(&Config {
        scan_mode: ScanMode::Concurrent,
        ..config_for(src_b.path(), dst_b.path())
    })
    .expect("concurrent run");

    assert_eq!(sequential.plan, concurrent.plan);
    assert_eq!(sequential.execution, concurrent.execution);
}

#[test]
fn test_summary_serializes_to_json() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write(src.path(), "f.txt", b"12345");

    let summary = run(&config_for(src.path(), dst.path())).expect("mirror run");
    let json = serde_json::to_value(&summary).expect("serialize");

    assert_eq!(json["plan"]["copy_new"], 1);
    assert_eq!(json["execution"]["bytes_copied"], 5);
    assert_eq!(json["dry_run"], false);
}

#[test]
fn test_old_timestamps_survive_copy() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    write(src.path(), "archive.tar", b"tarball");
    let when = UNIX_EPOCH + Duration::from_secs(315_532_800);
    filetime::set_file_mtime(
        src.path().join("archive.tar"),
        FileTime::from_system_time(when),
    )
    .expect("set mtime");

    run(&config_for(src.path(), dst.path())).expect("mirror run");

    let copied = fs::metadata(dst.path().join("archive.tar")).expect("stat");
    assert_eq!(copied.modified().expect("mtime"), when);
}

#[test]
fn test_source_inside_destination_is_refused_and_untouched() {
    let outer = TempDir::new().expect("create outer tempdir");
    let src = outer.path().join("src");
    write(&src, "precious.txt", b"keep me");

    let config = Config {
        perform_deletes: true,
        ..config_for(&src, outer.path())
    };
    let result = run(&config);

    assert!(matches!(result, Err(ref e) if e.is_config_error()));
    assert_eq!(
        fs::read(src.join("precious.txt")).expect("source file intact"),
        b"keep me"
    );
}
