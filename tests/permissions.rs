#![cfg(unix)]

use std::fs::{self, File, OpenOptions, Permissions};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use clip_filter::FilterError;
use clip_filter::pipeline::{RunOptions, VALID_FILE_NAME, check_output_dir, run_from_path};

const FIXTURE: &str = "tests/fixtures/clips.csv";

fn chmod(path: &Path, mode: u32) {
    fs::set_permissions(path, Permissions::from_mode(mode)).unwrap();
}

#[test]
fn unreadable_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clips.csv");
    fs::copy(FIXTURE, &input).unwrap();
    let out = tempfile::tempdir().unwrap();
    chmod(&input, 0o000);

    // Root reads regardless of mode.
    if File::open(&input).is_ok() {
        return;
    }
    let err = run_from_path(&input, out.path(), &RunOptions::default()).unwrap_err();
    assert!(matches!(err, FilterError::FileNotReadable { ref path } if path == &input));
    assert!(!out.path().join(VALID_FILE_NAME).exists());
}

#[test]
fn read_only_existing_output_is_reported() {
    let out = tempfile::tempdir().unwrap();
    let valid = out.path().join(VALID_FILE_NAME);
    fs::write(&valid, "id\n1\n").unwrap();
    chmod(&valid, 0o444);

    if OpenOptions::new().write(true).open(&valid).is_ok() {
        return;
    }
    let err = run_from_path(FIXTURE, out.path(), &RunOptions::default()).unwrap_err();
    assert!(matches!(err, FilterError::FileNotWritable { ref path } if path == &valid));
    assert_eq!(fs::read_to_string(&valid).unwrap(), "id\n1\n");
}

#[test]
fn read_only_output_dir_is_reported() {
    let out = tempfile::tempdir().unwrap();
    chmod(out.path(), 0o500);

    let writable = tempfile::tempfile_in(out.path()).is_ok();
    let result = run_from_path(FIXTURE, out.path(), &RunOptions::default());
    chmod(out.path(), 0o700);

    if writable {
        return;
    }
    let err = result.unwrap_err();
    assert!(matches!(err, FilterError::PermissionDenied { ref path } if path == out.path()));
}

#[test]
fn untraversable_parent_is_not_reported_as_missing() {
    let parent = tempfile::tempdir().unwrap();
    let out = parent.path().join("out");
    fs::create_dir(&out).unwrap();
    chmod(parent.path(), 0o000);

    let reachable = fs::metadata(&out).is_ok();
    let result = check_output_dir(&out);
    chmod(parent.path(), 0o700);

    if reachable {
        return;
    }
    let err = result.unwrap_err();
    assert!(matches!(err, FilterError::PermissionDenied { ref path } if path == &out));
    assert!(err.to_string().contains("permission denied"));
}
