//! Tests for the tree-wide batch run

#![allow(clippy::expect_used)]

use super::fixtures::{CAFE_LATIN1, CAFE_UTF8, FixedDetector, noise};
use crate::convert::{Conversion, ConvertConfig, FileReport, RunSummary, walk_and_convert};
use crate::detect::StatisticalDetector;
use crate::error::{ConvertError, FailureKind};
use crate::scanner::SuffixFilter;
use std::collections::HashMap;
use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Latin-1 text long enough for the statistical detector to settle
const FRENCH_LATIN1: &[u8] =
    b"// Caf\xe9 cr\xe8me br\xfbl\xe9e, d\xe9j\xe0 vu \xe0 la fa\xe7ade du ch\xe2teau\nint caf\xe9;\n";

/// Binary garbage with a header suffix
const GARBAGE: &[u8] = &[0x00, 0x13, 0x00, 0x00, 0xFF, 0x00, 0x02, 0x00, 0x00, 0x7F];

fn run(config: &ConvertConfig) -> (RunSummary, Vec<(PathBuf, Result<Conversion, FailureKind>)>) {
    let mut seen = Vec::new();
    let summary = walk_and_convert(config, StatisticalDetector::new(), |report: &FileReport| {
        let result = match &report.result {
            Ok(conversion) => Ok(*conversion),
            Err(e) => Err(e.kind()),
        };
        seen.push((report.path.clone(), result));
        ControlFlow::Continue(())
    })
    .expect("walk succeeds");
    seen.sort_by(|a, b| a.0.cmp(&b.0));
    (summary, seen)
}

fn snapshot(root: &Path) -> HashMap<PathBuf, Vec<u8>> {
    let mut files = HashMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).expect("list dir").filter_map(Result::ok) {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else {
                files.insert(path.clone(), fs::read(&path).expect("read file"));
            }
        }
    }
    files
}

fn scenario_tree() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    fs::write(root.join("a.h"), FRENCH_LATIN1).expect("write a.h");
    fs::write(root.join("b.cpp"), b"hello").expect("write b.cpp");
    fs::write(root.join("c.txt"), CAFE_LATIN1).expect("write c.txt");
    fs::write(root.join("d.h"), GARBAGE).expect("write d.h");
    temp_dir
}

#[test]
fn test_scenarios_convert_keep_ignore_and_skip() {
    let temp_dir = scenario_tree();
    let root = temp_dir.path();

    let (summary, seen) = run(&ConvertConfig::new(root));

    assert_eq!(seen.len(), 3, "c.txt must not be reported");
    assert!(matches!(seen[0].1, Ok(Conversion::Converted { .. })));
    assert_eq!(seen[0].0, root.join("a.h"));
    assert_eq!(
        seen[1],
        (
            root.join("b.cpp"),
            Ok(Conversion::AlreadyCanonical {
                detected: encoding_rs::UTF_8
            })
        )
    );
    assert_eq!(seen[2], (root.join("d.h"), Err(FailureKind::Detection)));

    let a = fs::read_to_string(root.join("a.h")).expect("a.h is UTF-8 now");
    assert!(a.contains("Caf\u{e9} cr\u{e8}me br\u{fb}l\u{e9}e"));
    assert_eq!(fs::read(root.join("b.cpp")).expect("read"), b"hello");
    assert_eq!(fs::read(root.join("c.txt")).expect("read"), CAFE_LATIN1);
    assert_eq!(fs::read(root.join("d.h")).expect("read"), GARBAGE);

    assert_eq!(
        summary,
        RunSummary {
            converted: 1,
            already_canonical: 1,
            would_convert: 0,
            failed: 1,
            walk_errors: 0,
        }
    );
}

#[test]
fn test_random_binary_header_is_left_unchanged() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    let bytes = noise(4096);
    fs::write(root.join("d.h"), &bytes).expect("write d.h");

    let (summary, seen) = run(&ConvertConfig::new(root));

    assert_eq!(seen, vec![(root.join("d.h"), Err(FailureKind::Detection))]);
    assert_eq!(summary.failed, 1);
    assert_eq!(fs::read(root.join("d.h")).expect("read"), bytes);
}

#[test]
fn test_second_run_is_a_no_op() {
    let temp_dir = scenario_tree();
    let config = ConvertConfig::new(temp_dir.path());

    run(&config);
    let after_first = snapshot(temp_dir.path());
    let (summary, _) = run(&config);
    let after_second = snapshot(temp_dir.path());

    assert_eq!(after_first, after_second);
    assert_eq!(summary.converted, 0);
    assert_eq!(summary.already_canonical, 2);
    assert_eq!(summary.failed, 1);
}

#[test]
fn test_every_matching_file_is_converted_once_at_any_depth() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    let dirs = ["", "rogue", "rogue/ctf", "xatrix/horde/deep/deeper"];
    let mut expected = Vec::new();
    for (i, dir) in dirs.iter().enumerate() {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).expect("create dir");
        for name in [format!("m_{i}.cpp"), format!("g_{i}.h")] {
            fs::write(dir.join(&name), CAFE_LATIN1).expect("write");
            expected.push(dir.join(name));
        }
        fs::write(dir.join("notes.md"), CAFE_LATIN1).expect("write");
    }
    expected.sort();

    let mut seen = Vec::new();
    let config = ConvertConfig::new(root);
    walk_and_convert(&config, FixedDetector::label("ISO-8859-1"), |report| {
        seen.push(report.path.clone());
        ControlFlow::Continue(())
    })
    .expect("walk succeeds");
    seen.sort();

    assert_eq!(seen, expected);
    for path in &expected {
        assert_eq!(fs::read(path).expect("read"), CAFE_UTF8);
    }
    for dir in dirs {
        assert_eq!(
            fs::read(root.join(dir).join("notes.md")).expect("read"),
            CAFE_LATIN1
        );
    }
}

#[test]
fn test_failures_do_not_stop_the_walk() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    for i in 0..5 {
        fs::write(root.join(format!("f{i}.h")), b"int x;").expect("write");
    }

    let mut calls = 0;
    let summary = walk_and_convert(&ConvertConfig::new(root), FixedDetector::nothing(), |report| {
        calls += 1;
        assert!(matches!(report.result, Err(ConvertError::DetectionAmbiguous)));
        ControlFlow::Continue(())
    })
    .expect("walk succeeds");

    assert_eq!(calls, 5);
    assert_eq!(summary.failed, 5);
    assert!(!summary.is_clean());
}

#[test]
fn test_observer_can_stop_the_walk() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    for i in 0..5 {
        fs::write(root.join(format!("f{i}.h")), CAFE_LATIN1).expect("write");
    }

    let mut calls = 0;
    let summary = walk_and_convert(
        &ConvertConfig::new(root),
        FixedDetector::label("ISO-8859-1"),
        |_| {
            calls += 1;
            ControlFlow::Break(())
        },
    )
    .expect("walk succeeds");

    let converted = snapshot(root)
        .values()
        .filter(|bytes| bytes.as_slice() == CAFE_UTF8)
        .count();
    assert_eq!(calls, 1);
    assert_eq!(summary.converted, 1);
    assert_eq!(converted, 1);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_file_name_is_converted() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(OsStr::from_bytes(b"caf\xe9.h"));
    fs::write(&path, FRENCH_LATIN1).expect("write");

    let (summary, seen) = run(&ConvertConfig::new(temp_dir.path()));

    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, path);
    assert_eq!(summary.converted, 1);
    assert!(fs::read_to_string(&path).expect("UTF-8 now").contains("Caf\u{e9}"));
}

#[test]
fn test_dry_run_touches_nothing() {
    let temp_dir = scenario_tree();
    let before = snapshot(temp_dir.path());

    let (summary, _) = run(&ConvertConfig::new(temp_dir.path()).with_dry_run(true));

    assert_eq!(snapshot(temp_dir.path()), before);
    assert_eq!(summary.would_convert, 1);
    assert_eq!(summary.converted, 0);
}

#[test]
fn test_custom_suffixes() {
    let temp_dir = scenario_tree();
    let root = temp_dir.path();

    let config = ConvertConfig::new(root).with_filter(SuffixFilter::new(["txt"]));
    let (summary, seen) = run(&config);

    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, root.join("c.txt"));
    assert_eq!(summary.converted, 1);
    assert_eq!(fs::read(root.join("c.txt")).expect("read"), CAFE_UTF8);
    assert_eq!(fs::read(root.join("d.h")).expect("read"), GARBAGE);
}

#[test]
fn test_missing_root_fails_before_any_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut calls = 0;

    let err = walk_and_convert(
        &ConvertConfig::new(temp_dir.path().join("nope")),
        StatisticalDetector::new(),
        |_| {
            calls += 1;
            ControlFlow::Continue(())
        },
    )
    .expect_err("missing root must fail");

    assert!(matches!(err, ConvertError::RootNotFound(_)));
    assert_eq!(calls, 0);
}

#[test]
fn test_unwritable_target_fails_before_any_file() {
    let temp_dir = scenario_tree();
    let before = snapshot(temp_dir.path());

    let err = walk_and_convert(
        &ConvertConfig::new(temp_dir.path()).with_target(encoding_rs::UTF_16LE),
        StatisticalDetector::new(),
        |_| ControlFlow::Continue(()),
    )
    .expect_err("UTF-16 target must fail");

    assert!(matches!(err, ConvertError::UnsupportedTarget("UTF-16LE")));
    assert_eq!(snapshot(temp_dir.path()), before);
}

#[test]
fn test_empty_tree() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (summary, seen) = run(&ConvertConfig::new(temp_dir.path()));

    assert!(seen.is_empty());
    assert_eq!(summary, RunSummary::default());
    assert!(summary.is_clean());
}

#[test]
fn test_summary_display() {
    let summary = RunSummary {
        converted: 2,
        already_canonical: 3,
        would_convert: 0,
        failed: 1,
        walk_errors: 0,
    };
    assert_eq!(
        summary.to_string(),
        "6 files: 2 converted, 3 already canonical, 0 would convert, 1 failed, 0 walk errors"
    );
}
