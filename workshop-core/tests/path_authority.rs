//! End-to-end scenarios for the path authority: sandbox containment and
//! ignore-rule inheritance across the directory hierarchy.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;
use workshop_core::path::{PathError, IGNORE_FILE_NAME};
use workshop_core::{FileManager, PathAuthority};

fn authority(base: &Path) -> PathAuthority {
    PathAuthority::new(base).unwrap()
}

#[test]
fn containment_rejects_escapes_and_accepts_inside_paths() {
    let temp = tempdir().unwrap();
    let authority = authority(temp.path());

    for escape in ["../sibling", "a/../../b", "../../etc/passwd"] {
        let err = authority.resolve(escape).unwrap_err();
        assert!(matches!(err, PathError::Escape { .. }), "{escape}");
    }

    let inside = authority.resolve("a/b/../c/./d.txt").unwrap();
    assert!(inside.is_absolute());
    assert_eq!(inside, authority.base_directory().join("a/c/d.txt"));
}

#[test]
fn nothing_is_ignored_without_ignore_files() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("a/b/c")).unwrap();
    let authority = authority(temp.path());

    for path in ["x.log", "a/b/c/x.log", "a/temp/", "a/b/anything"] {
        assert!(!authority.should_ignore(path).unwrap(), "{path}");
    }
}

#[test]
fn rules_are_inherited_from_ancestor_directories() {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    fs::write(temp.path().join(IGNORE_FILE_NAME), "*.log\ntemp/\n").unwrap();

    let authority = authority(temp.path());

    // Queried from the subdirectory context: the root rules still apply.
    assert!(authority.should_ignore("sub/test.log").unwrap());
    assert!(authority.should_ignore("sub/temp/").unwrap());
    assert!(!authority.should_ignore("sub/test.txt").unwrap());

    // And at the root itself.
    assert!(authority.should_ignore("test.log").unwrap());
    assert!(authority.should_ignore("temp/").unwrap());
    assert!(!authority.should_ignore("test.txt").unwrap());
}

#[test]
fn negation_re_includes_within_one_file() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join(IGNORE_FILE_NAME), "*.log\n!keep.log\n").unwrap();

    let authority = authority(temp.path());
    assert!(!authority.should_ignore("keep.log").unwrap());
    assert!(authority.should_ignore("other.log").unwrap());
}

#[test]
fn deeper_rule_sets_override_shallower_ones() {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    fs::write(temp.path().join(IGNORE_FILE_NAME), "!important.log\n").unwrap();
    fs::write(temp.path().join("sub").join(IGNORE_FILE_NAME), "*.log\n").unwrap();

    let authority = authority(temp.path());
    assert!(authority.should_ignore("sub/important.log").unwrap());
}

#[test]
fn anchored_patterns_bind_to_their_directory() {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    fs::write(temp.path().join(IGNORE_FILE_NAME), "/build\n").unwrap();

    let authority = authority(temp.path());
    assert!(authority.should_ignore("build").unwrap());
    assert!(!authority.should_ignore("sub/build").unwrap());

    // The unanchored form matches at every depth.
    fs::create_dir(temp.path().join("other")).unwrap();
    fs::write(temp.path().join("other").join(IGNORE_FILE_NAME), "build\n").unwrap();
    assert!(authority.should_ignore("other/build").unwrap());
    assert!(authority.should_ignore("other/deep/build").unwrap());
}

#[test]
fn verdicts_are_stable_across_cache_states() {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    fs::write(temp.path().join(IGNORE_FILE_NAME), "*.log\n!keep.log\n").unwrap();

    let cold = authority(temp.path());
    let warm = authority(temp.path());
    // Prime the second authority's cache with unrelated queries first.
    for _ in 0..3 {
        warm.should_ignore("sub/other.txt").unwrap();
    }

    for path in ["sub/a.log", "keep.log", "sub/keep.log", "readme.md"] {
        assert_eq!(
            cold.should_ignore(path).unwrap(),
            warm.should_ignore(path).unwrap(),
            "{path}"
        );
    }
}

#[tokio::test]
async fn listings_respect_inherited_ignore_rules() {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    fs::write(temp.path().join(IGNORE_FILE_NAME), "*.log\n").unwrap();
    fs::write(temp.path().join("sub/app.log"), "").unwrap();
    fs::write(temp.path().join("sub/app.rs"), "").unwrap();

    let manager = FileManager::new(Arc::new(authority(temp.path())));
    let listing = manager.list_directory("sub").await.unwrap();
    assert_eq!(listing, vec![std::path::PathBuf::from("sub/app.rs")]);
}
