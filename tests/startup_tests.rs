use std::fs;

use memory_frame::build_catalog;
use memory_frame::config::Config;
use memory_frame::error::Error;
use tempfile::tempdir;

fn config_for(path: &std::path::Path) -> Config {
    Config {
        image_path: Some(path.to_path_buf()),
        ..Config::default()
    }
}

#[test]
fn builds_catalog_from_configured_library() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("a.jpg"), b"x").unwrap();
    fs::write(tmp.path().join("b.png"), b"x").unwrap();

    let catalog = build_catalog(&config_for(tmp.path())).unwrap();
    assert_eq!(catalog.len(), 1);

    let cfg = Config {
        extensions: vec!["jpg".to_string(), "png".to_string()],
        ..config_for(tmp.path())
    };
    assert_eq!(build_catalog(&cfg).unwrap().len(), 2);
}

#[test]
fn empty_library_is_fatal() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("notes.txt"), b"x").unwrap();

    let err = build_catalog(&config_for(tmp.path())).unwrap_err();
    assert!(matches!(err, Error::EmptyCatalog { .. }), "unexpected error: {err:?}");
}

#[test]
fn missing_library_is_a_scan_error() {
    let tmp = tempdir().unwrap();
    let err = build_catalog(&config_for(&tmp.path().join("gone"))).unwrap_err();
    assert!(matches!(err, Error::Scan(_)), "unexpected error: {err:?}");
}

#[test]
fn missing_image_path_is_reported() {
    let err = build_catalog(&Config::default()).unwrap_err();
    assert!(matches!(err, Error::MissingImagePath));
}
