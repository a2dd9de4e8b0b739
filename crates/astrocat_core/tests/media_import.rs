use astrocat_core::{MediaError, MediaLibrary, MediaType};
use std::path::Path;

#[test]
fn import_copies_image_under_generated_name() {
    let root = tempfile::tempdir().unwrap();
    let picked = tempfile::tempdir().unwrap();
    let source = picked.path().join("Blue Marble.JPG");
    std::fs::write(&source, b"pixels").unwrap();

    let library = MediaLibrary::new(root.path(), "media");
    let import = library.import(&source).unwrap();

    assert_eq!(import.media_type, MediaType::Image);
    assert_eq!(import.original_name, "Blue Marble.JPG");
    assert!(import.relative_path.starts_with("media/"));
    assert!(import.relative_path.ends_with("_image_Blue_Marble.jpg"));

    let copied = root.path().join(&import.relative_path);
    assert_eq!(std::fs::read(copied).unwrap(), b"pixels");
}

#[test]
fn import_classifies_video() {
    let root = tempfile::tempdir().unwrap();
    let source = root.path().join("orbit.webm");
    std::fs::write(&source, b"frames").unwrap();

    let import = MediaLibrary::new(root.path(), "media")
        .import(&source)
        .unwrap();
    assert_eq!(import.media_type, MediaType::Video);
    assert!(root.path().join("media").is_dir());
}

#[test]
fn import_rejects_unsupported_extension() {
    let root = tempfile::tempdir().unwrap();
    let source = root.path().join("notes.TXT");
    std::fs::write(&source, b"text").unwrap();

    let err = MediaLibrary::new(root.path(), "media")
        .import(&source)
        .unwrap_err();
    assert!(matches!(err, MediaError::UnsupportedType { ref extension } if extension == ".txt"));
    assert!(!root.path().join("media").exists());
}

#[test]
fn import_reports_missing_source() {
    let root = tempfile::tempdir().unwrap();
    let err = MediaLibrary::new(root.path(), "media")
        .import(&root.path().join("ghost.png"))
        .unwrap_err();
    assert!(matches!(err, MediaError::Io { .. }));
}

#[test]
fn import_rejects_path_without_file_name() {
    let root = tempfile::tempdir().unwrap();
    let err = MediaLibrary::new(root.path(), "media")
        .import(Path::new("/"))
        .unwrap_err();
    assert!(matches!(err, MediaError::MissingFileName));
}
