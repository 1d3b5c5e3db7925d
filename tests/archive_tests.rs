mod support;

use kodegen_release::error::ArchiveError;
use kodegen_release::{ReleaseError, create_archive};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use support::write_tree;

fn read_entries(archive: &Path) -> BTreeMap<String, Vec<u8>> {
    let file = std::fs::File::open(archive).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    let mut entries = BTreeMap::new();
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).unwrap();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();
        entries.insert(entry.name().to_string(), contents);
    }
    entries
}

#[tokio::test]
async fn archive_holds_exactly_the_regular_files() {
    let dir = tempfile::tempdir().unwrap();
    let dist = dir.path().join("dist");
    let files: &[(&str, &[u8])] = &[
        ("index.html", b"<html></html>"),
        ("assets/app.js", b"console.log(1)"),
        ("assets/img/logo.png", &[0x89, 0x50, 0x4e, 0x47, 0x00, 0xff]),
        ("empty.txt", b""),
    ];
    write_tree(&dist, files);
    std::fs::create_dir_all(dist.join("empty-dir/nested")).unwrap();

    let destination = dir.path().join("release.zip");
    let summary = create_archive(&dist, &destination).await.unwrap();
    assert_eq!(summary.files, files.len());
    assert!(summary.bytes > 0);

    let expected: BTreeMap<String, Vec<u8>> = files
        .iter()
        .map(|(name, contents)| (name.to_string(), contents.to_vec()))
        .collect();
    assert_eq!(read_entries(&destination), expected);
}

#[cfg(unix)]
#[tokio::test]
async fn symlinked_files_are_archived_with_target_contents() {
    let dir = tempfile::tempdir().unwrap();
    let dist = dir.path().join("dist");
    write_tree(&dist, &[("index.html", b"<html></html>")]);
    let shared = dir.path().join("shared.css");
    std::fs::write(&shared, b"body {}").unwrap();
    std::os::unix::fs::symlink(&shared, dist.join("style.css")).unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone.css"), dist.join("dangling.css")).unwrap();

    let destination = dir.path().join("release.zip");
    let summary = create_archive(&dist, &destination).await.unwrap();
    assert_eq!(summary.files, 2);

    let entries = read_entries(&destination);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries["style.css"], b"body {}");
    assert_eq!(entries["index.html"], b"<html></html>");
}

#[tokio::test]
async fn archive_inside_source_does_not_include_itself() {
    let dir = tempfile::tempdir().unwrap();
    let files: &[(&str, &[u8])] = &[("a.txt", b"a"), ("sub/b.txt", b"b")];
    write_tree(dir.path(), files);

    let destination = dir.path().join("release.zip");
    let summary = create_archive(dir.path(), &destination).await.unwrap();
    assert_eq!(summary.files, 2);

    let names: Vec<String> = read_entries(&destination).into_keys().collect();
    assert_eq!(names, vec!["a.txt".to_string(), "sub/b.txt".to_string()]);
}

#[tokio::test]
async fn empty_directory_produces_empty_archive() {
    let dir = tempfile::tempdir().unwrap();
    let dist = dir.path().join("dist");
    std::fs::create_dir_all(&dist).unwrap();

    let destination = dir.path().join("release.zip");
    let summary = create_archive(&dist, &destination).await.unwrap();
    assert_eq!(summary.files, 0);
    assert!(read_entries(&destination).is_empty());
}

#[tokio::test]
async fn missing_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = create_archive(&dir.path().join("dist"), &dir.path().join("release.zip"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReleaseError::Archive(ArchiveError::DirectoryNotFound { .. })
    ));
    assert!(err.to_string().contains("not found"));
    assert!(!dir.path().join("release.zip").exists());
}

#[tokio::test]
async fn file_as_source_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("dist");
    std::fs::write(&file, b"not a dir").unwrap();

    let err = create_archive(&file, &dir.path().join("release.zip"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ReleaseError::Archive(ArchiveError::NotADirectory { .. })
    ));
}
