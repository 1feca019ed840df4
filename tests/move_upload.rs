use std::fs;
use std::path::Path;

use file_upload::{
    RenameMover, Upload, UploadRecord, UploadRegistry, UploadedFileMover, ValidUpload,
    ValidationOptions, validate,
};

fn valid_upload(temp_location: &Path) -> ValidUpload {
    let record = UploadRecord::new(
        "avatar.png",
        "image/png",
        3,
        temp_location.to_string_lossy(),
        0,
    );
    match validate(&record.to_fields(), &ValidationOptions::default()) {
        Upload::Valid(upload) => upload,
        Upload::Error(err) => panic!("unexpected rejection: {:?}", err.message()),
    }
}

#[test]
fn rename_mover_relocates_bytes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let temp = dir.path().join("php8f2a");
    let dest = dir.path().join("avatar.png");
    fs::write(&temp, b"png").expect("write temp");

    let upload = valid_upload(&temp);
    assert!(upload.move_to(&dest, &RenameMover));
    assert!(!temp.exists());
    assert_eq!(fs::read(&dest).expect("read dest"), b"png");
}

#[test]
fn move_fails_quietly_when_source_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let upload = valid_upload(&dir.path().join("gone"));

    assert!(!upload.move_to(dir.path().join("dest"), &RenameMover));
}

#[test]
fn move_fails_quietly_when_destination_unwritable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let temp = dir.path().join("php1234");
    fs::write(&temp, b"png").expect("write temp");

    let upload = valid_upload(&temp);
    let dest = dir.path().join("no").join("such").join("dir").join("a.png");
    assert!(!upload.move_to(&dest, &RenameMover));
    assert!(temp.exists());
}

#[test]
fn secure_mover_rejects_forged_temp_location() {
    let dir = tempfile::tempdir().expect("tempdir");
    let secret = dir.path().join("passwd");
    fs::write(&secret, b"root:x:0:0").expect("write secret");

    let mover = UploadedFileMover::new(UploadRegistry::new());
    let upload = valid_upload(&secret);

    assert!(!upload.move_to(dir.path().join("public.png"), &mover));
    assert!(secret.exists());
}

#[test]
fn secure_mover_accepts_registered_upload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let temp = dir.path().join("php5c6d");
    let dest = dir.path().join("avatar.png");
    fs::write(&temp, b"png").expect("write temp");

    let registry = UploadRegistry::new();
    registry.register(&temp);
    let mover = UploadedFileMover::new(registry);

    let upload = valid_upload(&temp);
    assert!(upload.move_to(&dest, &mover));
    assert!(dest.exists());
    assert!(mover.registry().is_empty());
}

#[test]
fn rejected_upload_path_is_released_at_request_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let temp = dir.path().join("php9a9a");
    fs::write(&temp, b"exe").expect("write temp");

    let registry = UploadRegistry::new();
    registry.register(&temp);

    let record = UploadRecord::new(
        "virus.exe",
        "application/x-msdownload",
        3,
        temp.to_string_lossy(),
        0,
    );
    let options = ValidationOptions {
        allowed_extensions: Some(vec!["png".into()]),
        ..Default::default()
    };
    assert!(!validate(&record.to_fields(), &options).is_valid());

    let leftovers = registry.drain();
    assert_eq!(leftovers, vec![temp.clone()]);
    for path in leftovers {
        fs::remove_file(path).expect("remove leftover");
    }
    assert!(registry.is_empty());
    assert!(!temp.exists());
}
