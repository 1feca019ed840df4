use file_upload::{Upload, ValidationOptions, upload_from_file, validate};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn report(label: &str, upload: &Upload) {
    match upload {
        Upload::Valid(valid) => println!(
            " -> {label}: valid ({}, image: {})",
            valid.record().declared_type(),
            valid.is_image()
        ),
        Upload::Error(err) => println!(
            " -> {label}: rejected ({})",
            err.message().unwrap_or("no message")
        ),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let options = ValidationOptions {
        max_size: Some(2048),
        allowed_types: Some(vec!["image/jpeg".into(), "image/png".into()]),
        allowed_extensions: Some(vec!["jpg".into(), "png".into()]),
    };

    println!("--- Raw parser fields ---");
    let cases = [
        (
            "ok",
            json!({"name": "a.jpg", "type": "image/jpeg", "size": 1024, "tmp_name": "/tmp/x", "error": 0}),
        ),
        (
            "too large",
            json!({"name": "a.jpg", "type": "image/jpeg", "size": 4096, "tmp_name": "/tmp/x", "error": 0}),
        ),
        (
            "partial",
            json!({"name": "a.jpg", "type": "image/jpeg", "size": 10, "tmp_name": "/tmp/x", "error": 3}),
        ),
        ("no tmp_name", json!({"name": "a.jpg", "type": "image/jpeg", "size": 10, "error": 0})),
    ];
    for (label, raw) in cases {
        let Some(fields) = raw.as_object() else {
            continue;
        };
        report(label, &validate(fields, &options));
    }

    if let Some(path) = std::env::args().nth(1) {
        println!("\n--- File on disk: {path} ---");
        match upload_from_file(&path, &options) {
            Ok(upload) => {
                report(&path, &upload);
                let _ = std::fs::remove_file(upload.record().temp_location());
            }
            Err(err) => eprintln!(" -> fixture failed: {err}"),
        }
    }
}
