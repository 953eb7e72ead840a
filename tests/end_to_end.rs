//! Builds small demo projects on disk and checks the written bundle.

use std::fs;
use std::path::Path;

use demo_bundler::{shell, BuildConfig, ErrorKind};
use tempfile::TempDir;

fn project(files: &[(&str, &[u8])]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    for &(name, contents) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        fs::write(&path, contents).expect("Failed to write fixture");
    }
    dir
}

fn config_for(dir: &Path, entry: &str) -> BuildConfig {
    BuildConfig {
        entry: dir.join(entry),
        output: dir.join("demo.html"),
        ..BuildConfig::default()
    }
}

#[test]
fn insert_and_embed_in_one_build() {
    let main: &[u8] = b"hello @insert(part.js) world\ndone @base64(logo.bin)\n";
    let part: &[u8] = b"INCLUDED";
    let logo: &[u8] = &[0x00, 0x01, 0x02];
    let dir = project(&[("main.js", main), ("part.js", part), ("logo.bin", logo)]);
    let config = config_for(dir.path(), "main.js");

    let report = demo_bundler::build(&config).expect("build should succeed");

    let html = fs::read_to_string(&config.output).expect("Failed to read output HTML");
    let body = "hello INCLUDED world\ndone AAEC\n";
    assert_eq!(html, shell::wrap("WebGL 2 Demo", body));
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.ends_with("done AAEC\n\n</script>"));
    assert_eq!(report.files_read, 3);
    assert_eq!(report.bytes_written, html.len());
}

#[test]
fn demo_layout_with_scripts_directory() {
    let main: &[u8] = b"\"use strict\";\n\n@insert(V3.js)\n@insert(M4.js)\n\nmain();\n";
    let v3: &[u8] = b"const V3 = { add(a, b) { return [a[0]+b[0], a[1]+b[1], a[2]+b[2]]; } };";
    let m4: &[u8] = b"const M4 = { identity() { return [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1]; } };";
    let dir = project(&[
        ("scripts/main.js", main),
        ("scripts/V3.js", v3),
        ("scripts/M4.js", m4),
    ]);
    let config = config_for(dir.path(), "scripts/main.js");

    demo_bundler::build(&config).expect("build should succeed");

    let html = fs::read_to_string(&config.output).unwrap();
    let v3_at = html.find("const V3").expect("V3 inlined");
    let m4_at = html.find("const M4").expect("M4 inlined");
    assert!(v3_at < m4_at);
    assert!(!html.contains("@insert"));
}

#[test]
fn nested_insert_fails_the_build() {
    let main: &[u8] = b"@insert(inner.js)\n";
    let inner: &[u8] = b"@insert(other.js)\n";
    let other: &[u8] = b"x";
    let dir = project(&[("main.js", main), ("inner.js", inner), ("other.js", other)]);
    let config = config_for(dir.path(), "main.js");

    let err = demo_bundler::build(&config).expect_err("nested insert must fail");
    assert!(matches!(err.kind, ErrorKind::InclusionNotAllowed));
    assert!(err
        .to_string()
        .ends_with("inner.js:1:1: Inserts only allowed in main file"));
}

#[test]
fn unterminated_directive_fails_the_build() {
    let main: &[u8] = b"let a = 1;\n@base64(missing\n";
    let dir = project(&[("main.js", main)]);
    let config = config_for(dir.path(), "main.js");

    let err = demo_bundler::build(&config).expect_err("unterminated directive must fail");
    assert!(matches!(err.kind, ErrorKind::MissingDelimiter));
    let location = err.location.expect("error should be located");
    assert_eq!((location.line, location.column), (2, 1));
}

#[test]
fn manifest_drives_the_build() {
    let manifest: &[u8] = br#"{ "entry": "src/app.js", "output": "out.html", "title": "Spinning Cube" }"#;
    let app: &[u8] = b"draw();\n";
    let dir = project(&[("bundle.json", manifest), ("src/app.js", app)]);

    let mut config = BuildConfig::discover(dir.path()).expect("manifest should load");
    config.entry = dir.path().join(&config.entry);
    config.output = dir.path().join(&config.output);

    demo_bundler::build(&config).expect("build should succeed");

    let html = fs::read_to_string(dir.path().join("out.html")).unwrap();
    assert!(html.contains("<title>Spinning Cube</title>"));
    assert!(html.contains("draw();\n"));
}
