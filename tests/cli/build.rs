use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, PROJECT_FILTER};

const MANIFEST: &str = r#"{
    "chunks": [
        { "name": "main", "entryPoint": true, "children": [1] },
        { "name": "settings", "parents": [0], "children": [2] },
        { "name": "profile", "parents": [1] }
    ],
    "modules": [
        { "identifier": "./src/app.i18n", "chunk": 0, "path": "src/app.i18n.json" },
        { "identifier": "./src/settings.i18n", "chunk": 1, "path": "src/settings.i18n.json" },
        { "identifier": "./src/profile.i18n", "chunk": 2, "key": "profile",
          "json": { "en": { "name": "Name" }, "fr": { "name": "Nom" } } }
    ]
}"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_manifest(MANIFEST)?;
    test.write_file(
        "src/app.i18n.json",
        r#"{ "shared": { "brand": "Acme" }, "en": { "hello": "Hello" }, "fr": { "hello": "Bonjour" } }"#,
    )?;
    test.write_file(
        "src/settings.i18n.json",
        r#"{ "en": { "title": "Settings" }, "fr": { "title": "Réglages" } }"#,
    )?;
    Ok(test)
}

#[test]
fn test_build_merges_dynamic_chunks_into_entry() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".glotbundlerc.json",
        r#"{ "fileNamePattern": "i18n/[name].[locale].json", "sharedTextKey": "shared" }"#,
    )?;

    assert_cmd_snapshot!(test.build_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Wrote 2 locale bundles for 1 chunk (3 modules) to dist
      i18n/main.en.json  en  52 B
      i18n/main.fr.json  fr  54 B

    ----- stderr -----
    ");

    assert_eq!(
        test.read_file("dist/i18n/main.en.json")?,
        r#"{"src/app":{"brand":"Acme","hello":"Hello"},"src/settings":{"title":"Settings"},"profile":{"name":"Name"}}"#
    );
    assert_eq!(
        test.read_file("dist/i18n/main.fr.json")?,
        r#"{"src/app":{"brand":"Acme","hello":"Bonjour"},"src/settings":{"title":"Réglages"},"profile":{"name":"Nom"}}"#
    );
    assert!(!test.exists("dist/i18n/settings.en.json"));
    assert!(!test.exists("dist/i18n/profile.en.json"));
    assert!(!test.exists("dist/i18n/main.shared.json"));

    Ok(())
}

#[test]
fn test_build_cli_flags_override_config() -> Result<()> {
    let test = project()?;
    test.write_file(".glotbundlerc.json", r#"{ "fileNamePattern": "[name]/[locale]" }"#)?;

    let output = test
        .build_command()
        .args(["--out-dir", "out", "--pattern", "[locale].json", "--locale", "fr"])
        .output()?;

    assert!(output.status.success());
    assert!(test.exists("out/fr.json"));
    assert!(!test.exists("out/en.json"));
    assert!(!test.exists("out/main"));

    Ok(())
}

#[test]
fn test_build_with_collision_exits_with_failure() -> Result<()> {
    let test = CliTest::with_manifest(
        r#"{
            "chunks": [{ "name": "a", "entryPoint": true }, { "name": "b", "entryPoint": true }],
            "modules": [
                { "identifier": "./a", "chunk": 0, "json": { "en": { "x": "1" } } },
                { "identifier": "./b", "chunk": 1, "json": { "en": { "x": "2" } } }
            ]
        }"#,
    )?;

    assert_cmd_snapshot!(test.build_command().args(["--pattern", "[locale].json"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✓ Wrote 2 locale bundles for 2 chunks (2 modules) to dist
      en.json  en  9 B
      en.json  en  9 B

    ----- stderr -----
    warning: en.json was written by more than one chunk (add [name] to the file name pattern)
    ");

    Ok(())
}

#[test]
fn test_build_child_edge_without_parent_edge() -> Result<()> {
    let test = CliTest::with_manifest(
        r#"{
            "chunks": [{ "name": "main", "entryPoint": true, "children": [1] }, { "name": "lazy" }],
            "modules": [{ "identifier": "./lazy", "chunk": 1, "key": "lazy", "json": { "en": { "x": "1" } } }]
        }"#,
    )?;

    let output = test
        .build_command()
        .args(["--pattern", "[name].[locale].json"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("dist/main.en.json")?, r#"{"lazy":{"x":"1"}}"#);
    assert!(!test.exists("dist/lazy.en.json"));

    Ok(())
}

#[test]
fn test_build_missing_manifest_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    insta::with_settings!({ filters => vec![PROJECT_FILTER] }, {
        assert_cmd_snapshot!(test.build_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Failed to read manifest: [PROJECT]/i18n-manifest.json: No such file or directory (os error 2)
        ");
    });
    assert!(!test.root().join("dist").exists());

    Ok(())
}

#[test]
fn test_build_invalid_pattern_is_an_error() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.build_command().args(["--pattern", "bundle.json"]), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: 'fileNamePattern' must contain [locale]: "bundle.json"
    "#);

    Ok(())
}
