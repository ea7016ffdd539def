use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.init_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .glotbundlerc.json

    ----- stderr -----
    ");

    let content = test.read_file(".glotbundlerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["fileNamePattern"], "i18n/[locale].i18n");
    assert!(content.contains("\n  \""), "Config should be pretty-printed");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".glotbundlerc.json", "{}")?;

    assert_cmd_snapshot!(test.init_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    ✘ .glotbundlerc.json already exists
    ");
    assert_eq!(test.read_file(".glotbundlerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_picked_up_by_build() -> Result<()> {
    let test = CliTest::with_manifest(
        r#"{ "chunks": [{ "entryPoint": true }],
             "modules": [{ "identifier": "./a", "chunk": 0, "json": { "en": { "k": "v" } } }] }"#,
    )?;
    assert!(test.init_command().output()?.status.success());

    assert_cmd_snapshot!(test.build_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Wrote 1 locale bundle for 1 chunk (1 module) to dist
      i18n/en.i18n  en  9 B

    ----- stderr -----
    ");
    assert_eq!(test.read_file("dist/i18n/en.i18n")?, r#"{"./a":{"k":"v"}}"#);

    Ok(())
}
