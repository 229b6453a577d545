use anyhow::Result;

use crate::{CliTest, run_captured};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (stdout, _stderr, code) = run_captured(&mut cmd)?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("Created .rawlintrc.json"));

    let config = test.read_file(".rawlintrc.json")?;
    assert!(config.contains("rawStatements"));
    assert!(config.contains("^(raw|whereRaw|joinRaw)$"));

    Ok(())
}

#[test]
fn test_init_fails_when_config_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".rawlintrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (_stdout, stderr, code) = run_captured(&mut cmd)?;

    assert_eq!(code, Some(2));
    assert!(stderr.contains("already exists"));

    Ok(())
}
