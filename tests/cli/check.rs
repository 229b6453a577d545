use anyhow::Result;

use crate::{CliTest, run_captured};

#[test]
fn test_interpolated_raw_call_is_reported() -> Result<()> {
    let test = CliTest::with_file("src/db.ts", "knex.raw(`select * from ${table}`);\n")?;

    let (stdout, _stderr, code) = run_captured(&mut test.check_command())?;

    assert_eq!(code, Some(1));
    assert!(stdout.contains("error: Avoid using raw() with an interpolated string"));
    assert!(stdout.contains("sql-injection"));
    assert!(stdout.contains("src/db.ts:1:6"));
    assert!(stdout.contains("1 problems (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_clean_project_exits_zero() -> Result<()> {
    let test = CliTest::with_file(
        "src/db.ts",
        "knex.raw('select ? from users', ['email']);\n",
    )?;

    let (stdout, _stderr, code) = run_captured(&mut test.check_command())?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("Checked 1 source file - no issues found"));

    Ok(())
}

#[test]
fn test_identifier_resolution_across_files_is_local() -> Result<()> {
    // Each file is analyzed against its own scope chain only.
    let test = CliTest::new()?;
    test.write_file(
        "src/queries.ts",
        "export const userQuery = `select * from ${table}`;\n",
    )?;
    test.write_file(
        "src/db.ts",
        "import { userQuery } from './queries';\nknex.raw(userQuery);\n",
    )?;

    let (stdout, _stderr, code) = run_captured(&mut test.check_command())?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("no issues found"));

    Ok(())
}

#[test]
fn test_multiple_findings_are_sorted_and_counted() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/b.ts",
        "knex('users').whereRaw(`id = ${id}`);\n",
    )?;
    test.write_file(
        "src/a.ts",
        "knex.raw('select * from ' + table);\nknex.raw(`delete from ${table}`);\n",
    )?;

    let (stdout, _stderr, code) = run_captured(&mut test.check_command())?;

    assert_eq!(code, Some(1));
    assert!(stdout.contains("3 problems (3 errors, 0 warnings)"));
    assert!(stdout.contains("Avoid using whereRaw() with an interpolated string"));

    let a_pos = stdout.find("src/a.ts:1:6").unwrap();
    let b_pos = stdout.find("src/b.ts:1:15").unwrap();
    assert!(a_pos < b_pos, "issues should be sorted by file path");

    Ok(())
}

#[test]
fn test_config_file_custom_raw_statements() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".rawlintrc.json",
        r#"{ "rawStatements": "^(raw|whereRaw|joinRaw|wrapQuery)$" }"#,
    )?;
    test.write_file("src/db.ts", "db.wrapQuery('select * from ' + table, null);\n")?;

    let (stdout, _stderr, code) = run_captured(&mut test.check_command())?;

    assert_eq!(code, Some(1));
    assert!(stdout.contains("Avoid using wrapQuery() with an interpolated string"));

    Ok(())
}

#[test]
fn test_builder_name_flag_filters_targets() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/db.ts",
        "lorem.raw(`select * from ${table}`);\nknex.raw(`select * from ${table}`);\n",
    )?;

    let mut cmd = test.check_command();
    cmd.args(["--builder-name", "(?i)lorem"]);
    let (stdout, _stderr, code) = run_captured(&mut cmd)?;

    assert_eq!(code, Some(1));
    assert!(stdout.contains("src/db.ts:1:7"));
    assert!(!stdout.contains("src/db.ts:2"));
    assert!(stdout.contains("1 problems"));

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".rawlintrc.json",
        r#"{ "ignores": ["**/generated/**"] }"#,
    )?;
    test.write_file("src/db.ts", "knex.raw(`a ${x}`);\n")?;
    test.write_file("generated/db.ts", "knex.raw(`b ${y}`);\n")?;

    let (stdout, _stderr, code) = run_captured(&mut test.check_command())?;

    assert_eq!(code, Some(1));
    assert!(stdout.contains("src/db.ts"));
    assert!(!stdout.contains("generated/db.ts"));

    Ok(())
}

#[test]
fn test_test_files_are_skipped_by_default() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/db.test.ts", "knex.raw(`a ${x}`);\n")?;

    let (stdout, _stderr, code) = run_captured(&mut test.check_command())?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("no issues found"));

    Ok(())
}

#[test]
fn test_parse_error_is_reported() -> Result<()> {
    let test = CliTest::with_file("src/broken.ts", "const = ;\n")?;

    let (stdout, _stderr, code) = run_captured(&mut test.check_command())?;

    assert_eq!(code, Some(1));
    assert!(stdout.contains("parse-error"));
    assert!(stdout.contains("src/broken.ts"));

    Ok(())
}

#[test]
fn test_invalid_config_regex_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".rawlintrc.json", r#"{ "rawStatements": "^(raw" }"#)?;
    test.write_file("src/db.ts", "knex.raw('x');\n")?;

    let (_stdout, stderr, code) = run_captured(&mut test.check_command())?;

    assert_eq!(code, Some(2));
    assert!(stderr.contains("rawStatements"));

    Ok(())
}

#[test]
fn test_help_without_command() -> Result<()> {
    let test = CliTest::new()?;

    let (stdout, _stderr, code) = run_captured(&mut test.command())?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("init"));

    Ok(())
}
