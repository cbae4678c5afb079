//! CLI integration tests for the csv-manager binary.

use anyhow::Result;
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn csv_manager(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_csv-manager"))
        .args(args)
        .output()?)
}

#[test]
fn split_writes_numbered_files() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("a.csv");
    fs::write(&src, "id,val\n1,a\n2,b\n3,c\n4,d\n")?;

    let out = csv_manager(&["split", "-a", "2", "-f", src.to_str().unwrap()])?;
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("New files created successfully"));

    assert_eq!(fs::read_to_string(dir.path().join("001.a.csv"))?, "id,val\n1,a\n2,b\n");
    assert_eq!(fs::read_to_string(dir.path().join("002.a.csv"))?, "id,val\n3,c\n4,d\n");
    Ok(())
}

#[test]
fn divide_alias_works() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("d.csv");
    fs::write(&src, "1\n2\n3\n")?;

    let out = csv_manager(&["divide", "--amount", "3", src.to_str().unwrap()])?;
    assert!(out.status.success());
    assert!(dir.path().join("003.d.csv").exists());
    Ok(())
}

#[test]
fn too_few_rows_exits_zero_without_files() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("s.csv");
    fs::write(&src, "1\n2\n")?;

    let out = csv_manager(&["split", "-a", "5", src.to_str().unwrap()])?;
    assert_eq!(out.status.code(), Some(0));
    assert!(
        String::from_utf8_lossy(&out.stdout)
            .contains("File lines amount (2) is smaller than requested parts (5)")
    );
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn validation_errors_exit_one() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("v.csv");
    fs::write(&src, "1\n2\n")?;
    let src = src.to_str().unwrap();
    let missing = dir.path().join("missing.csv");

    for args in [
        vec!["split", "-a", "1", src],
        vec!["split", "-a", "1000", src],
        vec!["split", "-d", "::", src],
        vec!["split"],
        vec!["shuffle", src, src],
        vec!["shuffle", missing.to_str().unwrap()],
    ] {
        let out = csv_manager(&args)?;
        assert_eq!(out.status.code(), Some(1), "args: {args:?}");
    }
    Ok(())
}

#[test]
fn malformed_csv_exits_one() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("m.csv");
    fs::write(&src, "1,2\n3\n")?;

    let out = csv_manager(&["split", src.to_str().unwrap()])?;
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));
    Ok(())
}

#[test]
fn failed_partition_writers_exit_one() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("a.csv");
    fs::write(&src, "1\n2\n3\n4\n5\n6\n7\n")?;
    fs::create_dir(dir.path().join("002.a.csv"))?;
    fs::create_dir(dir.path().join("003.a.csv"))?;

    let out = csv_manager(&["split", "-a", "3", src.to_str().unwrap()])?;
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("2 of 3 partition writers failed"), "stderr: {stderr}");
    assert!(!String::from_utf8_lossy(&out.stdout).contains("New files created successfully"));
    assert_eq!(fs::read_to_string(dir.path().join("001.a.csv"))?, "1\n2\n3\n");
    Ok(())
}

#[test]
fn shuffle_with_backup() -> Result<()> {
    let dir = tempdir()?;
    let src = dir.path().join("r.csv");
    let body: String = (0..50).map(|i| format!("{i}\n")).collect();
    fs::write(&src, &body)?;

    let out = csv_manager(&["shuffle", "--backup", "--seed", "11", src.to_str().unwrap()])?;
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    assert_eq!(fs::read_to_string(dir.path().join("r.csv.old"))?, body);
    let mut after: Vec<u32> = fs::read_to_string(&src)?
        .lines()
        .map(|l| l.parse().unwrap())
        .collect();
    after.sort_unstable();
    assert_eq!(after, (0..50).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn help_and_version_exit_zero() -> Result<()> {
    assert_eq!(csv_manager(&["--help"])?.status.code(), Some(0));
    assert_eq!(csv_manager(&["--version"])?.status.code(), Some(0));
    Ok(())
}
