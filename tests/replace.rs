use csv_manager::atomic_replace;
use std::fs;

#[test]
fn replace_with_backup() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let orig = tmp.path().join("data.csv");
    let new = tmp.path().join("tmp.data.csv");
    fs::write(&orig, "old\n")?;
    fs::write(&new, "new\n")?;

    let saved = atomic_replace(&orig, &new, true)?;
    assert_eq!(saved, Some(tmp.path().join("data.csv.old")));
    assert_eq!(fs::read_to_string(&orig)?, "new\n");
    assert_eq!(fs::read_to_string(tmp.path().join("data.csv.old"))?, "old\n");
    assert!(!new.exists());
    Ok(())
}

#[test]
fn replace_without_backup() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let orig = tmp.path().join("data.csv");
    let new = tmp.path().join("tmp.data.csv");
    fs::write(&orig, "old\n")?;
    fs::write(&new, "new\n")?;

    assert_eq!(atomic_replace(&orig, &new, false)?, None);
    assert_eq!(fs::read_to_string(&orig)?, "new\n");
    assert!(!tmp.path().join("data.csv.old").exists());
    assert!(!new.exists());
    Ok(())
}

#[test]
fn previous_backup_is_overwritten() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let orig = tmp.path().join("data.csv");
    let new = tmp.path().join("tmp.data.csv");
    fs::write(&orig, "second\n")?;
    fs::write(tmp.path().join("data.csv.old"), "first\n")?;
    fs::write(&new, "third\n")?;

    atomic_replace(&orig, &new, true)?;
    assert_eq!(fs::read_to_string(tmp.path().join("data.csv.old"))?, "second\n");
    assert_eq!(fs::read_to_string(&orig)?, "third\n");
    Ok(())
}

#[test]
fn missing_replacement_keeps_original_in_place() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let orig = tmp.path().join("data.csv");
    fs::write(&orig, "old\n")?;

    let err = atomic_replace(&orig, &tmp.path().join("tmp.data.csv"), false).unwrap_err();
    assert!(err.to_string().contains("rename"));
    assert_eq!(fs::read_to_string(&orig)?, "old\n");
    Ok(())
}
