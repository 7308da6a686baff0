use std::fs;

use core_lib::log::logger::Logger;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[tokio::test]
async fn test_log_levels_and_raw_lines() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let logger = Logger::new(&dir.path().join("watch.log")).await?;

    logger.banner().await?;
    logger.info("test info").await?;
    logger.error("test error").await?;
    logger.raw("verbatim output").await?;

    let contents = fs::read_to_string(logger.path())?;
    assert!(contents.contains("Trigger Time:"));
    assert!(contents.contains("INFO: test info"));
    assert!(contents.contains("ERROR: test error"));
    assert!(contents.ends_with("\nverbatim output\n"));
    Ok(())
}

#[tokio::test]
async fn test_tail_returns_last_lines_in_order() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("watch.log");
    fs::write(&path, "one\n\ntwo\nthree\n")?;

    assert_eq!(Logger::tail(&path, 2).await?, vec!["two", "three"]);
    assert_eq!(Logger::tail(&path, 10).await?, vec!["one", "two", "three"]);
    Ok(())
}

#[tokio::test]
async fn test_tail_keeps_multibyte_chars_of_long_lines() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("watch.log");
    let mut line = String::from("✅ Deployment script finished.");
    while line.len() < 8193 {
        line.push('x');
    }
    fs::write(&path, format!("{line}\n"))?;

    assert_eq!(Logger::tail(&path, 1).await?, vec![line]);
    Ok(())
}

#[tokio::test]
async fn test_tail_missing_log_fails() {
    let dir = tempdir().unwrap();
    assert!(Logger::tail(&dir.path().join("absent.log"), 5).await.is_err());
}
