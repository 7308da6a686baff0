use core_lib::core::state::SeenCommits;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[tokio::test]
async fn test_missing_state_file_loads_as_none() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let state = SeenCommits::load(&dir.path().join("existing_commits.txt")).await?;
    assert_eq!(state, None);
    Ok(())
}

#[tokio::test]
async fn test_save_writes_one_id_per_line() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("existing_commits.txt");
    let seen = SeenCommits::new(vec!["aaaaaaa".into(), "bbbbbbb".into()]);

    seen.save(&path).await?;

    assert_eq!(std::fs::read_to_string(&path)?, "aaaaaaa\nbbbbbbb\n");
    assert_eq!(SeenCommits::load(&path).await?, Some(seen));
    Ok(())
}

#[tokio::test]
async fn test_save_overwrites_previous_content() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("existing_commits.txt");
    std::fs::write(&path, "1111111\n2222222\n3333333\n")?;

    SeenCommits::new(vec!["4444444".into()]).save(&path).await?;

    assert_eq!(std::fs::read_to_string(&path)?, "4444444\n");
    Ok(())
}

#[test]
fn test_parse_ignores_blank_lines_and_whitespace() {
    let seen = SeenCommits::parse("abc1234\r\n\n  def5678 \n");
    assert_eq!(seen.ids, vec!["abc1234".to_string(), "def5678".to_string()]);
}

#[test]
fn test_unseen_keeps_fetch_order() {
    let seen = SeenCommits::new(vec!["b".into(), "d".into()]);
    let fetched: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
    let unseen: Vec<&String> = seen.unseen(&fetched);
    assert_eq!(unseen, vec!["a", "c"]);
}
