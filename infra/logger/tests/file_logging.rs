use confhub_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_file_logging_writes_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("confhub-file")
        .console(false)
        .level_name("info")?
        .directory(Some(&log_dir))
        .json(true)
        .init()?;
    assert!(logger.writes_files());

    tracing::info!(conference = "RustConf", "conference created");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(log_file)?;
    let line = contents.lines().next().expect("at least one line");
    let value: serde_json::Value = serde_json::from_str(line)?;
    assert_eq!(value["fields"]["message"], "conference created");
    assert_eq!(value["fields"]["conference"], "RustConf");

    Ok(())
}
