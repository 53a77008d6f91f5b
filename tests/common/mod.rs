/*!
 * Common test utilities for the mptranslate test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample YAML locale file for testing
pub fn create_test_locale(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = r#"messages:
  welcome: "Hello %player_name%, welcome!"
  error: "&cSomething went wrong"
  item: "You received minecraft:diamond_sword"
gui:
  close: "[close]"
  slots: 27
requirements:
  view_requirement:
    type: "!has permission"
"#;
    create_test_file(dir, filename, content)
}
