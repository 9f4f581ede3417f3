/*!
 * Common test utilities for the kslint test suite
 */

use std::fs;
use std::path::PathBuf;
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

/// Creates a sample scenario script for testing
pub fn create_test_scenario(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "*page0|\n  \"Bonjour !\n  Oui.\"\n@pg\n";
    create_test_file(dir, filename, content)
}

/// Creates a sample translation catalog for testing
pub fn create_test_catalog(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "#: scenario/prologue.ks:12\nmsgid \"well...\"\nmsgstr \"c'est bon...\"\n";
    create_test_file(dir, filename, content)
}
