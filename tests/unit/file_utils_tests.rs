/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use kslint::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file =
        common::create_test_file(&temp_dir.path().to_path_buf(), "exists.ks", "  Texte.\n")?;

    assert!(FileManager::file_exists(test_file.to_str().unwrap()));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.ks"));
}

/// Test that dir_exists returns true for existing directories
#[test]
fn test_dir_exists_withExistingDir_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(FileManager::dir_exists(temp_dir.path()));
    Ok(())
}

/// Test that dir_exists returns false for files
#[test]
fn test_dir_exists_withFile_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(&temp_dir.path().to_path_buf(), "file.po", "")?;
    assert!(!FileManager::dir_exists(&test_file));
    Ok(())
}

/// Test extension matching against a configured list
#[test]
fn test_has_extension_withConfiguredList_shouldMatchCaseInsensitively() {
    let extensions = vec!["ks".to_string(), "po".to_string()];

    assert!(FileManager::has_extension("scenario/prologue.ks", &extensions));
    assert!(FileManager::has_extension("catalog/FR.PO", &extensions));
    assert!(!FileManager::has_extension("notes.txt", &extensions));
    assert!(!FileManager::has_extension("no_extension", &extensions));
}

/// Test that find_files only returns matching files, sorted
#[test]
fn test_find_files_withMixedDirectory_shouldReturnMatchesSorted() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "b.ks", "")?;
    common::create_test_file(&dir, "a.po", "")?;
    common::create_test_file(&dir, "notes.txt", "")?;

    let found = FileManager::find_files(&dir, &["ks".to_string(), "po".to_string()])?;

    assert_eq!(found.len(), 2);
    assert!(found[0].ends_with("a.po"));
    assert!(found[1].ends_with("b.ks"));
    Ok(())
}

/// Test write then read roundtrip, with parent directory creation
#[test]
fn test_write_to_file_withMissingParentDir_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("sub").join("dir").join("file.ks");

    FileManager::write_to_file(&nested, "  Texte.\n")?;

    assert_eq!(FileManager::read_to_string(&nested)?, "  Texte.\n");
    Ok(())
}
