/*!
 * Tests for the application controller
 */

use std::fs;
use anyhow::Result;
use kslint::app_config::Config;
use kslint::app_controller::{Controller, FileKind};
use kslint::errors::AppError;
use crate::common;

/// Test that a scenario file is fixed in place
#[test]
fn test_run_withScenarioFile_shouldFixItInPlace() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "prologue.ks",
        "*page0|\n  Attends !\n",
    )?;

    let summary = Controller::new().run(&file)?;

    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.files_changed, 1);
    let fixed = fs::read_to_string(&file)?;
    assert!(fixed.starts_with('\u{feff}'));
    assert!(fixed.contains("Attends\u{a0}!"));
    Ok(())
}

/// Test that check-only mode reports without touching the file
#[test]
fn test_run_withCheckOnly_shouldLeaveFileUntouched() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "*page0|\n  Attends !\n";
    let file = common::create_test_file(&temp_dir.path().to_path_buf(), "prologue.ks", content)?;

    let mut config = Config::default();
    config.check_only = true;
    let summary = Controller::with_config(config).run(&file)?;

    assert_eq!(summary.files_changed, 1);
    assert_eq!(fs::read_to_string(&file)?, content);
    Ok(())
}

/// Test that a directory run picks up both file kinds and skips the rest
#[test]
fn test_run_withDirectory_shouldProcessMatchingFilesOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_scenario(&dir, "a.ks")?;
    common::create_test_catalog(&dir, "fr.po")?;
    common::create_test_file(&dir, "notes.txt", "du coup...")?;

    let summary = Controller::new().run(&dir)?;

    assert_eq!(summary.files_processed, 2);
    Ok(())
}

/// Test that the kind override routes a file through the other pass
#[test]
fn test_run_withKindOverride_shouldUseForcedPass() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "strings.txt",
        "#: a:1\nmsgid \"x\"\nmsgstr \"c'est bon\"\n",
    )?;

    let controller = Controller::new().with_kind_override(Some(FileKind::Translation));
    let summary = controller.run(&file)?;

    assert_eq!(summary.files_processed, 1);
    assert!(fs::read_to_string(&file)?.contains("msgstr \"c’est bon\""));
    Ok(())
}

/// Test that a file with an unknown extension is rejected as an input error
#[test]
fn test_run_withUnknownExtension_shouldFailWithInputError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(&temp_dir.path().to_path_buf(), "notes.txt", "x")?;

    let err = Controller::new().run(&file).unwrap_err();
    assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Input(_))));
    Ok(())
}

/// Test that a missing input path is rejected as a file error
#[test]
fn test_run_withMissingPath_shouldFailWithFileError() {
    let err = Controller::new().run("does_not_exist.ks").unwrap_err();
    assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::File(_))));
}
