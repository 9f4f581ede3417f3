/*!
 * End-to-end linting workflow tests
 */

use std::fs;
use anyhow::Result;
use kslint::app_controller::Controller;
use crate::common;

/// Test a full run over a directory holding both file kinds
#[test]
fn test_lintWorkflow_withScenarioAndCatalog_shouldFixBothOnDisk() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let scenario = common::create_test_scenario(&dir, "prologue.ks")?;
    let catalog = common::create_test_catalog(&dir, "fr.po")?;

    let summary = Controller::new().run(&dir)?;

    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.files_changed, 2);
    assert!(summary.diagnostics > 0);

    // the scenario gained its byte order mark and curly quotes
    let fixed_scenario = fs::read_to_string(&scenario)?;
    assert!(fixed_scenario.starts_with('\u{feff}'));
    assert!(fixed_scenario.contains("“Bonjour\u{a0}!"));
    assert!(fixed_scenario.contains("Oui.”"));

    // the catalog translation was normalized, the source text kept as is
    let fixed_catalog = fs::read_to_string(&catalog)?;
    assert!(fixed_catalog.contains("msgid \"well...\""));
    assert!(fixed_catalog.contains("msgstr \"c’est bon…\""));
    Ok(())
}

/// Test that a second run over already fixed files changes nothing
#[test]
fn test_lintWorkflow_withSecondRun_shouldBeStable() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_scenario(&dir, "prologue.ks")?;
    common::create_test_catalog(&dir, "fr.po")?;

    let controller = Controller::new();
    controller.run(&dir)?;
    let second = controller.run(&dir)?;

    assert_eq!(second.files_processed, 2);
    assert_eq!(second.files_changed, 0);
    Ok(())
}
