/*!
 * Application controller.
 *
 * Wires the configuration, the file system walk and the two lint passes
 * together: decides for every input file whether it is a scenario script
 * or a translation catalog, runs the matching pass and writes the fixed
 * text back unless check-only mode is on.
 */

use anyhow::Result;
use log::{debug, error, info};
use std::path::Path;

use crate::app_config::Config;
use crate::catalog::fix_translation_file;
use crate::diagnostics::ConsoleSink;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::scenario::fix_scenario_file;

/// How a file is interpreted by the linter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// KiriKiri-style scenario script
    Scenario,
    /// Gettext-style translation catalog
    Translation,
}

/// Totals of one linter run
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    /// Files read and linted
    pub files_processed: usize,
    /// Files whose fixed text differed and was (or would be) written back
    pub files_changed: usize,
    /// Diagnostic messages emitted across all files
    pub diagnostics: usize,
}

/// Main controller struct responsible for coordinating the linting process
pub struct Controller {
    config: Config,
    kind_override: Option<FileKind>,
}

impl Controller {
    /// Create a new controller with the default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Controller { config, kind_override: None }
    }

    /// Force every input file to be treated as the given kind
    pub fn with_kind_override(mut self, kind: Option<FileKind>) -> Self {
        self.kind_override = kind;
        self
    }

    /// Lint a single file or every matching file under a directory
    pub fn run<P: AsRef<Path>>(&self, input_path: P) -> Result<RunSummary> {
        let input_path = input_path.as_ref();
        let mut summary = RunSummary::default();

        if FileManager::file_exists(input_path) {
            self.process_file(input_path, &mut summary)?;
        } else if FileManager::dir_exists(input_path) {
            self.run_folder(input_path, &mut summary)?;
        } else {
            return Err(AppError::File(format!("Input path does not exist: {:?}", input_path)).into());
        }

        info!(
            "Processed {} file(s), {} changed, {} diagnostic(s)",
            summary.files_processed, summary.files_changed, summary.diagnostics
        );
        Ok(summary)
    }

    fn run_folder(&self, dir: &Path, summary: &mut RunSummary) -> Result<()> {
        info!("Scanning directory: {:?}", dir);

        let extensions: Vec<String> = self
            .config
            .scenario_extensions
            .iter()
            .chain(&self.config.translation_extensions)
            .cloned()
            .collect();

        for path in FileManager::find_files(dir, &extensions)? {
            // a broken file should not stop the rest of the run
            if let Err(e) = self.process_file(&path, summary) {
                error!("Error processing {:?}: {}", path, e);
            }
        }
        Ok(())
    }

    /// Kind of the file, from the override or its extension
    fn detect_kind(&self, path: &Path) -> Option<FileKind> {
        if let Some(kind) = self.kind_override {
            return Some(kind);
        }
        if FileManager::has_extension(path, &self.config.scenario_extensions) {
            Some(FileKind::Scenario)
        } else if FileManager::has_extension(path, &self.config.translation_extensions) {
            Some(FileKind::Translation)
        } else {
            None
        }
    }

    fn process_file(&self, path: &Path, summary: &mut RunSummary) -> Result<()> {
        let kind = self.detect_kind(path).ok_or_else(|| {
            AppError::Input(format!("Cannot tell the file kind from the extension: {:?}", path))
        })?;

        debug!("Linting {:?} as {:?}", path, kind);
        let text = FileManager::read_to_string(path)?;
        let file_name = path.file_name().map_or_else(
            || path.to_string_lossy().into_owned(),
            |name| name.to_string_lossy().into_owned(),
        );

        let mut sink = ConsoleSink::new();
        let fixed = match kind {
            FileKind::Scenario => fix_scenario_file(&file_name, &text, &mut sink),
            FileKind::Translation => fix_translation_file(&file_name, &text, &mut sink),
        };

        summary.files_processed += 1;
        summary.diagnostics += sink.emitted;

        if fixed != text {
            summary.files_changed += 1;
            if self.config.check_only {
                info!("Would fix {:?} (check-only)", path);
            } else {
                FileManager::write_to_file(path, &fixed)?;
                info!("Fixed {:?}", path);
            }
        }
        Ok(())
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
