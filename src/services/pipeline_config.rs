use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::services::output_json::DatasetSources;

pub const DEFAULT_CASES_FILE: &str = "COVID_US_cases.csv";
pub const DEFAULT_VARIANTS_FILE: &str = "perCountryData.json";
pub const DEFAULT_OUTPUT_FILE: &str = "vis1_interpolated_daily_and_monthly_percentages.json";

#[derive(Error, Debug)]
pub enum PipelineConfigError {
    #[error("failed to read config yaml file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse config yaml file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Resolved input/output locations for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub cases_path: PathBuf,
    pub variants_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineSettings::default().into_config()
    }
}

impl PipelineConfig {
    /// File names of the inputs, used as source identifiers in the output.
    pub fn sources(&self) -> DatasetSources {
        DatasetSources {
            cases_csv: file_name(&self.cases_path),
            variants_json: file_name(&self.variants_path),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Partially specified settings, as read from a YAML config file or taken
/// from command-line flags. Every key is optional.
///
/// ```yaml
/// workspace: /data/vis
/// cases_path: COVID_US_cases.csv
/// variants_path: perCountryData.json
/// output_path: out/vis1.json
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineSettings {
    /// Base directory for relative paths.
    pub workspace: Option<PathBuf>,
    pub cases_path: Option<PathBuf>,
    pub variants_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

impl PipelineSettings {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| PipelineConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents, path)
    }

    pub fn from_yaml_str(contents: &str, path: &Path) -> Result<Self, PipelineConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|source| PipelineConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Values set in `self` win; unset ones are taken from `base`.
    pub fn or(self, base: PipelineSettings) -> PipelineSettings {
        PipelineSettings {
            workspace: self.workspace.or(base.workspace),
            cases_path: self.cases_path.or(base.cases_path),
            variants_path: self.variants_path.or(base.variants_path),
            output_path: self.output_path.or(base.output_path),
        }
    }

    /// Fills unset paths with the default file names and resolves relative
    /// paths against `workspace`.
    pub fn into_config(self) -> PipelineConfig {
        let workspace = self.workspace;
        let resolve = |path: Option<PathBuf>, default: &str| {
            let path = path.unwrap_or_else(|| PathBuf::from(default));
            match &workspace {
                Some(base) if path.is_relative() => base.join(path),
                _ => path,
            }
        };

        PipelineConfig {
            cases_path: resolve(self.cases_path, DEFAULT_CASES_FILE),
            variants_path: resolve(self.variants_path, DEFAULT_VARIANTS_FILE),
            output_path: resolve(self.output_path, DEFAULT_OUTPUT_FILE),
        }
    }
}
