// src/config.rs

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::dataset::is_reserved_column;
use crate::process::ReshapeOptions;

fn default_name_column() -> String {
    ReshapeOptions::default().name_column
}

fn default_code_column() -> String {
    ReshapeOptions::default().code_column
}

fn default_suffix() -> char {
    ReshapeOptions::default().suffix
}

/// One extract to run through the pipeline.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub value_label: String,
    pub year_cutoff: u8,
    /// Overrides the run-wide suffix for this extract only.
    #[serde(default)]
    pub suffix: Option<char>,
}

/// A YAML run file listing the extracts to process and merge.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RunConfig {
    #[serde(default = "default_name_column")]
    pub name_column: String,
    #[serde(default = "default_code_column")]
    pub code_column: String,
    #[serde(default = "default_suffix")]
    pub suffix: char,
    pub sources: Vec<SourceConfig>,
}

impl RunConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: RunConfig = serde_yaml::from_str(text).context("parsing run config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a run file; relative source paths resolve against its directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        let mut cfg = Self::from_yaml(&text).with_context(|| format!("in {:?}", path))?;
        if let Some(base) = path.parent() {
            for src in &mut cfg.sources {
                if src.path.is_relative() {
                    src.path = base.join(&src.path);
                }
            }
        }
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            bail!("run config lists no sources");
        }
        for (i, src) in self.sources.iter().enumerate() {
            if src.value_label.trim().is_empty() {
                bail!("source #{} ({:?}) has an empty value_label", i, src.path);
            }
            if is_reserved_column(src.value_label.trim()) {
                bail!(
                    "source #{} ({:?}) uses the fixed column name `{}` as value_label",
                    i,
                    src.path,
                    src.value_label
                );
            }
            if src.year_cutoff > 99 {
                bail!(
                    "source #{} ({:?}) has year_cutoff {} outside 0..=99",
                    i,
                    src.path,
                    src.year_cutoff
                );
            }
        }
        Ok(())
    }

    pub fn reshape_options(&self, source: &SourceConfig) -> ReshapeOptions {
        ReshapeOptions {
            name_column: self.name_column.clone(),
            code_column: self.code_column.clone(),
            suffix: source.suffix.unwrap_or(self.suffix),
        }
    }
}
