use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use wavecore::download::DEFAULT_FILENAME;
use wavecore::export::CsvOptions;
use wavecore::WaveParameters;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub wave: WaveParameters,
    pub include_time: bool,
    pub filename: String,
    pub out_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            wave: WaveParameters::default(),
            include_time: true,
            filename: DEFAULT_FILENAME.to_string(),
            out_dir: PathBuf::from("."),
        }
    }
}

impl ExportConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading export config {}", path_ref.display()))?;
        let config: ExportConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing export config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        wave: WaveParameters,
        include_time: bool,
        filename: String,
        out_dir: PathBuf,
    ) -> Self {
        Self {
            wave,
            include_time,
            filename,
            out_dir,
        }
    }

    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            include_time: self.include_time,
        }
    }
}
