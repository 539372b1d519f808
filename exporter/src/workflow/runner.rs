use crate::workflow::config::ExportConfig;
use anyhow::Context;
use log::info;
use std::io::Write;
use wavecore::chart::{points_to_json, to_points};
use wavecore::download::{download_csv, DownloadHost};
use wavecore::export::{export_to_csv, write_csv};
use wavecore::wave::try_generate_sine_wave;
use wavecore::Sample;

pub struct ExportResult {
    pub sample_count: usize,
    pub csv_bytes: usize,
}

#[derive(Clone)]
pub struct Runner {
    config: ExportConfig,
}

impl Runner {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    fn samples(&self) -> anyhow::Result<Vec<Sample>> {
        try_generate_sine_wave(&self.config.wave).context("generating sine wave")
    }

    /// Generate, render and hand the CSV to `host` under the configured name.
    pub fn execute<H: DownloadHost + ?Sized>(
        &self,
        host: &mut H,
    ) -> anyhow::Result<ExportResult> {
        let samples = self.samples()?;
        let csv = export_to_csv(&samples, self.config.include_time);
        download_csv(host, &csv, &self.config.filename)
            .with_context(|| format!("downloading {}", self.config.filename))?;

        info!(
            "exported {} samples as {} ({} bytes)",
            samples.len(),
            self.config.filename,
            csv.len()
        );
        Ok(ExportResult {
            sample_count: samples.len(),
            csv_bytes: csv.len(),
        })
    }

    /// Write the CSV straight to `writer` without going through a host.
    pub fn print_csv<W: Write>(&self, writer: &mut W) -> anyhow::Result<usize> {
        let samples = self.samples()?;
        write_csv(writer, &samples, self.config.csv_options()).context("writing csv")?;
        Ok(samples.len())
    }

    /// Chart points as JSON, one array for the whole wave.
    pub fn points_json(&self) -> anyhow::Result<String> {
        let samples = self.samples()?;
        points_to_json(&to_points(&samples)).context("serializing chart points")
    }
}
