use crate::prelude::{Sample, WaveParameters, WaveResult};
use crate::telemetry::log::LogManager;
use std::f64::consts::PI;

/// Exact-sized: the count is fixed up front even if values go non-finite.
#[derive(Debug, Clone)]
pub struct SineWave {
    params: WaveParameters,
    index: usize,
    total: usize,
}

impl SineWave {
    pub fn new(params: WaveParameters) -> Self {
        Self {
            total: params.sample_count(),
            params,
            index: 0,
        }
    }

    fn sample_at(&self, index: usize) -> Sample {
        let time = index as f64 / self.params.sample_rate;
        let value = self.params.amplitude
            * (2.0 * PI * self.params.frequency * time + self.params.phase).sin();
        Sample::new(time, value)
    }
}

impl Iterator for SineWave {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.index >= self.total {
            return None;
        }
        let sample = self.sample_at(self.index);
        self.index += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SineWave {}

/// Samples `amplitude * sin(2π * frequency * t + phase)` at `t = i / sample_rate`.
///
/// No validation: degenerate bounds give an empty vector, and non-finite
/// inputs flow through into the sample values.
pub fn generate_sine_wave(params: &WaveParameters) -> Vec<Sample> {
    let samples: Vec<Sample> = SineWave::new(*params).collect();
    LogManager::new("wave").trace_step(&format!(
        "generated {} samples ({} Hz for {} s at {} Hz)",
        samples.len(),
        params.frequency,
        params.duration,
        params.sample_rate
    ));
    samples
}

/// Same as [`generate_sine_wave`] after [`WaveParameters::validate`] passes.
pub fn try_generate_sine_wave(params: &WaveParameters) -> WaveResult<Vec<Sample>> {
    params.validate()?;
    Ok(generate_sine_wave(params))
}
