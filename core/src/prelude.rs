use serde::{Deserialize, Serialize};

/// Largest wave the validated path will synthesize.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Phase in radians, sample rate in Hz, duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParameters {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub sample_rate: f64,
    pub duration: f64,
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            phase: 0.0,
            sample_rate: 100.0,
            duration: 1.0,
        }
    }
}

impl WaveParameters {
    pub fn new(
        amplitude: f64,
        frequency: f64,
        phase: f64,
        sample_rate: f64,
        duration: f64,
    ) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
            sample_rate,
            duration,
        }
    }

    /// `floor(sample_rate * duration)`, or zero when that is not finite and positive.
    pub fn sample_count(&self) -> usize {
        let total = (self.sample_rate * self.duration).floor();
        if total.is_finite() && total > 0.0 {
            total as usize
        } else {
            0
        }
    }

    pub fn validate(&self) -> WaveResult<()> {
        let fields = [
            ("amplitude", self.amplitude),
            ("frequency", self.frequency),
            ("phase", self.phase),
            ("sample_rate", self.sample_rate),
            ("duration", self.duration),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(WaveError::InvalidParameter(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.sample_rate <= 0.0 {
            return Err(WaveError::InvalidParameter(format!(
                "sample_rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.duration <= 0.0 {
            return Err(WaveError::InvalidParameter(format!(
                "duration must be positive, got {}",
                self.duration
            )));
        }
        let requested = (self.sample_rate * self.duration).floor();
        if requested > MAX_SAMPLES as f64 {
            return Err(WaveError::InvalidParameter(format!(
                "sample_rate * duration asks for {} samples, limit is {}",
                requested, MAX_SAMPLES
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum WaveError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("download failed: {0}")]
    Download(String),
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type WaveResult<T> = Result<T, WaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_floors_the_product() {
        let params = WaveParameters::new(1.0, 1.0, 0.0, 10.0, 0.55);
        assert_eq!(params.sample_count(), 5);
    }

    #[test]
    fn sample_count_is_zero_for_degenerate_bounds() {
        assert_eq!(WaveParameters::new(1.0, 1.0, 0.0, 0.0, 1.0).sample_count(), 0);
        assert_eq!(WaveParameters::new(1.0, 1.0, 0.0, 4.0, 0.0).sample_count(), 0);
        assert_eq!(WaveParameters::new(1.0, 1.0, 0.0, -4.0, 1.0).sample_count(), 0);
        assert_eq!(
            WaveParameters::new(1.0, 1.0, 0.0, f64::NAN, 1.0).sample_count(),
            0
        );
        assert_eq!(
            WaveParameters::new(1.0, 1.0, 0.0, 4.0, f64::INFINITY).sample_count(),
            0
        );
    }

    #[test]
    fn validate_rejects_non_positive_rate_and_duration() {
        let err = WaveParameters::new(1.0, 1.0, 0.0, 0.0, 1.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("sample_rate"));

        let err = WaveParameters::new(1.0, 1.0, 0.0, 4.0, -1.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("duration"));
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let err = WaveParameters::new(f64::NAN, 1.0, 0.0, 4.0, 1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, WaveError::InvalidParameter(_)));
        assert!(WaveParameters::default().validate().is_ok());
    }

    #[test]
    fn validate_caps_the_sample_count() {
        let err = WaveParameters::new(1.0, 1.0, 0.0, 1e200, 1.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("limit"));

        let at_limit = WaveParameters::new(1.0, 1.0, 0.0, MAX_SAMPLES as f64, 1.0);
        assert!(at_limit.validate().is_ok());
        let over = WaveParameters::new(1.0, 1.0, 0.0, MAX_SAMPLES as f64 + 1.0, 1.0);
        assert!(over.validate().is_err());
    }
}
