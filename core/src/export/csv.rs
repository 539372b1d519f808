use crate::export::fixed::to_fixed;
use crate::prelude::{Sample, WaveResult};
use crate::telemetry::log::LogManager;
use std::io::Write;

pub const TIMED_HEADER: &str = "timestamp,a1,a2,a3,a4";
pub const UNTIMED_HEADER: &str = "a1,a2,a3,a4";

// a2..a4 are unused channels.
const PLACEHOLDER_CHANNELS: &str = "0.0000,0.0000,0.0000";

const TIME_DIGITS: usize = 2;
const VALUE_DIGITS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub include_time: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { include_time: true }
    }
}

impl CsvOptions {
    pub fn header(&self) -> &'static str {
        if self.include_time {
            TIMED_HEADER
        } else {
            UNTIMED_HEADER
        }
    }

    pub fn row(&self, sample: &Sample) -> String {
        let value = to_fixed(sample.value, VALUE_DIGITS);
        if self.include_time {
            format!(
                "{},{},{}",
                to_fixed(sample.time, TIME_DIGITS),
                value,
                PLACEHOLDER_CHANNELS
            )
        } else {
            format!("{},{}", value, PLACEHOLDER_CHANNELS)
        }
    }
}

/// The header always ends with `\n`; the last row does not.
pub fn export_to_csv(samples: &[Sample], include_time: bool) -> String {
    let options = CsvOptions { include_time };
    let rows: Vec<String> = samples.iter().map(|sample| options.row(sample)).collect();

    let mut document = String::with_capacity(options.header().len() + 1 + rows.len() * 40);
    document.push_str(options.header());
    document.push('\n');
    document.push_str(&rows.join("\n"));

    LogManager::new("export").trace_step(&format!(
        "rendered {} rows ({} bytes)",
        rows.len(),
        document.len()
    ));
    document
}

/// Streams the same document [`export_to_csv`] builds into `writer`.
pub fn write_csv<W: Write>(
    writer: &mut W,
    samples: &[Sample],
    options: CsvOptions,
) -> WaveResult<()> {
    writeln!(writer, "{}", options.header())?;
    for (idx, sample) in samples.iter().enumerate() {
        if idx > 0 {
            writer.write_all(b"\n")?;
        }
        writer.write_all(options.row(sample).as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::WaveParameters;
    use crate::wave::generate_sine_wave;

    fn quadrant_samples() -> Vec<Sample> {
        generate_sine_wave(&WaveParameters::new(1.0, 1.0, 0.0, 4.0, 1.0))
    }

    #[test]
    fn timed_export_formats_each_row() {
        let csv = export_to_csv(&quadrant_samples(), true);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(
            lines,
            vec![
                "timestamp,a1,a2,a3,a4",
                "0.00,0.0000,0.0000,0.0000,0.0000",
                "0.25,1.0000,0.0000,0.0000,0.0000",
                "0.50,0.0000,0.0000,0.0000,0.0000",
                "0.75,-1.0000,0.0000,0.0000,0.0000",
            ]
        );
    }

    #[test]
    fn untimed_export_drops_the_time_column() {
        let csv = export_to_csv(&quadrant_samples(), false);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines[0], "a1,a2,a3,a4");
        assert_eq!(lines[2], "1.0000,0.0000,0.0000,0.0000");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn line_count_is_samples_plus_header() {
        let samples = generate_sine_wave(&WaveParameters::new(3.0, 7.0, 0.1, 25.0, 2.0));
        let csv = export_to_csv(&samples, true);
        assert_eq!(csv.split('\n').count(), samples.len() + 1);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn empty_input_yields_header_only() {
        assert_eq!(export_to_csv(&[], true), "timestamp,a1,a2,a3,a4\n");
        assert_eq!(export_to_csv(&[], false), "a1,a2,a3,a4\n");
    }

    #[test]
    fn default_options_include_time() {
        assert!(CsvOptions::default().include_time);
        assert_eq!(CsvOptions::default().header(), TIMED_HEADER);
    }

    #[test]
    fn streamed_output_matches_buffered_output() {
        let samples = quadrant_samples();
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &samples, CsvOptions::default()).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), export_to_csv(&samples, true));
    }
}
