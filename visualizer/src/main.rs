use chart::{ChartContainer, ChartStyle};
use iced::{
    widget::{button, column, row, scrollable, text, text_input, Canvas, Column, Container},
    Alignment, Element, Length, Task, Theme,
};
use log::warn;
use std::path::PathBuf;
use wavecore::chart::{to_points, ChartConfig};
use wavecore::download::{download_csv, DirectoryHost, DEFAULT_FILENAME};
use wavecore::export::export_to_csv;
use wavecore::wave::try_generate_sine_wave;
use wavecore::{Sample, WaveParameters};

mod chart;

const DOWNLOAD_DIR: &str = "downloads";

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Sine Wave Exporter".into()
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Visualizer {
    form: WaveForm,
    include_time: bool,
    filename: String,
    style: ChartStyle,
    samples: Vec<Sample>,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    FieldChanged(WaveField, String),
    FilenameChanged(String),
    ToggleTime,
    ToggleStyle,
    Generate,
    Download,
}

#[derive(Debug, Clone, Copy)]
enum WaveField {
    Amplitude,
    Frequency,
    Phase,
    SampleRate,
    Duration,
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        let mut state = Visualizer {
            form: WaveForm::default(),
            include_time: true,
            filename: DEFAULT_FILENAME.into(),
            style: ChartStyle::Line,
            samples: Vec::new(),
            status: "Ready".into(),
            history: Vec::new(),
        };
        state.regenerate();
        (state, Task::none())
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::FieldChanged(field, value) => {
                state.form.update_field(field, value);
            }
            Message::FilenameChanged(value) => state.filename = value,
            Message::ToggleTime => state.include_time = !state.include_time,
            Message::ToggleStyle => {
                state.style = match state.style {
                    ChartStyle::Line => ChartStyle::Scatter,
                    ChartStyle::Scatter => ChartStyle::Line,
                };
            }
            Message::Generate => {
                state.regenerate();
            }
            Message::Download => state.download(),
        }
        Task::none()
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let time_label = if state.include_time {
            "Timestamp column: on"
        } else {
            "Timestamp column: off"
        };
        let style_label = match state.style {
            ChartStyle::Line => "View: line",
            ChartStyle::Scatter => "View: scatter",
        };

        let config_column = column![
            text("Wave").size(26),
            text_input("Amplitude", &state.form.amplitude)
                .on_input(|value| Message::FieldChanged(WaveField::Amplitude, value))
                .padding(6),
            text_input("Frequency (Hz)", &state.form.frequency)
                .on_input(|value| Message::FieldChanged(WaveField::Frequency, value))
                .padding(6),
            text_input("Phase (rad)", &state.form.phase)
                .on_input(|value| Message::FieldChanged(WaveField::Phase, value))
                .padding(6),
            text_input("Sample rate (Hz)", &state.form.sample_rate)
                .on_input(|value| Message::FieldChanged(WaveField::SampleRate, value))
                .padding(6),
            text_input("Duration (s)", &state.form.duration)
                .on_input(|value| Message::FieldChanged(WaveField::Duration, value))
                .padding(6),
            button("Generate").on_press(Message::Generate).padding(10),
            text("Export").size(20),
            text_input("Filename", &state.filename)
                .on_input(Message::FilenameChanged)
                .padding(6),
            button(text(time_label)).on_press(Message::ToggleTime).padding(8),
            button("Download CSV").on_press(Message::Download).padding(10),
            text(&state.status).size(14),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(320.0));

        let chart = Canvas::new(ChartContainer::new(
            to_points(&state.samples),
            ChartConfig::sine_wave(),
            state.style,
        ))
        .width(Length::Fill)
        .height(Length::Fixed(320.0));

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let chart_column = column![
            text("Chart").size(26),
            text(format!("{} samples", state.samples.len())).size(16),
            button(text(style_label)).on_press(Message::ToggleStyle).padding(8),
            chart,
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(120.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![config_column, chart_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Rebuilds the samples from the form. Returns false when the form is rejected.
    fn regenerate(&mut self) -> bool {
        let result = self
            .form
            .parameters()
            .and_then(|params| try_generate_sine_wave(&params).map_err(|err| err.to_string()));
        match result {
            Ok(samples) => {
                self.status = format!("Generated {} samples", samples.len());
                self.push_history(self.status.clone());
                self.samples = samples;
                true
            }
            Err(err) => {
                warn!("wave rejected: {}", err);
                self.status = format!("Wave error: {err}");
                false
            }
        }
    }

    fn download(&mut self) {
        self.download_into(PathBuf::from(DOWNLOAD_DIR));
    }

    fn download_into(&mut self, dir: PathBuf) {
        if !self.regenerate() {
            return;
        }
        let csv = export_to_csv(&self.samples, self.include_time);
        let mut host = DirectoryHost::new(dir);
        match download_csv(&mut host, &csv, &self.filename) {
            Ok(()) => {
                let saved = host
                    .saved()
                    .last()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| self.filename.clone());
                self.status = format!("Saved {saved}");
                self.push_history(self.status.clone());
            }
            Err(err) => {
                warn!("download failed: {}", err);
                self.status = format!("Download error: {err}");
            }
        }
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

#[derive(Debug, Clone)]
struct WaveForm {
    amplitude: String,
    frequency: String,
    phase: String,
    sample_rate: String,
    duration: String,
}

impl Default for WaveForm {
    fn default() -> Self {
        let defaults = WaveParameters::default();
        Self {
            amplitude: defaults.amplitude.to_string(),
            frequency: defaults.frequency.to_string(),
            phase: defaults.phase.to_string(),
            sample_rate: defaults.sample_rate.to_string(),
            duration: defaults.duration.to_string(),
        }
    }
}

impl WaveForm {
    fn update_field(&mut self, field: WaveField, value: String) {
        match field {
            WaveField::Amplitude => self.amplitude = value,
            WaveField::Frequency => self.frequency = value,
            WaveField::Phase => self.phase = value,
            WaveField::SampleRate => self.sample_rate = value,
            WaveField::Duration => self.duration = value,
        }
    }

    fn parameters(&self) -> Result<WaveParameters, String> {
        let parse = |name: &str, raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| format!("{name} is not a number: {raw:?}"))
        };
        Ok(WaveParameters::new(
            parse("amplitude", &self.amplitude)?,
            parse("frequency", &self.frequency)?,
            parse("phase", &self.phase)?,
            parse("sample rate", &self.sample_rate)?,
            parse("duration", &self.duration)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_form_parses_into_default_parameters() {
        let params = WaveForm::default().parameters().unwrap();
        assert_eq!(params, WaveParameters::default());
    }

    #[test]
    fn form_reports_unparseable_fields() {
        let mut form = WaveForm::default();
        form.update_field(WaveField::SampleRate, "fast".into());
        let err = form.parameters().unwrap_err();
        assert!(err.contains("sample rate"));
    }

    #[test]
    fn invalid_wave_keeps_previous_samples() {
        let (mut state, _) = Visualizer::boot();
        let before = state.samples.len();
        state.form.update_field(WaveField::Duration, "0".into());
        assert!(!state.regenerate());
        assert_eq!(state.samples.len(), before);
        assert!(state.status.starts_with("Wave error"));
    }

    #[test]
    fn download_uses_the_current_form() {
        let dir = tempfile::tempdir().unwrap();
        let (mut state, _) = Visualizer::boot();
        state.form.update_field(WaveField::SampleRate, "4".into());
        state.download_into(dir.path().to_path_buf());

        let saved = std::fs::read_to_string(dir.path().join(DEFAULT_FILENAME)).unwrap();
        assert_eq!(saved.lines().count(), 5);
        assert_eq!(state.samples.len(), 4);
    }

    #[test]
    fn download_refuses_an_invalid_form() {
        let dir = tempfile::tempdir().unwrap();
        let (mut state, _) = Visualizer::boot();
        state.form.update_field(WaveField::Duration, "0".into());
        state.download_into(dir.path().to_path_buf());

        assert!(!dir.path().join(DEFAULT_FILENAME).exists());
        assert!(state.status.starts_with("Wave error"));
    }
}
