pub mod synth;

pub use synth::{generate_sine_wave, try_generate_sine_wave, SineWave};
