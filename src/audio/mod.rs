mod sampler;
mod waveform;

pub use sampler::{AudioSampler, centre_window};
pub use waveform::{Samples, Waveform};
