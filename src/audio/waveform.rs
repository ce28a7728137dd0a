use anyhow::{Context, Result, ensure};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;
use tracing::debug;

/// Interleaved PCM samples, widened to the largest type of their format.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    Int(Vec<i32>),
    Float(Vec<f32>),
}

impl Samples {
    fn len(&self) -> usize {
        match self {
            Samples::Int(s) => s.len(),
            Samples::Float(s) => s.len(),
        }
    }

    fn range(&self, start: usize, end: usize) -> Samples {
        match self {
            Samples::Int(s) => Samples::Int(s[start..end].to_vec()),
            Samples::Float(s) => Samples::Float(s[start..end].to_vec()),
        }
    }
}

/// A WAV file decoded fully into memory.
#[derive(Debug, Clone)]
pub struct Waveform {
    spec: WavSpec,
    samples: Samples,
}

impl Waveform {
    pub fn new(spec: WavSpec, samples: Samples) -> Result<Self> {
        ensure!(spec.channels > 0, "wav spec has no channels");
        ensure!(spec.sample_rate > 0, "wav spec has a zero sample rate");
        ensure!(
            samples.len() % usize::from(spec.channels) == 0,
            "{} samples do not divide into {} channels",
            samples.len(),
            spec.channels
        );
        Ok(Self { spec, samples })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let reader = WavReader::open(path)
            .with_context(|| format!("Failed to open wav file {}", path.display()))?;
        let spec = reader.spec();
        let samples = match spec.sample_format {
            SampleFormat::Int => Samples::Int(
                reader
                    .into_samples::<i32>()
                    .collect::<Result<_, _>>()
                    .context("Failed to decode integer samples")?,
            ),
            SampleFormat::Float => Samples::Float(
                reader
                    .into_samples::<f32>()
                    .collect::<Result<_, _>>()
                    .context("Failed to decode float samples")?,
            ),
        };
        debug!(
            "Decoded {} samples ({} Hz, {} channels) from {}",
            samples.len(),
            spec.sample_rate,
            spec.channels,
            path.display()
        );
        Self::new(spec, samples)
    }

    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn frame_count(&self) -> u64 {
        (self.samples.len() / usize::from(self.spec.channels)) as u64
    }

    /// Total length rounded to the nearest millisecond, so a source within
    /// half a millisecond of a requested length still satisfies it.
    pub fn duration_ms(&self) -> u64 {
        let rate = u64::from(self.spec.sample_rate);
        (self.frame_count() * 1000 + rate / 2) / rate
    }

    fn frame_at_ms(&self, ms: u64) -> u64 {
        (ms * u64::from(self.spec.sample_rate) / 1000).min(self.frame_count())
    }

    /// Copies out `[start_ms, end_ms)`. Bounds past the end are clamped.
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> Waveform {
        let channels = usize::from(self.spec.channels);
        let start = self.frame_at_ms(start_ms) as usize * channels;
        let end = (self.frame_at_ms(end_ms) as usize * channels).max(start);
        Waveform {
            spec: self.spec,
            samples: self.samples.range(start, end),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = WavWriter::create(path, self.spec)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        match &self.samples {
            Samples::Int(samples) => {
                for &s in samples {
                    writer.write_sample(s)?;
                }
            }
            Samples::Float(samples) => {
                for &s in samples {
                    writer.write_sample(s)?;
                }
            }
        }
        writer
            .finalize()
            .with_context(|| format!("Failed to finalize {}", path.display()))?;
        Ok(())
    }
}
