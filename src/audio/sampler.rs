use anyhow::Context;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, instrument};

use super::Waveform;
use crate::{
    Error,
    domain::SegmentLength,
    youtube::{FetchRequest, MediaFetcher},
};

/// Millisecond window of `length` centred on the middle of `total_ms`.
pub fn centre_window(total_ms: u64, length: SegmentLength) -> Result<(u64, u64), Error> {
    let requested_ms = length.as_millis();
    if requested_ms > total_ms {
        return Err(Error::InvalidDuration {
            requested_ms,
            available_ms: total_ms,
        });
    }
    let start = total_ms / 2 - requested_ms / 2;
    Ok((start, start + requested_ms))
}

pub struct AudioSampler<F> {
    fetcher: F,
    scratch_dir: Option<PathBuf>,
}

impl<F: MediaFetcher> AudioSampler<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            scratch_dir: None,
        }
    }

    /// Parent directory for the per-call working directories. Defaults to
    /// the system temp dir.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    fn working_dir(&self) -> anyhow::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("person-audio-");
        let dir = match &self.scratch_dir {
            Some(dir) => builder.tempdir_in(dir),
            None => builder.tempdir(),
        };
        dir.context("Failed to create a working directory")
    }

    /// Downloads the audio behind `url` and writes the `length` long clip
    /// from its middle to `output_path`.
    ///
    /// The working directory holding the full download is removed before
    /// this returns, whatever the outcome.
    #[instrument(name = "Sampling audio from video", skip(self))]
    pub async fn download_audio_segment(
        &self,
        url: &str,
        output_path: &Path,
        length: SegmentLength,
    ) -> Result<PathBuf, Error> {
        let working_dir = self.working_dir().map_err(Error::DownloadProcessing)?;

        let request = FetchRequest::best_audio(url, working_dir.path());
        let media = self
            .fetcher
            .fetch_best_audio(&request)
            .await
            .map_err(Error::DownloadProcessing)?;

        let waveform = Waveform::open(&media.path).map_err(Error::DownloadProcessing)?;
        let total_ms = waveform.duration_ms();
        let (start_ms, end_ms) = centre_window(total_ms, length)?;
        info!(
            "Cutting {}..{} ms out of {} ms from {}",
            start_ms, end_ms, total_ms, media.media_id
        );

        waveform
            .slice_ms(start_ms, end_ms)
            .write(output_path)
            .context("Failed to write audio segment")
            .map_err(Error::DownloadProcessing)?;

        info!("Audio segment saved to {}", output_path.display());
        Ok(output_path.to_path_buf())
    }
}
