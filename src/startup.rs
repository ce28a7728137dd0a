use reqwest::Url;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::{
    Error,
    audio::AudioSampler,
    configuration::Settings,
    domain::{PersonName, SegmentLength},
    youtube::{MediaFetcher, VideoLookup, YtDlp},
};

/// Result of sampling one person's voice.
#[derive(Debug, Clone)]
pub struct VoiceSample {
    pub video_url: Url,
    pub path: PathBuf,
}

/// Looks a person up on YouTube and cuts a clip out of the middle of the
/// top result's audio.
pub struct PersonAudioSampler<F = YtDlp> {
    lookup: VideoLookup,
    sampler: AudioSampler<F>,
    segment_length: SegmentLength,
}

impl PersonAudioSampler<YtDlp> {
    pub fn build(settings: Settings) -> Result<Self, Error> {
        let fetcher = YtDlp::new(settings.sampler_cfg.ytdlp_path.clone());
        Self::build_with_fetcher(settings, fetcher)
    }
}

impl<F: MediaFetcher> PersonAudioSampler<F> {
    #[instrument(name = "Building sampler", skip_all)]
    pub fn build_with_fetcher(
        Settings {
            youtube_cfg,
            sampler_cfg,
        }: Settings,
        fetcher: F,
    ) -> Result<Self, Error> {
        info!("Building person audio sampler.");
        debug!("YouTube configuration: {:?}", youtube_cfg);
        debug!("Sampler configuration: {:?}", sampler_cfg);

        let lookup = VideoLookup::new(&youtube_cfg)?;
        let segment_length = sampler_cfg.segment_length()?;
        let sampler = match sampler_cfg.scratch_dir {
            Some(dir) => AudioSampler::new(fetcher).with_scratch_dir(dir),
            None => AudioSampler::new(fetcher),
        };

        Ok(Self {
            lookup,
            sampler,
            segment_length,
        })
    }

    pub fn segment_length(&self) -> SegmentLength {
        self.segment_length
    }

    pub async fn get_person_video_url(&self, person: &PersonName) -> Result<Url, Error> {
        self.lookup.get_person_video_url(person).await
    }

    /// Samples `url` with the configured segment length.
    pub async fn download_audio_segment(
        &self,
        url: &Url,
        output_path: &Path,
    ) -> Result<PathBuf, Error> {
        self.sampler
            .download_audio_segment(url.as_str(), output_path, self.segment_length)
            .await
    }

    /// Runs both steps, writing `<Name_With_Underscores>_voice.wav` into
    /// `output_dir`.
    #[instrument(name = "Sampling a person's voice", skip(self, output_dir), fields(person = %person))]
    pub async fn sample_person(
        &self,
        person: &PersonName,
        output_dir: &Path,
    ) -> Result<VoiceSample, Error> {
        let video_url = self.get_person_video_url(person).await?;
        info!("Video URL for {}: {}", person, video_url);

        let output_path = output_dir.join(format!("{}.wav", person.voice_file_stem()));
        let path = self.download_audio_segment(&video_url, &output_path).await?;

        Ok(VoiceSample { video_url, path })
    }
}
