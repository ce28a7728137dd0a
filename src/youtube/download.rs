use anyhow::{Context, Result, bail, ensure};
use std::{
    future::Future,
    path::{Path, PathBuf},
};
use tokio::process::Command;
use tracing::{debug, info, instrument};

pub const WAV_CODEC: &str = "wav";

/// What the sampler asks of a media fetcher: the best audio-only stream of
/// `url`, transcoded to `codec` and written according to `output_template`.
#[derive(Debug, Clone)]
pub struct FetchRequest<'a> {
    pub url: &'a str,
    pub output_template: String,
    pub codec: &'a str,
    pub quiet: bool,
}

impl<'a> FetchRequest<'a> {
    pub fn best_audio(url: &'a str, output_dir: &Path) -> Self {
        Self {
            url,
            output_template: output_dir
                .join("%(id)s.%(ext)s")
                .to_string_lossy()
                .into_owned(),
            codec: WAV_CODEC,
            quiet: true,
        }
    }

    /// Where a fetcher honouring the template leaves the file for `media_id`.
    pub fn resolve_path(&self, media_id: &str) -> PathBuf {
        PathBuf::from(
            self.output_template
                .replace("%(id)s", media_id)
                .replace("%(ext)s", self.codec),
        )
    }
}

#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub path: PathBuf,
    pub media_id: String,
}

pub trait MediaFetcher {
    fn fetch_best_audio(
        &self,
        request: &FetchRequest<'_>,
    ) -> impl Future<Output = Result<FetchedMedia>> + Send;
}

/// Fetches audio by shelling out to `yt-dlp`, which needs `ffmpeg` on the
/// path for the wav extraction.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MediaFetcher for YtDlp {
    #[instrument(name = "Downloading audio with yt-dlp", skip(self, request), fields(url = %request.url))]
    async fn fetch_best_audio(&self, request: &FetchRequest<'_>) -> Result<FetchedMedia> {
        let mut command = Command::new(&self.program);
        command
            .args(["-f", "bestaudio/best", "-x", "--audio-format"])
            .arg(request.codec)
            .args(["--no-playlist", "--print", "after_move:id", "-o"])
            .arg(&request.output_template);
        if request.quiet {
            command.args(["--quiet", "--no-progress", "--no-warnings"]);
        }
        command.arg(request.url);
        debug!("Running {:?}", command);

        info!("Downloading audio from YouTube...");
        let output = command
            .output()
            .await
            .with_context(|| format!("Failed to run {}. Is it installed?", self.program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("yt-dlp download failed for {}: {}", request.url, stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let media_id = stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .context("yt-dlp did not report a media id")?
            .to_string();

        let path = request.resolve_path(&media_id);
        ensure!(
            path.exists(),
            "yt-dlp completed but output file not found at {}",
            path.display()
        );

        info!("Downloaded audio for {} to {}", media_id, path.display());
        Ok(FetchedMedia { path, media_id })
    }
}
