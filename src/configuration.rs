use config::{Config, ConfigError};
use reqwest::Url;
use secrecy::SecretString;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::{Path, PathBuf};

use crate::{Error, domain::SegmentLength};

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com";
pub const DEFAULT_WATCH_URL: &str = "https://www.youtube.com/watch";
pub const DEFAULT_QUERY_SUFFIX: &str = "voice sample";
pub const API_KEY_VAR: &str = "GOOGLE_YT_API_KEY";

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    #[serde(rename = "youtube")]
    pub youtube_cfg: YoutubeSettings,
    #[serde(rename = "sampler")]
    pub sampler_cfg: SamplerSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_path = std::env::current_dir().map_err(|e| ConfigError::Foreign(Box::new(e)))?;
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(ConfigError::Message)?;

        Self::load(&base_path.join("configuration"), environment)
    }

    /// Layers defaults, `base.yml`, `<environment>.yml`, `APP_*` variables and
    /// finally `GOOGLE_YT_API_KEY`. Both files are optional.
    pub fn load(configuration_directory: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let environment_filename = format!("{}.yml", environment.as_str());

        Config::builder()
            .set_default("youtube.base_url", DEFAULT_API_BASE_URL)?
            .set_default("youtube.watch_url", DEFAULT_WATCH_URL)?
            .set_default("youtube.query_suffix", DEFAULT_QUERY_SUFFIX)?
            .set_default("sampler.segment_seconds", 15_i64)?
            .set_default("sampler.ytdlp_path", "yt-dlp")?
            .add_source(config::File::from(configuration_directory.join("base.yml")).required(false))
            .add_source(
                config::File::from(configuration_directory.join(environment_filename))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("youtube.api_key", std::env::var(API_KEY_VAR).ok())?
            .build()?
            .try_deserialize()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct YoutubeSettings {
    pub api_key: Option<SecretString>,
    #[serde(deserialize_with = "url_format::deserialize")]
    pub base_url: Url,
    #[serde(deserialize_with = "url_format::deserialize")]
    pub watch_url: Url,
    pub query_suffix: String,
}

impl YoutubeSettings {
    /// `<base_url>/youtube/v3/search`, keeping any path already on the base.
    pub fn search_endpoint(&self) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::Configuration(format!("invalid search base url: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["youtube", "v3", "search"]);
        Ok(url)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SamplerSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub segment_seconds: u32,
    pub ytdlp_path: PathBuf,
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

impl SamplerSettings {
    pub fn segment_length(&self) -> Result<SegmentLength, Error> {
        SegmentLength::from_seconds(self.segment_seconds)
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{} is not a supported environment. Use 'local' or 'production'.",
                other
            )),
        }
    }
}

mod url_format {
    use reqwest::Url;
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Url, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Url::parse(&s).map_err(D::Error::custom)
    }
}
