use anyhow::{Context, anyhow};
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::{
    Error,
    configuration::{API_KEY_VAR, YoutubeSettings},
    domain::PersonName,
};

#[derive(Debug, Clone)]
pub struct VideoSearchResult {
    pub id: String,
    pub title: String,
    pub url: Url,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Option<Snippet>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
}

/// Builds the free-text query sent to the search API.
pub fn search_query(name: &str, suffix: &str) -> String {
    format!("{} {}", name, suffix).trim().to_string()
}

#[derive(Debug)]
pub struct VideoLookup {
    client: reqwest::Client,
    endpoint: Url,
    api_key: SecretString,
    watch_url: Url,
    default_suffix: String,
}

impl VideoLookup {
    pub fn new(settings: &YoutubeSettings) -> Result<Self, Error> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "YouTube API key not found, set {} in the environment",
                    API_KEY_VAR
                ))
            })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: settings.search_endpoint()?,
            api_key,
            watch_url: settings.watch_url.clone(),
            default_suffix: settings.query_suffix.clone(),
        })
    }

    pub async fn get_person_video_url(&self, person: &PersonName) -> Result<Url, Error> {
        self.get_person_video_url_with_suffix(person, &self.default_suffix)
            .await
    }

    pub async fn get_person_video_url_with_suffix(
        &self,
        person: &PersonName,
        suffix: &str,
    ) -> Result<Url, Error> {
        let query = search_query(person.as_ref(), suffix);
        Ok(self.search(&query).await?.url)
    }

    /// Returns the top-ranked video for `query`. Every other result is ignored.
    #[instrument(name = "Searching for a video", skip(self))]
    pub async fn search(&self, query: &str) -> Result<VideoSearchResult, Error> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("key", self.api_key.expose_secret()),
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", "1"),
                ("q", query),
            ])
            .send()
            .await
            .context("Failed to send search request")
            .map_err(Error::Upstream)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("API request failed with status: {}", status);
            error!("Response body: {}", body);
            return Err(Error::Upstream(anyhow!(
                "search request failed with status {}: {}",
                status,
                body
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .context("Failed to parse search response")
            .map_err(Error::Upstream)?;

        let Some(item) = body.items.into_iter().next() else {
            return Err(Error::NotFound {
                query: query.to_string(),
            });
        };

        let id = item
            .id
            .video_id
            .ok_or_else(|| Error::Upstream(anyhow!("Video ID not found in search result")))?;
        let title = item.snippet.map(|s| s.title).unwrap_or_default();

        info!("Found video '{}' with ID {}", title, id);

        let url = self.watch_url_for(&id);
        Ok(VideoSearchResult { id, title, url })
    }

    fn watch_url_for(&self, id: &str) -> Url {
        let mut url = self.watch_url.clone();
        url.set_query(Some(&format!("v={}", urlencoding::encode(id))));
        url
    }
}
