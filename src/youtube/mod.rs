mod download;
mod search;

pub use download::{FetchRequest, FetchedMedia, MediaFetcher, WAV_CODEC, YtDlp};
pub use search::{VideoLookup, VideoSearchResult, search_query};
