use serde_json::Value;

use crate::youtube_music::validate_video_id;

const LIST_ITEM_RENDERER: &str = "musicResponsiveListItemRenderer";
/// Browse page types of runs that credit a performer
const ARTIST_PAGE_TYPES: [&str; 2] = ["MUSIC_PAGE_TYPE_ARTIST", "MUSIC_PAGE_TYPE_USER_CHANNEL"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub video_id: String,
    pub name: String,
    pub artist: Option<Artist>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub name: String,
    /// Channel ID, only present if the search result links to the artist page
    pub artist_id: Option<String>,
}

impl Song {
    pub fn artist_name(&self) -> Option<&str> {
        self.artist.as_ref().map(|artist| artist.name.as_str())
    }
}

/// Songs in the order the search returned them. Items without a usable video ID are skipped.
pub fn songs_from_search_response(response: &Value) -> Vec<Song> {
    let mut renderers = Vec::new();
    collect_by_key(response, LIST_ITEM_RENDERER, &mut renderers);
    renderers
        .into_iter()
        .filter_map(|renderer| {
            let song = song_from_renderer(renderer);
            if song.is_none() {
                tracing::debug!("skipping search result without title or video ID");
            }
            song
        })
        .collect()
}

/// Depth-first, in document order. Does not descend into matched values.
fn collect_by_key<'a>(value: &'a Value, key: &str, found: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                if k == key {
                    found.push(v);
                } else {
                    collect_by_key(v, key, found);
                }
            }
        }
        Value::Array(values) => {
            for v in values {
                collect_by_key(v, key, found);
            }
        }
        _ => {}
    }
}

fn find_by_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let mut found = Vec::new();
    collect_by_key(value, key, &mut found);
    found.into_iter().next()
}

fn flex_column_runs(renderer: &Value, column: usize) -> Option<&Vec<Value>> {
    renderer["flexColumns"][column]["musicResponsiveListItemFlexColumnRenderer"]["text"]["runs"]
        .as_array()
}

fn song_from_renderer(renderer: &Value) -> Option<Song> {
    let name = flex_column_runs(renderer, 0)?.first()?["text"].as_str()?;
    let video_id = renderer["playlistItemData"]["videoId"]
        .as_str()
        .or_else(|| find_by_key(renderer, "watchEndpoint")?["videoId"].as_str())
        .filter(|id| validate_video_id(id))?;
    let artist = flex_column_runs(renderer, 1).and_then(|runs| artist_from_runs(runs));
    Some(Song {
        video_id: video_id.to_owned(),
        name: name.to_owned(),
        artist,
    })
}

/// Prefers the first named run linking to an artist or channel page, falls back to the first run
fn artist_from_runs(runs: &[Value]) -> Option<Artist> {
    let linked = runs.iter().find_map(|run| {
        let browse = &run["navigationEndpoint"]["browseEndpoint"];
        let page_type = browse["browseEndpointContextSupportedConfigs"]
            ["browseEndpointContextMusicConfig"]["pageType"]
            .as_str()?;
        if !ARTIST_PAGE_TYPES.contains(&page_type) {
            return None;
        }
        Some(Artist {
            name: run_text(run)?.to_owned(),
            artist_id: browse["browseId"].as_str().map(str::to_owned),
        })
    });
    linked.or_else(|| {
        Some(Artist {
            name: run_text(runs.first()?)?.to_owned(),
            artist_id: None,
        })
    })
}

/// Trimmed, non-empty text of a run
fn run_text(run: &Value) -> Option<&str> {
    let text = run["text"].as_str()?.trim();
    (!text.is_empty()).then_some(text)
}
