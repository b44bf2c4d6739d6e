use anyhow::{Context, Result, ensure};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static YTCFG_SET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)ytcfg\.set\((\{.*?\})\);").unwrap());

/// The subset of the web app's bootstrap config needed for InnerTube requests
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(rename = "INNERTUBE_API_KEY")]
    pub(in crate::youtube_music) api_key: String,
    #[serde(rename = "INNERTUBE_CLIENT_NAME")]
    pub(in crate::youtube_music) client_name: String,
    #[serde(rename = "INNERTUBE_CLIENT_VERSION")]
    pub(in crate::youtube_music) client_version: String,
    #[serde(rename = "INNERTUBE_CONTEXT_CLIENT_NAME")]
    pub(in crate::youtube_music) context_client_name: Option<Value>,
    #[serde(rename = "HL", default = "default_language")]
    pub(in crate::youtube_music) language: String,
    #[serde(rename = "GL", default = "default_region")]
    pub(in crate::youtube_music) region: String,
    #[serde(rename = "VISITOR_DATA")]
    pub(in crate::youtube_music) visitor_data: Option<String>,
}

fn default_language() -> String {
    "en".to_owned()
}

fn default_region() -> String {
    "US".to_owned()
}

impl SessionConfig {
    /// Merges every `ytcfg.set({...})` call found in the page, later calls winning
    pub fn from_html(html: &str) -> Result<Self> {
        let mut merged = Map::new();
        for captures in YTCFG_SET.captures_iter(html) {
            // Some calls carry JS rather than JSON; only JSON objects are of interest.
            if let Ok(Value::Object(map)) = serde_json::from_str(&captures[1]) {
                merged.extend(map);
            }
        }
        ensure!(!merged.is_empty(), "no ytcfg found in YouTube Music page");
        serde_json::from_value(Value::Object(merged))
            .context("incomplete ytcfg in YouTube Music page")
    }

    /// The `X-YouTube-Client-Name` header is numeric but shows up both as number and string
    pub(in crate::youtube_music) fn client_name_header(&self) -> Option<String> {
        match self.context_client_name.as_ref()? {
            Value::Number(number) => Some(number.to_string()),
            Value::String(name) => Some(name.clone()),
            _ => None,
        }
    }
}

#[derive(Serialize)]
pub struct SearchRequest<'a> {
    pub(in crate::youtube_music) context: RequestContext<'a>,
    pub(in crate::youtube_music) query: &'a str,
    pub(in crate::youtube_music) params: &'a str,
}

#[derive(Serialize)]
pub struct RequestContext<'a> {
    pub(in crate::youtube_music) client: ContextClient<'a>,
    pub(in crate::youtube_music) user: ContextUser,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextClient<'a> {
    pub(in crate::youtube_music) client_name: &'a str,
    pub(in crate::youtube_music) client_version: &'a str,
    pub(in crate::youtube_music) hl: &'a str,
    pub(in crate::youtube_music) gl: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(in crate::youtube_music) visitor_data: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextUser {
    pub(in crate::youtube_music) locked_safety_mode: bool,
}

impl<'a> SearchRequest<'a> {
    pub fn new(config: &'a SessionConfig, query: &'a str, params: &'a str) -> Self {
        Self {
            context: RequestContext {
                client: ContextClient {
                    client_name: &config.client_name,
                    client_version: &config.client_version,
                    hl: &config.language,
                    gl: &config.region,
                    visitor_data: config.visitor_data.as_deref(),
                },
                user: ContextUser {
                    locked_safety_mode: false,
                },
            },
            query,
            params,
        }
    }
}
