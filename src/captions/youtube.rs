//! YouTube captions client using the InnerTube player API.

use super::{CaptionCue, CaptionTrack, CaptionsService};
use crate::config::Settings;
use crate::error::{Result, VidaskError};
use crate::video_id::VideoId;
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const INNERTUBE_PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

static INNERTUBE_API_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("Invalid regex")
});

/// Captions service backed by youtube.com.
pub struct YoutubeCaptions {
    client: reqwest::Client,
    delay: Duration,
}

impl YoutubeCaptions {
    /// Create a client from settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(settings.captions.user_agent.clone())
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| VidaskError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            delay: Duration::from_millis(settings.captions.request_delay_ms),
        })
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    async fn fetch_watch_html(&self, video_id: &VideoId) -> Result<String> {
        let response = self.client.get(video_id.watch_url()).send().await?;
        check_status(&response, video_id.as_str())?;
        Ok(response.text().await?)
    }

    async fn fetch_player(&self, video_id: &VideoId, api_key: &str) -> Result<serde_json::Value> {
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION
                }
            },
            "videoId": video_id.as_str()
        });

        let response = self
            .client
            .post(INNERTUBE_PLAYER_URL)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;
        check_status(&response, video_id.as_str())?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CaptionsService for YoutubeCaptions {
    #[instrument(skip(self), fields(video_id = %video_id))]
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
        let html = self.fetch_watch_html(video_id).await?;
        let api_key = extract_api_key(&html, video_id.as_str())?;

        self.pause().await;
        let player = self.fetch_player(video_id, &api_key).await?;

        let tracks = parse_caption_tracks(video_id.as_str(), &player)?;
        debug!("Found {} caption tracks", tracks.len());
        Ok(tracks)
    }

    #[instrument(skip(self, track), fields(language = %track.language_code, generated = track.is_generated))]
    async fn fetch_cues(&self, track: &CaptionTrack) -> Result<Vec<CaptionCue>> {
        if track.base_url.contains("&exp=xpe") {
            return Err(VidaskError::Captions(
                "caption track requires a proof-of-origin token".to_string(),
            ));
        }

        let url = json3_url(&track.base_url)?;

        self.pause().await;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
            return Err(VidaskError::TranscriptUnavailable(format!(
                "{} captions were removed",
                track.language_code
            )));
        }
        check_status(&response, &track.language_code)?;

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(VidaskError::TranscriptUnavailable(format!(
                "{} captions returned no data",
                track.language_code
            )));
        }

        let cues = parse_json3(&body)?;
        debug!("Fetched {} cues", cues.len());
        Ok(cues)
    }
}

fn check_status(response: &reqwest::Response, subject: &str) -> Result<()> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(VidaskError::Captions(format!(
            "YouTube is rate limiting requests for {}",
            subject
        )));
    }
    if !status.is_success() {
        return Err(VidaskError::Captions(format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        )));
    }
    Ok(())
}

/// Pull the InnerTube API key out of a watch page.
fn extract_api_key(html: &str, video_id: &str) -> Result<String> {
    if html.contains("g-recaptcha") {
        return Err(VidaskError::Captions(format!(
            "YouTube is blocking requests from this IP (video {})",
            video_id
        )));
    }

    INNERTUBE_API_KEY
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            VidaskError::Captions(format!("Could not parse the watch page for video {}", video_id))
        })
}

fn check_playability(video_id: &str, player: &serde_json::Value) -> Result<()> {
    let Some(playability) = player.get("playabilityStatus") else {
        return Ok(());
    };

    let status = playability.get("status").and_then(|s| s.as_str()).unwrap_or("");
    if status == "OK" {
        return Ok(());
    }

    let reason = playability.get("reason").and_then(|r| r.as_str()).unwrap_or("");

    if status == "LOGIN_REQUIRED" && reason.contains("not a bot") {
        return Err(VidaskError::Captions(format!(
            "YouTube requested bot verification for video {}",
            video_id
        )));
    }

    warn!("Video {} is not playable ({}): {}", video_id, status, reason);
    Err(VidaskError::VideoUnavailable(video_id.to_string()))
}

/// Read caption tracks from an InnerTube player response, preserving order.
fn parse_caption_tracks(video_id: &str, player: &serde_json::Value) -> Result<Vec<CaptionTrack>> {
    check_playability(video_id, player)?;

    let renderer = player
        .get("captions")
        .and_then(|c| c.get("playerCaptionsTracklistRenderer"))
        .ok_or_else(|| VidaskError::TranscriptsDisabled(video_id.to_string()))?;

    let tracks: Vec<CaptionTrack> = renderer
        .get("captionTracks")
        .and_then(|ct| ct.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|caption| {
                    let language_code = caption.get("languageCode")?.as_str()?.to_string();
                    let base_url = caption.get("baseUrl")?.as_str()?.replace("&fmt=srv3", "");

                    let language_name = caption
                        .get("name")
                        .and_then(|n| {
                            n.get("simpleText").or_else(|| {
                                n.get("runs")
                                    .and_then(|r| r.as_array())
                                    .and_then(|r| r.first())
                                    .and_then(|r| r.get("text"))
                            })
                        })
                        .and_then(|t| t.as_str())
                        .unwrap_or(&language_code)
                        .to_string();

                    let is_generated = caption.get("kind").and_then(|k| k.as_str()) == Some("asr");

                    Some(CaptionTrack {
                        language_code,
                        language_name,
                        is_generated,
                        base_url,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    if tracks.is_empty() {
        return Err(VidaskError::NoTranscript(video_id.to_string()));
    }

    Ok(tracks)
}

/// Rewrite a track URL to request the json3 cue format.
fn json3_url(base_url: &str) -> Result<url::Url> {
    let mut url = url::Url::parse(base_url)
        .map_err(|e| VidaskError::Captions(format!("Invalid caption URL: {}", e)))?;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "fmt")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs)
        .append_pair("fmt", "json3");

    Ok(url)
}

#[derive(Debug, Deserialize)]
struct Json3Response {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    segs: Option<Vec<Json3Segment>>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

/// Parse a json3 caption body into cues, dropping events without text.
fn parse_json3(body: &str) -> Result<Vec<CaptionCue>> {
    let response: Json3Response = serde_json::from_str(body)?;

    let cues = response
        .events
        .into_iter()
        .filter_map(|event| {
            let segs = event.segs?;
            let raw: String = segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }
            Some(CaptionCue::new(
                text,
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms as f64 / 1000.0,
            ))
        })
        .collect();

    Ok(cues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_api_key() {
        let html = r#"<script>ytcfg.set({"INNERTUBE_API_KEY": "AIzaSyA-test_key"});</script>"#;
        assert_eq!(extract_api_key(html, "vid").unwrap(), "AIzaSyA-test_key");
        assert!(extract_api_key("<html></html>", "vid").is_err());
        assert!(matches!(
            extract_api_key(r#"<div class="g-recaptcha"></div>"#, "vid"),
            Err(VidaskError::Captions(_))
        ));
    }

    #[test]
    fn test_parse_caption_tracks_preserves_order() {
        let player = json!({
            "playabilityStatus": {"status": "OK"},
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": [
                        {
                            "baseUrl": "https://www.youtube.com/api/timedtext?v=x&lang=es&fmt=srv3",
                            "name": {"runs": [{"text": "Spanish"}]},
                            "languageCode": "es"
                        },
                        {
                            "baseUrl": "https://www.youtube.com/api/timedtext?v=x&lang=en&kind=asr",
                            "name": {"simpleText": "English (auto-generated)"},
                            "languageCode": "en",
                            "kind": "asr"
                        }
                    ]
                }
            }
        });

        let tracks = parse_caption_tracks("x", &player).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code, "es");
        assert_eq!(tracks[0].language_name, "Spanish");
        assert!(!tracks[0].is_generated);
        assert!(!tracks[0].base_url.contains("fmt=srv3"));
        assert_eq!(tracks[1].language_name, "English (auto-generated)");
        assert!(tracks[1].is_generated);
    }

    #[test]
    fn test_parse_caption_tracks_errors() {
        let no_captions = json!({"playabilityStatus": {"status": "OK"}});
        assert!(matches!(
            parse_caption_tracks("x", &no_captions),
            Err(VidaskError::TranscriptsDisabled(_))
        ));

        let empty = json!({"captions": {"playerCaptionsTracklistRenderer": {"captionTracks": []}}});
        assert!(matches!(
            parse_caption_tracks("x", &empty),
            Err(VidaskError::NoTranscript(_))
        ));

        let unavailable = json!({
            "playabilityStatus": {"status": "ERROR", "reason": "Video unavailable"}
        });
        assert!(matches!(
            parse_caption_tracks("x", &unavailable),
            Err(VidaskError::VideoUnavailable(_))
        ));
    }

    #[test]
    fn test_json3_url_replaces_format() {
        let url = json3_url("https://www.youtube.com/api/timedtext?v=abc&lang=en&fmt=vtt").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("lang".to_string(), "en".to_string())));
        assert!(pairs.contains(&("fmt".to_string(), "json3".to_string())));
        assert!(!pairs.contains(&("fmt".to_string(), "vtt".to_string())));
    }

    #[test]
    fn test_parse_json3() {
        let body = r#"{
            "wireMagic": "pb3",
            "events": [
                {"tStartMs": 0, "dDurationMs": 5000, "id": 1, "wpWinPosId": 1},
                {"tStartMs": 100, "dDurationMs": 1500, "segs": [{"utf8": "Hello"}, {"utf8": " there"}]},
                {"tStartMs": 1600, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 2000, "dDurationMs": 1000, "segs": [{"utf8": "general\nKenobi"}]}
            ]
        }"#;

        let cues = parse_json3(body).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "Hello there");
        assert_eq!(cues[0].start_seconds, 0.1);
        assert_eq!(cues[1].text, "general Kenobi");
        assert_eq!(cues[1].duration_seconds, 1.0);
    }
}
