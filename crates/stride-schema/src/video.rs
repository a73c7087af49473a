//! Turn shareable video links into embeddable player URLs.

use url::Url;

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";
const VIMEO_EMBED: &str = "https://player.vimeo.com/video/";

/// Embed URL for a stored video link.
///
/// YouTube (`watch?v=`, `youtu.be/`, `/embed/`) and Vimeo links map to their
/// player URLs. Any other non-empty link comes back unchanged; a missing or
/// blank link is `None`.
#[must_use]
pub fn embed_video_link(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    let Ok(parsed) = Url::parse(raw) else {
        return Some(raw.to_string());
    };
    Some(embed_for(&parsed).unwrap_or_else(|| raw.to_string()))
}

fn embed_for(url: &Url) -> Option<String> {
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    match host {
        "youtube.com" | "youtube-nocookie.com" => match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, id)| id.into_owned())
                .filter(|id| !id.is_empty())
                .map(|id| format!("{YOUTUBE_EMBED}{id}")),
            "embed" | "shorts" => segments.next().map(|id| format!("{YOUTUBE_EMBED}{id}")),
            _ => None,
        },
        "youtu.be" => segments.next().map(|id| format!("{YOUTUBE_EMBED}{id}")),
        "vimeo.com" => segments
            .find(|s| s.chars().all(|c| c.is_ascii_digit()))
            .map(|id| format!("{VIMEO_EMBED}{id}")),
        "player.vimeo.com" => {
            (segments.next()? == "video").then_some(())?;
            segments.next().map(|id| format!("{VIMEO_EMBED}{id}"))
        }
        _ => None,
    }
}
