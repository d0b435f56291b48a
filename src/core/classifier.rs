//! Filename classifier.
//!
//! Decides whether a file stem names a TV episode (`SxxExx` marker) or a
//! movie, and pulls the show/season/episode out of episode stems.

use crate::models::media::{EpisodeIdentity, MediaKind};
use regex::Regex;
use std::sync::LazyLock;

static EPISODE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)S\d{2}E\d{2}").unwrap());

/// Show name, then a dot or space, then the marker. Anchored at the start.
static EPISODE_IDENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.*?)[. ]S(\d{2})E(\d{2})").unwrap());

/// Check if a stem contains an `SxxExx` marker anywhere.
pub fn is_episode(stem: &str) -> bool {
    EPISODE_MARKER_RE.is_match(stem)
}

/// Classify a stem as movie or episode.
pub fn classify(stem: &str) -> MediaKind {
    if is_episode(stem) {
        MediaKind::Episode
    } else {
        MediaKind::Movie
    }
}

/// Extract show name, season and episode from an episode stem.
///
/// Returns `None` when the marker is not preceded by a dot or space
/// delimited prefix, e.g. `S01E02 - Pilot`.
pub fn extract_episode_identity(stem: &str) -> Option<EpisodeIdentity> {
    let caps = EPISODE_IDENTITY_RE.captures(stem)?;

    let show_name = caps.get(1)?.as_str().to_string();
    let season = caps.get(2)?.as_str().parse().ok()?;
    let episode = caps.get(3)?.as_str().parse().ok()?;

    Some(EpisodeIdentity {
        show_name,
        season,
        episode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_episode() {
        assert!(is_episode("Show.Name.S01E02"));
        assert!(is_episode("Show.Name.S01E02.mkv"));
        assert!(is_episode("show.name.s10e11.720p"));
        assert!(is_episode("S01E02"));
        assert!(!is_episode("Some.Movie.2020"));
        assert!(!is_episode("Some.Movie.2020.mkv"));
        assert!(!is_episode("Show.S1E2"));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("Breaking.Bad.S01E01"), MediaKind::Episode);
        assert_eq!(classify("Inception (2010)"), MediaKind::Movie);
    }

    #[test]
    fn test_extract_with_space() {
        let identity = extract_episode_identity("The Show S03E07").unwrap();
        assert_eq!(
            identity,
            EpisodeIdentity {
                show_name: "The Show".to_string(),
                season: 3,
                episode: 7,
            }
        );
    }

    #[test]
    fn test_extract_with_dots_and_trailing_tags() {
        let identity = extract_episode_identity("Breaking.Bad.s05e14.1080p.WEB").unwrap();
        assert_eq!(identity.show_name, "Breaking.Bad");
        assert_eq!(identity.season, 5);
        assert_eq!(identity.episode, 14);
    }

    #[test]
    fn test_extract_takes_first_marker() {
        let identity = extract_episode_identity("Show S01E02 S01E03").unwrap();
        assert_eq!(identity.show_name, "Show");
        assert_eq!(identity.episode, 2);
    }

    #[test]
    fn test_extract_requires_delimited_prefix() {
        assert!(extract_episode_identity("S01E02 - Pilot").is_none());
        assert!(extract_episode_identity("ShowS01E02").is_none());
        assert!(extract_episode_identity("Show-S01E02").is_none());
        assert!(extract_episode_identity("Some.Movie.2020").is_none());
    }
}
