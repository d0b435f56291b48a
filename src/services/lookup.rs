//! Episode metadata lookup seam.

use crate::models::media::MetadataResult;

/// Looks up episode metadata from some catalog.
///
/// Implementations never fail: any problem degrades to an empty
/// `MetadataResult` and is logged.
#[allow(async_fn_in_trait)]
pub trait EpisodeLookup {
    async fn lookup_episode(&mut self, show_name: &str, season: u16, episode: u16)
        -> MetadataResult;
}
