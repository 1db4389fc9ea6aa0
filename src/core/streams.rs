use crate::core::StreamLink;

/// A stream row of the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedStream {
    pub link: StreamLink,
    pub host: String,
    /// Host is known to embed an extractable HLS player.
    pub playable: bool,
}

pub fn is_playable_host(host: &str, playable_hosts: &[String]) -> bool {
    !host.is_empty()
        && playable_hosts
            .iter()
            .any(|p| !p.is_empty() && host.contains(&p.to_lowercase()))
}

/// Orders streams so that playable hosts come first. The sort is stable: API
/// order is kept inside each group.
pub fn rank_streams(streams: &[StreamLink], playable_hosts: &[String]) -> Vec<RankedStream> {
    let mut ranked: Vec<RankedStream> = streams
        .iter()
        .map(|link| {
            let host = link.host();
            let playable = is_playable_host(&host, playable_hosts);
            RankedStream {
                link: link.clone(),
                host,
                playable,
            }
        })
        .collect();
    ranked.sort_by_key(|s| !s.playable);
    ranked
}
