//! Recent headlines from a few public RSS feeds, offered to the drafting
//! model as optional context. Failures here never stop a run.

use futures::future::join_all;
use reqwest::Client;
use rss::Channel;

pub const DEFAULT_SOURCES: [&str; 3] = [
    "https://www.theverge.com/rss/index.xml",
    "https://feeds.feedburner.com/TechCrunch/artificial-intelligence",
    "https://www.marktechpost.com/feed/",
];

pub const PER_FEED: usize = 6;

pub async fn fetch_headlines(client: &Client, sources: &[String], limit: usize) -> Vec<String> {
    let fetches = sources.iter().map(|url| fetch_channel(client, url));
    let mut headlines = Vec::new();
    for (url, result) in sources.iter().zip(join_all(fetches).await) {
        match result {
            Ok(channel) => headlines.extend(headlines_from_channel(&channel, PER_FEED)),
            Err(e) => tracing::warn!("⚠️ Skipping headlines from {}: {}", url, e),
        }
    }
    headlines.truncate(limit);
    headlines
}

async fn fetch_channel(client: &Client, url: &str) -> Result<Channel, String> {
    let bytes = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())?;
    Channel::read_from(&bytes[..]).map_err(|e| e.to_string())
}

/// `- title (link)` for the first `per_feed` titled items.
pub fn headlines_from_channel(channel: &Channel, per_feed: usize) -> Vec<String> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let title = item.title()?.trim();
            if title.is_empty() {
                return None;
            }
            Some(match item.link().map(str::trim).filter(|l| !l.is_empty()) {
                Some(link) => format!("- {} ({})", title, link),
                None => format!("- {}", title),
            })
        })
        .take(per_feed)
        .collect()
}
