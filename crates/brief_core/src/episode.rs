use chrono::{NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::Error;

pub const GUID_PREFIX: &str = "ai_news_";

/// Identity of one episode, `ai_news_YYYYMMDD`.
///
/// The same string is the feed guid and the stem of every artifact produced
/// for the episode (`.json`, `.txt`, `.mp3`, `.html`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpisodeId {
    date: NaiveDate,
}

impl EpisodeId {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Parses a bare `YYYYMMDD` stamp.
    pub fn from_stamp(stamp: &str) -> Result<Self, Error> {
        if stamp.len() != 8 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidGuid(format!("{}{}", GUID_PREFIX, stamp)));
        }
        NaiveDate::parse_from_str(stamp, "%Y%m%d")
            .map(Self::new)
            .map_err(|_| Error::InvalidGuid(format!("{}{}", GUID_PREFIX, stamp)))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn stamp(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    pub fn guid(&self) -> String {
        self.to_string()
    }

    /// RFC 2822 date at midnight UTC of the stamp. Independent of the wall
    /// clock so re-runs produce the same value.
    pub fn pub_date(&self) -> String {
        let midnight = self.date.and_hms_opt(0, 0, 0).unwrap_or_default();
        Utc.from_utc_datetime(&midnight)
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string()
    }

    /// `16 Sep 25`
    pub fn short_date(&self) -> String {
        self.date.format("%d %b %y").to_string()
    }

    /// `Tuesday, September 16, 2025`
    pub fn long_date(&self) -> String {
        self.date.format("%A, %B %-d, %Y").to_string()
    }

    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self, extension)
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", GUID_PREFIX, self.date.format("%Y%m%d"))
    }
}

impl FromStr for EpisodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stamp = s
            .strip_prefix(GUID_PREFIX)
            .ok_or_else(|| Error::InvalidGuid(s.to_string()))?;
        Self::from_stamp(stamp).map_err(|_| Error::InvalidGuid(s.to_string()))
    }
}

impl Serialize for EpisodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EpisodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guid() {
        let id: EpisodeId = "ai_news_20250916".parse().unwrap();
        assert_eq!(id.date(), NaiveDate::from_ymd_opt(2025, 9, 16).unwrap());
        assert_eq!(id.stamp(), "20250916");
        assert_eq!(id.to_string(), "ai_news_20250916");
    }

    #[test]
    fn test_rejects_malformed_guids() {
        for bad in [
            "ai_news_2025091",
            "ai_news_202509160",
            "ai_news_20250230",
            "news_20250916",
            "ai_news_2025-09-16",
            "ai_news_+2025091",
            "",
        ] {
            let result = bad.parse::<EpisodeId>();
            assert!(matches!(result, Err(Error::InvalidGuid(_))), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_pub_date_is_derived_from_stamp() {
        let id = EpisodeId::from_stamp("20250916").unwrap();
        assert_eq!(id.pub_date(), "Tue, 16 Sep 2025 00:00:00 GMT");
        assert_eq!(id.pub_date(), id.pub_date());
    }

    #[test]
    fn test_friendly_dates() {
        let id = EpisodeId::from_stamp("20250907").unwrap();
        assert_eq!(id.short_date(), "07 Sep 25");
        assert_eq!(id.long_date(), "Sunday, September 7, 2025");
        assert_eq!(id.file_name("mp3"), "ai_news_20250907.mp3");
    }

    #[test]
    fn test_serde_uses_guid_form() {
        let id = EpisodeId::from_stamp("20251006").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ai_news_20251006\"");
        let back: EpisodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
