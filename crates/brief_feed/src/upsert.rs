use brief_core::FeedEntry;

pub trait HasGuid {
    fn guid(&self) -> Option<&str>;
}

impl HasGuid for FeedEntry {
    fn guid(&self) -> Option<&str> {
        Some(&self.guid)
    }
}

impl HasGuid for rss::Item {
    fn guid(&self) -> Option<&str> {
        self.guid().map(|g| g.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Inserted,
    /// Replaced the existing entry at this index.
    Replaced(usize),
}

/// Places `item` in `items` exactly once. An entry with the same guid is
/// replaced where it stands; otherwise the item goes to the front. Other
/// entries keep their order and content.
pub fn upsert<T: HasGuid>(items: &mut Vec<T>, item: T) -> Upserted {
    let position = match HasGuid::guid(&item) {
        Some(guid) => items.iter().position(|existing| HasGuid::guid(existing) == Some(guid)),
        None => None,
    };
    match position {
        Some(index) => {
            items[index] = item;
            Upserted::Replaced(index)
        }
        None => {
            items.insert(0, item);
            Upserted::Inserted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::Enclosure;

    fn entry(guid: &str, length: u64) -> FeedEntry {
        FeedEntry {
            guid: guid.to_string(),
            title: format!("title {}", guid),
            description: String::new(),
            enclosure: Enclosure {
                url: format!("https://x/audio/{}.mp3", guid),
                length,
                mime_type: "audio/mpeg".to_string(),
            },
            pub_date: String::new(),
        }
    }

    #[test]
    fn test_new_entry_goes_first() {
        let a = entry("ai_news_20250901", 10);
        let mut items = vec![a.clone()];
        assert_eq!(upsert(&mut items, entry("ai_news_20250908", 20)), Upserted::Inserted);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].guid, "ai_news_20250908");
        assert_eq!(items[1], a);
    }

    #[test]
    fn test_existing_entry_replaced_in_place() {
        let mut items = vec![
            entry("ai_news_20250915", 1),
            entry("ai_news_20250908", 2),
            entry("ai_news_20250901", 3),
        ];
        let outcome = upsert(&mut items, entry("ai_news_20250908", 99));
        assert_eq!(outcome, Upserted::Replaced(1));
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].enclosure.length, 99);
        assert_eq!(items[0].enclosure.length, 1);
        assert_eq!(items[2].enclosure.length, 3);
    }

    #[test]
    fn test_upsert_twice_is_stable() {
        let mut items = vec![entry("ai_news_20250901", 3)];
        upsert(&mut items, entry("ai_news_20250908", 5));
        let snapshot = items.clone();
        upsert(&mut items, entry("ai_news_20250908", 5));
        assert_eq!(items, snapshot);
    }

    #[test]
    fn test_rss_items_without_guid_never_match() {
        let mut items = vec![rss::Item::default()];
        let mut item = rss::Item::default();
        let mut guid = rss::Guid::default();
        guid.set_value("ai_news_20250901");
        item.set_guid(guid);
        assert_eq!(upsert(&mut items, item), Upserted::Inserted);
        assert_eq!(items.len(), 2);
    }
}
