use std::collections::{BTreeMap, HashMap};

use brief_core::Footnote;

use crate::raw::RawFootnote;

/// Footnote table plus the mapping from source ids to table ids.
#[derive(Debug, Default)]
pub(crate) struct FootnoteTable {
    pub footnotes: BTreeMap<u32, Footnote>,
    remap: HashMap<u32, u32>,
}

impl FootnoteTable {
    pub fn build(raw: &[RawFootnote]) -> Self {
        let mut kept: Vec<(u32, Footnote)> = Vec::with_capacity(raw.len());
        for note in raw {
            let Some(url) = note.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) else {
                tracing::debug!("Dropping footnote at position {} without url", note.position);
                continue;
            };
            let id = note.id.unwrap_or(note.position as u32);
            kept.push((
                id,
                Footnote {
                    title: note.title.clone(),
                    url: url.to_string(),
                },
            ));
        }

        if is_dense(&kept) {
            let remap = kept.iter().map(|(id, _)| (*id, *id)).collect();
            return Self {
                footnotes: kept.into_iter().collect(),
                remap,
            };
        }

        tracing::debug!("Renumbering {} footnotes to 1..{}", kept.len(), kept.len());
        kept.sort_by_key(|(id, _)| *id);
        let mut table = Self::default();
        for (i, (old, footnote)) in kept.into_iter().enumerate() {
            let new = i as u32 + 1;
            table.remap.entry(old).or_insert(new);
            table.footnotes.insert(new, footnote);
        }
        table
    }

    /// Table id for a source citation, or `None` when it dangles.
    pub fn resolve(&self, id: u32) -> Option<u32> {
        self.remap.get(&id).copied()
    }
}

/// Ids are exactly `1..=N` with no repeats.
fn is_dense(kept: &[(u32, Footnote)]) -> bool {
    let mut ids: Vec<u32> = kept.iter().map(|(id, _)| *id).collect();
    ids.sort_unstable();
    ids.iter().enumerate().all(|(i, id)| *id == i as u32 + 1)
}
