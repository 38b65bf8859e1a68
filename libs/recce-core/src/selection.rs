//! Round selection: a non-repeating, filtered, uniformly shuffled draw.

use crate::catalog::ReferenceIndex;
use crate::types::PlayableItem;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Draw up to `round_size` eligible items from the catalog.
///
/// An item is eligible when it has not been used this session, is not
/// disregarded, and its joined reference entry (if one exists) is not
/// disregarded and carries a link. Selected ids are added to `used_ids`.
/// Fewer than `round_size` items (including zero, meaning the catalog is
/// exhausted) is a valid result.
///
/// Uses `SliceRandom::shuffle` (Fisher-Yates) for an unbiased permutation.
pub fn select_round(
    catalog: &[PlayableItem],
    references: &ReferenceIndex,
    used_ids: &mut HashSet<String>,
    round_size: usize,
    rng: &mut impl Rng,
) -> Vec<PlayableItem> {
    let mut eligible: Vec<&PlayableItem> = catalog
        .iter()
        .filter(|item| !used_ids.contains(&item.id))
        .filter(|item| !item.disregard)
        .filter(|item| match references.lookup(&item.ref_id) {
            Some(entry) => !entry.disregard && entry.has_link(),
            None => true,
        })
        .collect();

    eligible.shuffle(rng);

    let selected: Vec<PlayableItem> = eligible
        .into_iter()
        .take(round_size)
        .cloned()
        .collect();

    for item in &selected {
        used_ids.insert(item.id.clone());
    }

    tracing::debug!("selected {} item(s) for round", selected.len());
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReferenceEntry;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(id: &str, ref_id: &str) -> PlayableItem {
        PlayableItem {
            id: id.to_string(),
            image_ref: format!("images/{id}.jpg"),
            ref_id: ref_id.to_string(),
            disregard: false,
            description: None,
        }
    }

    fn entry(ref_id: &str, link: Option<&str>, disregard: bool) -> ReferenceEntry {
        ReferenceEntry {
            ref_id: ref_id.to_string(),
            names: vec!["Name".into()],
            link: link.map(String::from),
            disregard,
        }
    }

    fn linked(ref_id: &str) -> ReferenceEntry {
        entry(ref_id, Some("https://example.org"), false)
    }

    #[test]
    fn filters_ineligible_items() {
        let mut flagged = item("i2", "r1");
        flagged.disregard = true;
        let catalog = vec![
            item("i1", "r1"),       // eligible
            flagged,                // item disregarded
            item("i3", "r2"),       // reference disregarded
            item("i4", "r3"),       // reference has no link
            item("i5", "missing"),  // no reference entry: still eligible
        ];
        let references = ReferenceIndex::new(vec![
            linked("r1"),
            entry("r2", Some("https://example.org"), true),
            entry("r3", None, false),
        ])
        .unwrap();

        let mut used = HashSet::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut ids: Vec<String> = select_round(&catalog, &references, &mut used, 10, &mut rng)
            .into_iter()
            .map(|i| i.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["i1", "i5"]);
    }

    #[test]
    fn used_ids_are_never_redrawn() {
        let catalog: Vec<PlayableItem> =
            (0..23).map(|n| item(&format!("i{n}"), "r1")).collect();
        let references = ReferenceIndex::new(vec![linked("r1")]).unwrap();

        let mut used = HashSet::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        let mut sizes = Vec::new();
        for _ in 0..4 {
            let round = select_round(&catalog, &references, &mut used, 10, &mut rng);
            sizes.push(round.len());
            for i in &round {
                assert!(seen.insert(i.id.clone()), "id {} drawn twice", i.id);
            }
        }
        assert_eq!(sizes, vec![10, 10, 3, 0]);
        assert_eq!(used.len(), 23);
    }

    #[test]
    fn short_catalog_yields_short_round() {
        let catalog = vec![item("i1", "r1"), item("i2", "r1")];
        let references = ReferenceIndex::new(vec![linked("r1")]).unwrap();
        let mut used = HashSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let round = select_round(&catalog, &references, &mut used, 10, &mut rng);
        assert_eq!(round.len(), 2);
    }

    #[test]
    fn marking_used_is_idempotent() {
        let catalog = vec![item("i1", "r1")];
        let references = ReferenceIndex::new(vec![linked("r1")]).unwrap();
        let mut used = HashSet::new();
        used.insert("i1".to_string());
        let mut rng = StdRng::seed_from_u64(1);
        let round = select_round(&catalog, &references, &mut used, 10, &mut rng);
        assert!(round.is_empty());
        assert_eq!(used.len(), 1);
    }
}
