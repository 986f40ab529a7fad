//! Catalog lookups: similarity alerts, duplicate detection and search.

use super::types::{CatalogItem, Material};

/// Share of common words above which two descriptions count as similar.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Minimum word count on both sides before word overlap is considered.
pub const SIMILARITY_MIN_WORDS: usize = 3;

/// Lowercase and trim a description for comparisons.
pub fn normalize_description(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Word-overlap ratio between two normalized descriptions: words of `a`
/// also present in `b`, over the larger word count.
pub fn word_overlap(a: &str, b: &str) -> f64 {
    let wa: Vec<&str> = a.split_whitespace().collect();
    let wb: Vec<&str> = b.split_whitespace().collect();
    let max = wa.len().max(wb.len());
    if max == 0 {
        return 0.0;
    }
    let common = wa.iter().filter(|w| wb.contains(w)).count();
    common as f64 / max as f64
}

/// Find an active catalog item equal or very similar to `description`.
///
/// Exact matches (after normalization) always qualify. Otherwise both sides
/// need at least three words and more than 80 % of them in common. The
/// first qualifying item in catalog order is returned.
pub fn find_similar<'a>(description: &str, catalog: &'a [CatalogItem]) -> Option<&'a CatalogItem> {
    let wanted = normalize_description(description);
    if wanted.is_empty() {
        return None;
    }
    let wanted_words = wanted.split_whitespace().count();

    catalog.iter().filter(|item| item.active).find(|item| {
        let candidate = normalize_description(&item.description);
        if candidate == wanted {
            return true;
        }
        candidate.split_whitespace().count() >= SIMILARITY_MIN_WORDS
            && wanted_words >= SIMILARITY_MIN_WORDS
            && word_overlap(&candidate, &wanted) > SIMILARITY_THRESHOLD
    })
}

/// Whether `description` is already used by another material of the DFD.
///
/// `editing` is the index of the row being edited, which is skipped.
pub fn is_duplicate(description: &str, materials: &[Material], editing: Option<usize>) -> bool {
    let wanted = normalize_description(description);
    materials
        .iter()
        .enumerate()
        .any(|(i, m)| Some(i) != editing && normalize_description(&m.description) == wanted)
}

/// Whether a catalog item is already represented among `materials`, by
/// catalog code or by description.
pub fn is_in_materials(item: &CatalogItem, materials: &[Material]) -> bool {
    let wanted = normalize_description(&item.description);
    materials.iter().any(|m| {
        let same_code = match (&item.code, &m.code) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
        same_code || normalize_description(&m.description) == wanted
    })
}

/// Case-insensitive search over description and code of active items.
/// An empty term returns every active item.
pub fn search_catalog<'a>(term: &str, catalog: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
    let term = normalize_description(term);
    catalog
        .iter()
        .filter(|item| item.active)
        .filter(|item| {
            term.is_empty()
                || item.description.to_lowercase().contains(&term)
                || item
                    .code
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&term))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ItemKind;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn item(code: Option<&str>, description: &str, active: bool) -> CatalogItem {
        CatalogItem {
            id: Uuid::new_v4(),
            code: code.map(Into::into),
            kind: ItemKind::Material,
            description: description.into(),
            unit: "UN".into(),
            reference_price: Some(dec!(10)),
            specifications: None,
            active,
        }
    }

    fn material(description: &str) -> Material {
        Material {
            id: None,
            kind: ItemKind::Material,
            code: None,
            description: description.into(),
            quantity: dec!(1),
            unit: "UN".into(),
            unit_price: dec!(1),
            justification: None,
        }
    }

    #[test]
    fn exact_match_ignores_case_and_spaces() {
        let catalog = vec![item(None, "Caneta azul", true)];
        assert!(find_similar("  CANETA AZUL ", &catalog).is_some());
    }

    #[test]
    fn word_overlap_above_threshold() {
        let catalog = vec![item(
            None,
            "papel sulfite a4 branco 75g resma 500 folhas",
            true,
        )];
        // 7 of 8 words in common = 0.875
        assert!(find_similar("papel sulfite a4 branco 75g resma 500 unidades", &catalog).is_some());
        // 3 of 8
        assert!(find_similar("papel sulfite a4 colorido", &catalog).is_none());
    }

    #[test]
    fn short_descriptions_need_exact_match() {
        let catalog = vec![item(None, "caneta azul", true)];
        assert!(find_similar("caneta preta", &catalog).is_none());
    }

    #[test]
    fn inactive_items_ignored() {
        let catalog = vec![item(None, "Caneta azul", false)];
        assert!(find_similar("caneta azul", &catalog).is_none());
        assert!(search_catalog("caneta", &catalog).is_empty());
    }

    #[test]
    fn duplicate_detection_skips_edited_row() {
        let materials = vec![material("Caneta azul"), material("Lápis")];
        assert!(is_duplicate("caneta AZUL", &materials, None));
        assert!(!is_duplicate("caneta azul", &materials, Some(0)));
        assert!(!is_duplicate("borracha", &materials, None));
    }

    #[test]
    fn catalog_item_in_materials_by_code_or_description() {
        let mut m = material("Outra descrição");
        m.code = Some("CAT-1".into());
        let by_code = item(Some("CAT-1"), "Caneta", true);
        let by_desc = item(Some("CAT-2"), "outra descrição", true);
        let absent = item(Some("CAT-3"), "Lápis", true);
        let materials = vec![m];
        assert!(is_in_materials(&by_code, &materials));
        assert!(is_in_materials(&by_desc, &materials));
        assert!(!is_in_materials(&absent, &materials));
    }

    #[test]
    fn search_by_code_or_description() {
        let catalog = vec![
            item(Some("MAT-001"), "Caneta azul", true),
            item(Some("SRV-010"), "Manutenção predial", true),
        ];
        assert_eq!(search_catalog("caneta", &catalog).len(), 1);
        assert_eq!(search_catalog("srv", &catalog).len(), 1);
        assert_eq!(search_catalog("", &catalog).len(), 2);
        assert!(search_catalog("xyz", &catalog).is_empty());
    }
}
