//! Consolidation of demands by supply class.
//!
//! The contracting sector groups the DFDs sent by requesting areas under
//! supply classes such as `"3610-Equipamento para impressão, duplicação e
//! encadernação"`, with the number of DFDs and the estimated value of each
//! class.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Priority, normalize_description};

/// Search terms shorter than this are ignored.
pub const MIN_SEARCH_LEN: usize = 3;

/// One DFD (or DFD line) classified under a supply class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationEntry {
    /// Supply class label, `"{code}-{name}"`.
    pub class: String,
    pub dfd_number: String,
    pub uasg_number: String,
    pub area_name: String,
    pub description: String,
    pub conclusion_date: Option<NaiveDate>,
    pub estimated_value: Decimal,
    pub priority: Priority,
}

/// Demands of one supply class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSummary {
    pub class: String,
    pub code: Option<u32>,
    /// Distinct DFD numbers in the class.
    pub dfd_count: usize,
    pub estimated_total: Decimal,
    pub entries: Vec<ConsolidationEntry>,
}

/// Narrowing applied before grouping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsolidationFilter {
    /// Keep only this requesting area (exact name).
    pub area_name: Option<String>,
    /// Case-insensitive term matched against description, class and DFD
    /// number. Needs at least [`MIN_SEARCH_LEN`] characters.
    pub term: Option<String>,
}

impl ConsolidationFilter {
    fn matches(&self, entry: &ConsolidationEntry) -> bool {
        if let Some(area) = &self.area_name {
            if &entry.area_name != area {
                return false;
            }
        }
        match self.term.as_deref().map(normalize_description) {
            Some(term) if term.chars().count() >= MIN_SEARCH_LEN => {
                entry.description.to_lowercase().contains(&term)
                    || entry.class.to_lowercase().contains(&term)
                    || entry.dfd_number.contains(&term)
            }
            _ => true,
        }
    }
}

/// Numeric code in front of a class label: `"3610-Equipamento"` → `3610`.
pub fn parse_class_code(class: &str) -> Option<u32> {
    let (code, _) = class.trim().split_once('-')?;
    code.trim().parse().ok()
}

/// Group entries by class, ordered by class code. Labels without a code
/// come last, in label order.
pub fn consolidate(entries: &[ConsolidationEntry]) -> Vec<ClassSummary> {
    consolidate_filtered(entries, &ConsolidationFilter::default())
}

/// [`consolidate`] over the entries accepted by `filter`.
pub fn consolidate_filtered(
    entries: &[ConsolidationEntry],
    filter: &ConsolidationFilter,
) -> Vec<ClassSummary> {
    let mut groups: BTreeMap<(u32, u8, String), Vec<ConsolidationEntry>> = BTreeMap::new();
    for entry in entries.iter().filter(|e| filter.matches(e)) {
        let class = entry.class.trim().to_string();
        let key = match parse_class_code(&class) {
            Some(code) => (code, 0, class),
            None => (u32::MAX, 1, class),
        };
        groups.entry(key).or_default().push(entry.clone());
    }

    groups
        .into_iter()
        .map(|((_, _, class), entries)| {
            let numbers: HashSet<&str> = entries.iter().map(|e| e.dfd_number.as_str()).collect();
            ClassSummary {
                code: parse_class_code(&class),
                dfd_count: numbers.len(),
                estimated_total: entries.iter().map(|e| e.estimated_value).sum(),
                class,
                entries,
            }
        })
        .collect()
}

/// Estimated value over all classes.
pub fn grand_total(summaries: &[ClassSummary]) -> Decimal {
    summaries.iter().map(|s| s.estimated_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(class: &str, dfd: &str, value: Decimal) -> ConsolidationEntry {
        ConsolidationEntry {
            class: class.into(),
            dfd_number: dfd.into(),
            uasg_number: "200999".into(),
            area_name: "Almoxarifado Central".into(),
            description: "Impressora".into(),
            conclusion_date: None,
            estimated_value: value,
            priority: Priority::Medium,
        }
    }

    #[test]
    fn class_codes() {
        assert_eq!(
            parse_class_code("3610-Equipamento para impressão, duplicação e encadernação"),
            Some(3610)
        );
        assert_eq!(parse_class_code("7110 - Mobiliário para escritório"), Some(7110));
        assert_eq!(parse_class_code("Sem classe"), None);
    }

    #[test]
    fn counts_distinct_dfds() {
        let entries = vec![
            entry("7110-Mobiliário para escritório", "1/2025", dec!(100)),
            entry("7110-Mobiliário para escritório", "1/2025", dec!(50)),
            entry("7110-Mobiliário para escritório", "2/2025", dec!(25)),
        ];
        let summary = consolidate(&entries);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].dfd_count, 2);
        assert_eq!(summary[0].estimated_total, dec!(175));
        assert_eq!(summary[0].entries.len(), 3);
    }

    #[test]
    fn uncoded_classes_last() {
        let entries = vec![
            entry("Outros", "3/2025", dec!(1)),
            entry("7021-Unidades centrais", "2/2025", dec!(1)),
            entry("3610-Equipamento", "1/2025", dec!(1)),
        ];
        let codes: Vec<_> = consolidate(&entries).into_iter().map(|s| s.code).collect();
        assert_eq!(codes, vec![Some(3610), Some(7021), None]);
    }

    #[test]
    fn short_terms_do_not_filter() {
        let entries = vec![entry("3610-Equipamento", "1/2025", dec!(1))];
        let filter = ConsolidationFilter {
            area_name: None,
            term: Some("xy".into()),
        };
        assert_eq!(consolidate_filtered(&entries, &filter).len(), 1);
    }
}
