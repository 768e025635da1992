//! Repeat annotation and placeholder numbering.
//!
//! The same biological sample is often plated more than once within a
//! library, but every identifier in a tag file must be unique. Annotation
//! rewrites each well's sample name to `<name>_rpt<k>`, numbering
//! occurrences in canonical order (ascending plate, then column-major well
//! order), so output is reproducible across runs.

use std::collections::BTreeMap;

use crate::library::Library;

/// Rewrite every sample name in a library to `<name>_rpt<k>`.
///
/// `k` starts at 1 for the first occurrence of each distinct name. Returns
/// the final per-name occurrence counts for the run summary.
pub fn annotate_repeats(library: &mut Library) -> BTreeMap<String, u32> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for wells in library.plates.values_mut() {
        for sample in wells.values_mut() {
            let n = counts.entry(sample.clone()).or_insert(0);
            *n += 1;
            sample.push_str(&format!("_rpt{n}"));
        }
    }
    counts
}

/// Monotonic counter for synthetic `not_used<N>` placeholder names.
///
/// One counter is threaded through the whole run: all libraries, the
/// not-used outputs and the matrix draw from it, so every placeholder in a
/// run is globally unique.
#[derive(Debug)]
pub struct NotUsedCounter {
    next: u64,
}

impl NotUsedCounter {
    pub fn new() -> Self {
        NotUsedCounter { next: 1 }
    }

    /// Produce the next placeholder name (`not_used1`, `not_used2`, …).
    pub fn next_name(&mut self) -> String {
        let name = format!("not_used{}", self.next);
        self.next += 1;
        name
    }

    /// Placeholders handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for NotUsedCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn library_with(samples: &[(u8, &str, &str)]) -> Library {
        let mut plates: BTreeMap<u8, BTreeMap<crate::well::Well, String>> = BTreeMap::new();
        for (plate, well, name) in samples {
            plates
                .entry(*plate)
                .or_default()
                .insert(well.parse().unwrap(), name.to_string());
        }
        Library { name: "Lib1".to_string(), plates }
    }

    #[test]
    fn numbers_duplicates_in_canonical_order() {
        let mut lib = library_with(&[(1, "A1", "FOX12"), (1, "A2", "FOX12"), (1, "B1", "OTTER1")]);
        let counts = annotate_repeats(&mut lib);
        // A1 comes before B1 comes before A2 in column-major order
        assert_eq!(lib.sample(1, "A1".parse().unwrap()), Some("FOX12_rpt1"));
        assert_eq!(lib.sample(1, "A2".parse().unwrap()), Some("FOX12_rpt2"));
        assert_eq!(lib.sample(1, "B1".parse().unwrap()), Some("OTTER1_rpt1"));
        assert_eq!(counts.get("FOX12"), Some(&2));
        assert_eq!(counts.get("OTTER1"), Some(&1));
    }

    #[test]
    fn numbering_spans_plates() {
        let mut lib = library_with(&[(2, "H12", "FOX12"), (1, "H12", "FOX12")]);
        annotate_repeats(&mut lib);
        assert_eq!(lib.sample(1, "H12".parse().unwrap()), Some("FOX12_rpt1"));
        assert_eq!(lib.sample(2, "H12".parse().unwrap()), Some("FOX12_rpt2"));
    }

    #[test]
    fn annotated_names_are_unique() {
        let mut lib = library_with(&[
            (1, "A1", "S"),
            (1, "B1", "S"),
            (1, "C1", "S"),
            (2, "A1", "T"),
        ]);
        annotate_repeats(&mut lib);
        let mut seen = std::collections::HashSet::new();
        for wells in lib.plates.values() {
            for name in wells.values() {
                assert!(seen.insert(name.clone()), "duplicate identifier {name}");
            }
        }
    }

    #[test]
    fn not_used_counter_is_monotonic_from_one() {
        let mut c = NotUsedCounter::new();
        assert_eq!(c.next_name(), "not_used1");
        assert_eq!(c.next_name(), "not_used2");
        assert_eq!(c.issued(), 2);
    }
}
