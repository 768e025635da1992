//! Registry mapping primer keys to their amplification primer pairs.
//!
//! Every tag file row is emitted with the forward/reverse primers of the
//! assay the run was sequenced with. The sequences are embedded as
//! `&'static str` constants; extending the registry means editing this table
//! and recompiling.

/// A primer pair for one assay, selected on the command line by [`PrimerSet::key`].
#[derive(Clone, Debug)]
pub struct PrimerSet {
    /// Short stable key (e.g. `"gh"`, `"12s"`, `"16s"`), matched case-insensitively.
    pub key: &'static str,
    /// One-line description of the assay target.
    pub description: &'static str,
    /// Forward primer, uppercase IUPAC (may include wobble codes).
    pub forward: &'static str,
    /// Reverse primer, uppercase IUPAC (may include wobble codes).
    pub reverse: &'static str,
}

pub const PRIMER_SETS: &[PrimerSet] = &[
    PrimerSet {
        key: "gh",
        description: "GH target amplicon.",
        forward: "GGGCAATCCTGAGCCAA",
        reverse: "CCATTGAGTCTCTGCACCTATC",
    },
    PrimerSet {
        key: "12s",
        description: "12S rRNA vertebrate metabarcoding target.",
        forward: "ACACCGCCCGTCACCCT",
        reverse: "GTAYRCTTACCWTGTTACGACTT",
    },
    PrimerSet {
        key: "16s",
        description: "16S rRNA metabarcoding target.",
        forward: "CGAGAAGACCCTATGGAGCT",
        reverse: "CCGAGGTCRCCCCAACC",
    },
];

/// Retrieve the primer set for a key. Keys are case-insensitive.
pub fn get_primer_set(key: &str) -> Option<&'static PrimerSet> {
    PRIMER_SETS.iter().find(|p| p.key.eq_ignore_ascii_case(key))
}

/// Comma-separated list of valid keys, for error messages and help output.
pub fn known_keys() -> String {
    PRIMER_SETS
        .iter()
        .map(|p| p.key)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rows of `(key, description, forward, reverse)` for CLI listing.
pub fn list_primer_rows() -> Vec<(String, String, String, String)> {
    PRIMER_SETS
        .iter()
        .map(|p| {
            (
                p.key.to_string(),
                p.description.to_string(),
                p.forward.to_string(),
                p.reverse.to_string(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(get_primer_set("12S").unwrap().key, "12s");
        assert_eq!(get_primer_set("GH").unwrap().forward, "GGGCAATCCTGAGCCAA");
        assert!(get_primer_set("18s").is_none());
    }

    #[test]
    fn known_keys_lists_all() {
        let keys = known_keys();
        assert_eq!(keys, "gh, 12s, 16s");
    }

    #[test]
    fn list_rows_cover_registry() {
        let rows = list_primer_rows();
        assert_eq!(rows.len(), PRIMER_SETS.len());
        assert!(rows.iter().any(|(k, _, _, r)| k == "16s" && r == "CCGAGGTCRCCCCAACC"));
    }
}
