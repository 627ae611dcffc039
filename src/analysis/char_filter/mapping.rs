//! Fixed-string mapping char filter.

use std::collections::HashMap;

use aho_corasick::{AhoCorasick, MatchKind};

use super::{CharFilter, Transformation};
use crate::error::{DecompoundError, Result};

/// Replaces every occurrence of a mapping key with its value.
///
/// Overlapping keys resolve leftmost-longest, so `{"ab" → "1", "abc" → "2"}`
/// rewrites `"abc"` to `"2"`. Typical uses are spelling normalisation ahead
/// of compound splitting, such as `ß → ss` or `ae → ä`.
pub struct MappingCharFilter {
    ac: AhoCorasick,
    replacements: Vec<String>,
}

impl MappingCharFilter {
    pub fn new(mapping: HashMap<String, String>) -> Result<Self> {
        if mapping.keys().any(|k| k.is_empty()) {
            return Err(DecompoundError::invalid_argument(
                "mapping keys must not be empty",
            ));
        }

        let mut keys = Vec::with_capacity(mapping.len());
        let mut replacements = Vec::with_capacity(mapping.len());
        for (k, v) in mapping {
            keys.push(k);
            replacements.push(v);
        }

        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&keys)
            .map_err(|e| DecompoundError::Anyhow(anyhow::Error::from(e)))?;

        Ok(Self { ac, replacements })
    }
}

impl CharFilter for MappingCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();

        let mut last_match_end = 0;
        // running UTF-16 positions in the input and output
        let mut original_pos = 0;
        let mut new_pos = 0;

        for m in self.ac.find_iter(input) {
            let replacement = &self.replacements[m.pattern().as_usize()];

            let unchanged = &input[last_match_end..m.start()];
            output.push_str(unchanged);
            let unchanged_len = unchanged.encode_utf16().count();
            original_pos += unchanged_len;
            new_pos += unchanged_len;

            let original_len = input[m.start()..m.end()].encode_utf16().count();
            let new_len = replacement.encode_utf16().count();
            output.push_str(replacement);

            transformations.push(Transformation::new(
                original_pos,
                original_pos + original_len,
                new_pos,
                new_pos + new_len,
            ));

            original_pos += original_len;
            new_pos += new_len;
            last_match_end = m.end();
        }

        output.push_str(&input[last_match_end..]);

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        "mapping"
    }
}
