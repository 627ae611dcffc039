//! Char filters for text normalization before tokenization.
//!
//! A char filter rewrites the raw text and reports every edit as a
//! [`Transformation`]. Those records feed a
//! [`TransformationCorrector`](crate::analysis::offset::TransformationCorrector),
//! which maps token offsets in the rewritten text back to the original.
//!
//! All positions are UTF-16 unit offsets, the same unit token offsets use.
//!
//! # Available Filters
//!
//! - [`mapping::MappingCharFilter`] - Replaces fixed strings (leftmost-longest)
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//!
//! use decompound::analysis::char_filter::CharFilter;
//! use decompound::analysis::char_filter::mapping::MappingCharFilter;
//!
//! let mut mapping = HashMap::new();
//! mapping.insert("ß".to_string(), "ss".to_string());
//! let filter = MappingCharFilter::new(mapping).unwrap();
//!
//! let (text, transformations) = filter.filter("Straße");
//! assert_eq!(text, "Strasse");
//! assert_eq!(transformations.len(), 1);
//! ```

use std::ops::Range;

/// One edit made by a char filter: `original` units of the input were
/// replaced by `filtered` units of the output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transformation {
    pub original: Range<usize>,
    pub filtered: Range<usize>,
}

impl Transformation {
    pub fn new(
        original_start: usize,
        original_end: usize,
        filtered_start: usize,
        filtered_end: usize,
    ) -> Self {
        Transformation {
            original: original_start..original_end,
            filtered: filtered_start..filtered_end,
        }
    }

    pub fn original_len(&self) -> usize {
        self.original.len()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Units added (positive) or removed (negative) by this edit.
    pub fn delta(&self) -> isize {
        self.filtered_len() as isize - self.original_len() as isize
    }
}

/// Rewrites raw text before it reaches the tokenizer.
///
/// The returned transformations are sorted by position and do not overlap.
pub trait CharFilter: Send + Sync {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>);

    fn name(&self) -> &'static str;
}

pub mod mapping;
