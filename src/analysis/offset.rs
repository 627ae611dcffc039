//! Offset correction hooks.
//!
//! Tokenizers compute offsets in the text they were given. When a char filter
//! rewrote that text first, those offsets have to be mapped back to the
//! original input. An [`OffsetCorrector`] does that mapping; the tokenizer
//! calls it exactly once per token boundary.

use crate::analysis::char_filter::Transformation;

/// Maps an offset in the analysed text to an offset in the original input.
pub trait OffsetCorrector {
    /// Return the corrected offset.
    fn correct_offset(&self, offset: usize) -> usize;
}

impl<F> OffsetCorrector for F
where
    F: Fn(usize) -> usize,
{
    fn correct_offset(&self, offset: usize) -> usize {
        self(offset)
    }
}

/// Leaves offsets untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityCorrector;

impl OffsetCorrector for IdentityCorrector {
    fn correct_offset(&self, offset: usize) -> usize {
        offset
    }
}

/// Undoes the edits of one or more char filters.
///
/// Holds one transformation list per char filter, in the order the filters
/// ran; correction walks them in reverse.
#[derive(Clone, Debug, Default)]
pub struct TransformationCorrector {
    stages: Vec<Vec<Transformation>>,
}

impl TransformationCorrector {
    /// Create a corrector with no stages.
    pub fn new() -> Self {
        TransformationCorrector::default()
    }

    /// Append the transformations of the next char filter.
    pub fn push_stage(&mut self, transformations: Vec<Transformation>) {
        self.stages.push(transformations);
    }

    /// Whether no char filter changed anything.
    pub fn is_identity(&self) -> bool {
        self.stages.iter().all(|stage| stage.is_empty())
    }

    /// Map an offset back through a single stage.
    fn correct_stage(offset: usize, transformations: &[Transformation]) -> usize {
        let mut corrected = offset as isize;
        for t in transformations {
            if offset >= t.filtered.end {
                // after the edit
                corrected -= t.delta();
            } else if offset >= t.filtered.start {
                // inside the replacement: interpolate
                let inside = offset - t.filtered.start;
                return t.original.start + inside * t.original_len() / t.filtered_len();
            } else {
                break;
            }
        }
        corrected.max(0) as usize
    }
}

impl OffsetCorrector for TransformationCorrector {
    fn correct_offset(&self, offset: usize) -> usize {
        self.stages
            .iter()
            .rev()
            .fold(offset, |offset, stage| Self::correct_stage(offset, stage))
    }
}
