//! Codepoint-aware character buffering.
//!
//! Text is buffered as UTF-16 code units. [`CharacterMode`] decides how those
//! units are interpreted:
//!
//! - [`CharacterMode::Codepoint`] treats a surrogate pair as one codepoint and
//!   never lets a [`fill`](CharacterMode::fill) end between the two halves of
//!   a pair.
//! - [`CharacterMode::Legacy`] treats every unit as a character of its own,
//!   reproducing the behaviour of configurations created before supplementary
//!   characters were handled.
//!
//! The mode is picked once by the owning component and never mixed within one
//! buffer's lifetime.
//!
//! # Examples
//!
//! ```
//! use decompound::analysis::char_source::Utf16Source;
//! use decompound::analysis::character::{CharacterBuffer, CharacterMode};
//!
//! let mode = CharacterMode::Codepoint;
//! let mut buffer = CharacterBuffer::new(4).unwrap();
//! // "abc" followed by U+1F980, which needs two units
//! let mut source = Utf16Source::from("abc\u{1F980}");
//!
//! // the high surrogate would be the last unit, so it is carried over
//! assert!(mode.fill_buffer(&mut buffer, &mut source).unwrap());
//! assert_eq!(buffer.len(), 3);
//!
//! mode.fill_buffer(&mut buffer, &mut source).unwrap();
//! assert_eq!(mode.code_point_at(buffer.as_slice(), 0, buffer.len()).unwrap(), 0x1F980);
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::char_source::{CharSource, read_fully};
use crate::error::{DecompoundError, Result};

/// Smallest buffer able to hold a surrogate pair.
pub const MIN_BUFFER_SIZE: usize = 2;

const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Whether `unit` is the leading half of a surrogate pair.
#[inline]
pub fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

/// Whether `unit` is the trailing half of a surrogate pair.
#[inline]
pub fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

#[inline]
fn combine_surrogates(high: u16, low: u16) -> u32 {
    0x10000 + (((high as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00)
}

/// Number of UTF-16 units needed to encode `code_point`.
#[inline]
fn unit_count(code_point: u32) -> usize {
    if code_point >= 0x10000 { 2 } else { 1 }
}

/// Encode `code_point` at `dest[index..]`, returning the number of units written.
///
/// Callers guarantee room for `unit_count(code_point)` units.
fn encode_at(code_point: u32, dest: &mut [u16], index: usize) -> usize {
    if code_point >= 0x10000 {
        let v = code_point - 0x10000;
        dest[index] = 0xD800 + (v >> 10) as u16;
        dest[index + 1] = 0xDC00 + (v & 0x3FF) as u16;
        2
    } else {
        dest[index] = code_point as u16;
        1
    }
}

/// Simple one-to-one case mapping of a codepoint.
///
/// Lone surrogates and mappings that expand to several characters are left
/// unchanged.
fn map_case(code_point: u32, upper: bool) -> u32 {
    let Some(c) = char::from_u32(code_point) else {
        return code_point;
    };
    let mut mapped = String::with_capacity(4);
    if upper {
        mapped.extend(c.to_uppercase());
    } else {
        mapped.extend(c.to_lowercase());
    }
    let mut chars = mapped.chars();
    match (chars.next(), chars.next()) {
        (Some(m), None) => m as u32,
        _ => code_point,
    }
}

/// A fixed-capacity buffer of UTF-16 units filled by [`CharacterMode::fill`].
///
/// The buffer remembers a high surrogate withheld from the previous fill and
/// installs it at the front of the next one.
#[derive(Clone, Debug)]
pub struct CharacterBuffer {
    buffer: Box<[u16]>,
    offset: usize,
    length: usize,
    trailing_high_surrogate: Option<u16>,
}

impl CharacterBuffer {
    /// Allocate a buffer with room for `capacity` units.
    ///
    /// Fails with [`DecompoundError::InvalidArgument`] when `capacity` is
    /// below [`MIN_BUFFER_SIZE`].
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < MIN_BUFFER_SIZE {
            return Err(DecompoundError::invalid_argument(format!(
                "buffer size must be >= {MIN_BUFFER_SIZE}, got {capacity}"
            )));
        }
        Ok(CharacterBuffer {
            buffer: vec![0u16; capacity].into_boxed_slice(),
            offset: 0,
            length: 0,
            trailing_high_surrogate: None,
        })
    }

    /// The whole backing storage.
    pub fn buffer(&self) -> &[u16] {
        &self.buffer
    }

    /// The whole backing storage, mutably.
    pub fn buffer_mut(&mut self) -> &mut [u16] {
        &mut self.buffer
    }

    /// The valid units, `buffer[offset..offset + len]`.
    pub fn as_slice(&self) -> &[u16] {
        &self.buffer[self.offset..self.offset + self.length]
    }

    /// Offset of the first valid unit.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of valid units.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the buffer holds no valid units.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Total number of units the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Set the number of valid units.
    ///
    /// Used by owners that fill the storage themselves.
    pub fn set_len(&mut self, length: usize) -> Result<()> {
        if self.offset + length > self.buffer.len() {
            return Err(DecompoundError::index_out_of_range(
                self.offset + length,
                self.buffer.len(),
            ));
        }
        self.length = length;
        Ok(())
    }

    /// The high surrogate carried over to the next fill, if any.
    pub fn carried_surrogate(&self) -> Option<u16> {
        self.trailing_high_surrogate
    }

    /// Reset offset, length and the carried surrogate.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.length = 0;
        self.trailing_high_surrogate = None;
    }
}

/// How UTF-16 units are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterMode {
    /// Every unit is one character; surrogate pairs are not recognised.
    Legacy,
    /// Surrogate pairs are decoded as one codepoint and kept together.
    #[default]
    Codepoint,
}

impl CharacterMode {
    /// Whether this mode recognises surrogate pairs.
    pub fn is_codepoint_aware(self) -> bool {
        self == CharacterMode::Codepoint
    }

    /// Returns the codepoint at `index`, using only units below `limit`.
    ///
    /// In codepoint mode a high surrogate at `index` followed by a low
    /// surrogate below `limit` yields the combined codepoint. Otherwise, and
    /// always in legacy mode, the unit itself is returned.
    pub fn code_point_at(self, chars: &[u16], index: usize, limit: usize) -> Result<u32> {
        if limit > chars.len() {
            return Err(DecompoundError::index_out_of_range(limit, chars.len()));
        }
        if index >= limit {
            return Err(DecompoundError::index_out_of_range(index, limit));
        }
        let unit = chars[index];
        if self == CharacterMode::Codepoint
            && is_high_surrogate(unit)
            && index + 1 < limit
            && is_low_surrogate(chars[index + 1])
        {
            return Ok(combine_surrogates(unit, chars[index + 1]));
        }
        Ok(unit as u32)
    }

    /// Returns the codepoint at `index` of a whole unit sequence.
    pub fn code_point_at_seq(self, chars: &[u16], index: usize) -> Result<u32> {
        self.code_point_at(chars, index, chars.len())
    }

    /// Number of codepoints in `chars`.
    ///
    /// Lone surrogates count as one codepoint each.
    pub fn code_point_count(self, chars: &[u16]) -> usize {
        match self {
            CharacterMode::Legacy => chars.len(),
            CharacterMode::Codepoint => char::decode_utf16(chars.iter().copied()).count(),
        }
    }

    /// The index within `buf[start..start + count]` that is `delta`
    /// codepoints away from `index`.
    ///
    /// Fails with [`DecompoundError::IndexOutOfRange`] when `index` is
    /// outside the range or the walk would leave it.
    pub fn offset_by_code_points(
        self,
        buf: &[u16],
        start: usize,
        count: usize,
        index: usize,
        delta: isize,
    ) -> Result<usize> {
        let end = start + count;
        if end > buf.len() {
            return Err(DecompoundError::index_out_of_range(end, buf.len()));
        }
        if index < start || index > end {
            return Err(DecompoundError::index_out_of_range(index, end));
        }

        match self {
            CharacterMode::Legacy => {
                let target = index as isize + delta;
                if target < start as isize || target > end as isize {
                    return Err(DecompoundError::index_out_of_range(
                        target.max(0) as usize,
                        end,
                    ));
                }
                Ok(target as usize)
            }
            CharacterMode::Codepoint => {
                let mut x = index;
                if delta >= 0 {
                    for _ in 0..delta {
                        if x >= end {
                            return Err(DecompoundError::index_out_of_range(x, end));
                        }
                        let step = if is_high_surrogate(buf[x])
                            && x + 1 < end
                            && is_low_surrogate(buf[x + 1])
                        {
                            2
                        } else {
                            1
                        };
                        x += step;
                    }
                } else {
                    for _ in 0..delta.unsigned_abs() {
                        if x <= start {
                            return Err(DecompoundError::index_out_of_range(x, end));
                        }
                        x -= 1;
                        if is_low_surrogate(buf[x]) && x > start && is_high_surrogate(buf[x - 1])
                        {
                            x -= 1;
                        }
                    }
                }
                Ok(x)
            }
        }
    }

    /// Decode `src` into codepoints appended to `dest`.
    ///
    /// Returns the number of codepoints written.
    pub fn to_code_points(self, src: &[u16], dest: &mut Vec<u32>) -> usize {
        let before = dest.len();
        let mut i = 0;
        while i < src.len() {
            // i < src.len() == limit, so this cannot fail
            let Ok(cp) = self.code_point_at(src, i, src.len()) else {
                break;
            };
            dest.push(cp);
            i += unit_count(cp);
        }
        dest.len() - before
    }

    /// Encode codepoints from `src` as UTF-16 units appended to `dest`.
    ///
    /// Returns the number of units written. Values above U+10FFFF fail with
    /// [`DecompoundError::InvalidArgument`].
    pub fn to_chars(self, src: &[u32], dest: &mut Vec<u16>) -> Result<usize> {
        let before = dest.len();
        let mut scratch = [0u16; 2];
        for &cp in src {
            if cp > MAX_CODE_POINT {
                return Err(DecompoundError::invalid_argument(format!(
                    "invalid codepoint U+{cp:X}"
                )));
            }
            let n = encode_at(cp, &mut scratch, 0);
            dest.extend_from_slice(&scratch[..n]);
        }
        Ok(dest.len() - before)
    }

    /// Lower-case `buffer[offset..limit]` in place, codepoint by codepoint.
    ///
    /// The unit count never changes: a codepoint whose lower-case form would
    /// need a different number of units is left as it is.
    pub fn to_lower_case(self, buffer: &mut [u16], offset: usize, limit: usize) -> Result<()> {
        self.map_case_in_place(buffer, offset, limit, false)
    }

    /// Upper-case `buffer[offset..limit]` in place, codepoint by codepoint.
    ///
    /// Same unit-count restriction as [`to_lower_case`](Self::to_lower_case).
    pub fn to_upper_case(self, buffer: &mut [u16], offset: usize, limit: usize) -> Result<()> {
        self.map_case_in_place(buffer, offset, limit, true)
    }

    fn map_case_in_place(
        self,
        buffer: &mut [u16],
        offset: usize,
        limit: usize,
        upper: bool,
    ) -> Result<()> {
        if limit > buffer.len() {
            return Err(DecompoundError::index_out_of_range(limit, buffer.len()));
        }
        let mut i = offset;
        while i < limit {
            let cp = self.code_point_at(buffer, i, limit)?;
            let width = unit_count(cp);
            let mapped = map_case(cp, upper);
            if unit_count(mapped) == width {
                encode_at(mapped, buffer, i);
            }
            i += width;
        }
        Ok(())
    }

    /// Fill `buffer` with up to `num_chars` units read from `source`.
    ///
    /// Each call starts filling at offset 0. In codepoint mode a high
    /// surrogate withheld by the previous call is installed first, and if
    /// the request is satisfied completely but ends in a high surrogate, that
    /// unit is withheld and carried to the next call. A pair is therefore
    /// never split across two fills, at the cost of sometimes exposing only
    /// `num_chars - 1` units.
    ///
    /// Returns `false` if and only if the source ran dry before the request
    /// was satisfied. The units read so far are still valid; check
    /// [`CharacterBuffer::len`].
    pub fn fill<S: CharSource + ?Sized>(
        self,
        buffer: &mut CharacterBuffer,
        source: &mut S,
        num_chars: usize,
    ) -> Result<bool> {
        match self {
            CharacterMode::Codepoint => {
                if num_chars < MIN_BUFFER_SIZE || num_chars > buffer.capacity() {
                    return Err(DecompoundError::invalid_argument(format!(
                        "num_chars must be >= {MIN_BUFFER_SIZE} and <= the buffer size ({}), got {num_chars}",
                        buffer.capacity()
                    )));
                }
                buffer.offset = 0;

                let start = match buffer.trailing_high_surrogate.take() {
                    Some(high) => {
                        buffer.buffer[0] = high;
                        1
                    }
                    None => 0,
                };

                let read = read_fully(source, &mut buffer.buffer[start..num_chars])?;
                buffer.length = start + read;
                let satisfied = buffer.length == num_chars;
                if !satisfied {
                    // Source exhausted: a trailing high surrogate stays in
                    // place, nothing can follow it.
                    return Ok(false);
                }

                if is_high_surrogate(buffer.buffer[buffer.length - 1]) {
                    buffer.length -= 1;
                    buffer.trailing_high_surrogate = Some(buffer.buffer[buffer.length]);
                }
                Ok(true)
            }
            CharacterMode::Legacy => {
                if num_chars < 1 || num_chars > buffer.capacity() {
                    return Err(DecompoundError::invalid_argument(format!(
                        "num_chars must be >= 1 and <= the buffer size ({}), got {num_chars}",
                        buffer.capacity()
                    )));
                }
                buffer.offset = 0;
                let read = read_fully(source, &mut buffer.buffer[..num_chars])?;
                buffer.length = read;
                buffer.trailing_high_surrogate = None;
                Ok(read == num_chars)
            }
        }
    }

    /// Fill the whole capacity of `buffer`.
    pub fn fill_buffer<S: CharSource + ?Sized>(
        self,
        buffer: &mut CharacterBuffer,
        source: &mut S,
    ) -> Result<bool> {
        let capacity = buffer.capacity();
        self.fill(buffer, source, capacity)
    }
}
