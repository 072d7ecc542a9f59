//! Core domain constants shared by every layer.

/// Largest Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Exclusive end of the code point domain. Every inversion list boundary is
/// at most this value.
pub const CODE_POINT_DOMAIN_END: u32 = MAX_CODE_POINT + 1;

/// First surrogate code point.
pub const SURROGATE_START: u32 = 0xD800;

/// Last surrogate code point.
pub const SURROGATE_END: u32 = 0xDFFF;

/// A half-open range `[start, end)` of code points.
pub type CodePointRange = (u32, u32);

/// True if `value` lies in the surrogate block.
///
/// Sets store surrogates like any other integer; this is for callers that
/// want to treat them specially.
#[inline]
pub fn is_surrogate(value: u32) -> bool {
    (SURROGATE_START..=SURROGATE_END).contains(&value)
}
