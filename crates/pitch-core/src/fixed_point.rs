//! Fixed-point primitives shared by the autocorrelation and decimation paths
//!
//! All additions that may leave their type's range clamp to the extremes
//! instead of wrapping. Normalization helpers follow the usual signal
//! processing library conventions: they report how far a value can be
//! shifted left before it loses its sign or top bit.

/// Saturating 16-bit addition
#[inline]
pub fn add_sat_w16(a: i16, b: i16) -> i16 {
    sat_w32_to_w16(i32::from(a) + i32::from(b))
}

/// Saturating 32-bit addition
#[inline]
pub fn add_sat_w32(a: i32, b: i32) -> i32 {
    a.saturating_add(b)
}

/// Clamp a 32-bit value into the 16-bit range
#[inline]
pub fn sat_w32_to_w16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Left shifts needed to normalize an unsigned value (0 for zero)
#[inline]
pub fn norm_u32(value: u32) -> u32 {
    if value == 0 {
        0
    } else {
        value.leading_zeros()
    }
}

/// Left shifts needed to normalize a signed value without changing its sign
/// (0 for zero)
#[inline]
pub fn norm_w32(value: i32) -> u32 {
    if value == 0 {
        return 0;
    }
    let magnitude = if value < 0 { !value } else { value };
    // `!i32::MIN` is `i32::MAX`, `!-1` is 0 and yields 31.
    (magnitude as u32).leading_zeros() - 1
}
