//! Portable grouped kernel
//!
//! Samples are taken in fixed groups of [`LANES`]; each position in the group
//! owns an independent 64-bit accumulator. The lanes are reduced once at the
//! end and a scalar loop covers the tail. The compiler vectorizes the inner
//! loop on every target, so this is the fallback when no intrinsic kernel is
//! available.

/// Samples per group
pub const LANES: usize = 8;

/// Exact inner product of two equally long sample slices
pub(crate) fn dot(a: &[i16], b: &[i16]) -> i64 {
    debug_assert_eq!(a.len(), b.len());

    let a_groups = a.chunks_exact(LANES);
    let b_groups = b.chunks_exact(LANES);

    let tail: i64 = a_groups
        .remainder()
        .iter()
        .zip(b_groups.remainder())
        .map(|(&x, &y)| i64::from(x) * i64::from(y))
        .sum();

    let mut lanes = [0i64; LANES];
    for (ga, gb) in a_groups.zip(b_groups) {
        for lane in 0..LANES {
            // 16x16 products always fit in 32 bits
            lanes[lane] += i64::from(i32::from(ga[lane]) * i32::from(gb[lane]));
        }
    }

    lanes.iter().sum::<i64>() + tail
}
