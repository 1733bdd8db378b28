//! SSE2 kernel (x86_64)
//!
//! Eight 16-bit products per step. `mullo`/`mulhi` give the low and high
//! halves of each product, interleaving them rebuilds the exact 32-bit
//! products, which are then sign-extended into two 64-bit lanes.

use std::arch::x86_64::*;

const STEP: usize = 8;

/// Exact inner product of two equally long sample slices.
///
/// # Safety
/// Caller must ensure SSE2 is available.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn dot(a: &[i16], b: &[i16]) -> i64 {
    debug_assert_eq!(a.len(), b.len());

    let len = a.len().min(b.len());
    let chunks = len / STEP;

    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut acc = _mm_setzero_si128();

    for i in 0..chunks {
        let offset = i * STEP;
        unsafe {
            let va = _mm_loadu_si128(a_ptr.add(offset) as *const __m128i);
            let vb = _mm_loadu_si128(b_ptr.add(offset) as *const __m128i);
            let lo = _mm_mullo_epi16(va, vb);
            let hi = _mm_mulhi_epi16(va, vb);
            acc = accumulate_i32x4(acc, _mm_unpacklo_epi16(lo, hi));
            acc = accumulate_i32x4(acc, _mm_unpackhi_epi16(lo, hi));
        }
    }

    let mut lanes = [0i64; 2];
    unsafe {
        _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, acc);
    }

    let mut total = lanes[0] + lanes[1];
    for i in chunks * STEP..len {
        total += i64::from(a[i]) * i64::from(b[i]);
    }

    total
}

/// Sign-extend four 32-bit products and add them into two 64-bit lanes.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn accumulate_i32x4(acc: __m128i, products: __m128i) -> __m128i {
    let sign = _mm_srai_epi32(products, 31);
    let low = _mm_unpacklo_epi32(products, sign);
    let high = _mm_unpackhi_epi32(products, sign);
    _mm_add_epi64(_mm_add_epi64(acc, low), high)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(a: &[i16], b: &[i16]) -> i64 {
        a.iter().zip(b).map(|(&x, &y)| i64::from(x) * i64::from(y)).sum()
    }

    #[test]
    fn test_matches_scalar() {
        let a: Vec<i16> = (0..37).map(|i| (i * 1733 % 65536 - 32768) as i16).collect();
        let b: Vec<i16> = (0..37).map(|i| (i * 9011 % 65536 - 32768) as i16).collect();
        // SAFETY: SSE2 is part of the x86_64 baseline.
        let got = unsafe { dot(&a, &b) };
        assert_eq!(got, scalar(&a, &b));
    }

    #[test]
    fn test_most_negative_squares() {
        let a = [i16::MIN; 24];
        // SAFETY: SSE2 is part of the x86_64 baseline.
        let got = unsafe { dot(&a, &a) };
        assert_eq!(got, 24 * (1i64 << 30));
    }
}
