//! NEON kernel (aarch64)
//!
//! `vmull_s16` widens eight products per step to 32 bits and `vpadalq_s32`
//! folds them pairwise into two 64-bit accumulators.

use std::arch::aarch64::*;

const STEP: usize = 8;

/// Exact inner product of two equally long sample slices.
///
/// # Safety
/// Caller must ensure NEON is available.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn dot(a: &[i16], b: &[i16]) -> i64 {
    debug_assert_eq!(a.len(), b.len());

    let len = a.len().min(b.len());
    let chunks = len / STEP;

    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut acc = vdupq_n_s64(0);

    for i in 0..chunks {
        let offset = i * STEP;
        unsafe {
            let va = vld1q_s16(a_ptr.add(offset));
            let vb = vld1q_s16(b_ptr.add(offset));
            acc = vpadalq_s32(acc, vmull_s16(vget_low_s16(va), vget_low_s16(vb)));
            acc = vpadalq_s32(acc, vmull_high_s16(va, vb));
        }
    }

    let mut total = vaddvq_s64(acc);
    for i in chunks * STEP..len {
        total += i64::from(a[i]) * i64::from(b[i]);
    }

    total
}
