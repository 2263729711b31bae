//! CPU reference GEMM
//!
//! Computes the ground-truth D = alpha * op(A) * op(B) + beta * C on the
//! host, in mixed precision: operands are widened to compute precision (f32)
//! on read, the accumulation runs entirely in compute precision, and the
//! result is narrowed back to storage precision on write.
//!
//! Determinism: the k-summation runs in strictly increasing k order, so two
//! runs over identical inputs produce bit-identical output. Output elements
//! are independent of each other, so the (row, col) space is partitioned
//! across rayon workers with no shared mutable state; parallelism never
//! changes the per-element summation order.

use rayon::prelude::*;

use crate::layout::{GemmDims, Layout};
use crate::precision::Element;

/// Mixed-precision reference GEMM over strided storage.
///
/// `stride_*` are (stride1, stride2) pairs as produced by the layout
/// planner: element (i, j) of op(X) lives at `x[i * stride1 + j * stride2]`.
/// D is column-contiguous with leading dimension `ldd` (the output is never
/// transposed) and must hold `dims.n * ldd` elements.
pub fn gemm_mixed_precision<E: Element>(
    alpha: f32,
    beta: f32,
    dims: GemmDims,
    a: &[E],
    stride_a: (usize, usize),
    b: &[E],
    stride_b: (usize, usize),
    c: &[E],
    stride_c: (usize, usize),
    d: &mut [E],
    ldd: usize,
) {
    let GemmDims { m, n, k } = dims;
    let (sa1, sa2) = stride_a;
    let (sb1, sb2) = stride_b;
    let (sc1, sc2) = stride_c;

    debug_assert!(ldd >= m, "ldd {} shorter than output rows {}", ldd, m);
    debug_assert_eq!(d.len(), n * ldd, "output buffer size mismatch");

    // Each ldd-sized chunk is one output column; columns are disjoint, so
    // this is a data-parallel map over independent coordinates.
    d.par_chunks_mut(ldd)
        .take(n)
        .enumerate()
        .for_each(|(col, d_col)| {
            for row in 0..m {
                let mut sum = 0.0f32;
                for kk in 0..k {
                    let av = a[row * sa1 + kk * sa2].widen();
                    let bv = b[kk * sb1 + col * sb2].widen();
                    sum += av * bv;
                }
                let cv = c[row * sc1 + col * sc2].widen();
                d_col[row] = E::narrow(alpha * sum + beta * cv);
            }
        });
}

/// Compute the reference output for a planned layout.
///
/// Convenience wrapper used by the harness: strides come straight from the
/// plan, so the reference path reads through exactly the same arithmetic as
/// the device provider.
pub fn compute_gold<E: Element>(
    layout: &Layout,
    alpha: f32,
    beta: f32,
    a: &[E],
    b: &[E],
    c: &[E],
    d: &mut [E],
) {
    gemm_mixed_precision(
        alpha,
        beta,
        layout.dims,
        a,
        (layout.a.stride1, layout.a.stride2),
        b,
        (layout.b.stride1, layout.b.stride2),
        c,
        (layout.c.stride1, layout.c.stride2),
        d,
        layout.d.ld,
    );
}
