use crate::VecF;
use log::trace;
use std::ops::{Add, Mul};

/// Denominators at or below this magnitude are treated as degenerate
pub const DENOMINATOR_EPSILON: f32 = 1e-4;

/// Replacement for degenerate denominators in [`basis_functions`].
///
/// This is an approximation near coincident knots rather than exact B-spline
/// semantics; changing it changes the curve shape around duplicate knots.
pub const DENOMINATOR_FALLBACK: f32 = 1e-5;

/// Finds the knot span containing `u`, i.e. `s` with `U[s] <= u <= U[s + 1]`.
///
/// Candidate spans are scanned from `P` to `N - P - 2`; if none matches,
/// the last one is returned.
///
/// Algorithm A2.1 (linear variant)
pub fn find_span<const P: usize>(U: &[f32], u: f32) -> usize {
    debug_assert!(U.len() >= 2 * P + 2);
    let last = U.len() - P - 2;

    for i in P..=last {
        if u >= U[i] && u <= U[i + 1] {
            return i;
        }
    }

    trace!("no span contains {}, falling back to span {}", u, last);
    last
}

/// Computes the `P + 1` non-vanishing basis functions at `u` in span `i`,
/// writing them into `N`.
///
/// Algorithm A2.2
pub fn basis_functions<const P: usize>(i: usize, U: &[f32], u: f32, N: &mut [f32]) {
    debug_assert!(N.len() > P);

    let mut left: VecF = smallvec::smallvec![0.0; P + 1];
    let mut right: VecF = smallvec::smallvec![0.0; P + 1];

    N[0] = 1.0;
    for j in 1..=P {
        left[j] = u - U[i + 1 - j];
        right[j] = U[i + j] - u;
        let mut saved = 0.0;
        for r in 0..j {
            let mut denom = right[r + 1] + left[j - r];
            if denom.abs() <= DENOMINATOR_EPSILON {
                denom = DENOMINATOR_FALLBACK;
            }
            let temp = N[r] / denom;
            N[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        N[j] = saved;
    }
}

/// Clamps `u` to the unit interval, then finds its span and basis functions
pub(crate) fn span_and_basis<const P: usize>(U: &[f32], u: f32) -> (usize, VecF) {
    let u = u.clamp(0.0, 1.0);
    let span = find_span::<P>(U, u);
    let mut N: VecF = smallvec::smallvec![0.0; P + 1];
    basis_functions::<P>(span, U, u, &mut N);
    (span, N)
}

/// The basis functions of a degree-`P` curve at a single parameter value.
///
/// This lets callers blend any per-control-point payload with the same weights
/// that [`evaluate_curve`](crate::evaluate_curve) would use for positions.
/// A `Basis` can only be produced by [`evaluate_basis`], and is only
/// meaningful for the knot vector it was evaluated against.
#[derive(Clone, Debug, PartialEq)]
pub struct Basis<const P: usize> {
    span: usize,
    N: VecF,
}

impl<const P: usize> Basis<P> {
    /// Number of control points with non-zero influence; always `P + 1`
    pub const fn num(&self) -> usize {
        P + 1
    }

    pub fn span(&self) -> usize {
        self.span
    }

    pub fn weight(&self, i: usize) -> f32 {
        self.N[i]
    }

    /// Global control point index for local index `i`
    pub fn index(&self, i: usize) -> usize {
        self.span - P + i
    }

    /// Iterates over `(control point index, weight)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        (0..=P).map(move |i| (self.index(i), self.N[i]))
    }

    /// Sums `f(index) * weight` over every influencing control point
    pub fn blend<T, F>(&self, mut f: F) -> T
    where
        T: Add<Output = T> + Mul<f32, Output = T>,
        F: FnMut(usize) -> T,
    {
        let mut out = f(self.index(0)) * self.N[0];
        for i in 1..=P {
            out = out + f(self.index(i)) * self.N[i];
        }
        out
    }

    /// Blends per-control-point `data` with these weights
    pub fn apply<T>(&self, data: &[T]) -> T
    where
        T: Copy + Add<Output = T> + Mul<f32, Output = T>,
    {
        self.blend(|i| data[i])
    }
}

/// Evaluates the basis functions of a degree-`P` curve at `u`, which is
/// clamped to `[0, 1]`.
pub fn evaluate_basis<const P: usize>(U: &[f32], u: f32) -> Basis<P> {
    let (span, N) = span_and_basis::<P>(U, u);
    Basis { span, N }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_closed_knots, make_open_clamped_knots};
    use approx::assert_relative_eq;

    fn open<const P: usize>(count: usize) -> Vec<f32> {
        let mut U = vec![0.0; count + P + 1];
        make_open_clamped_knots::<P>(&mut U);
        U
    }

    fn closed<const P: usize>(count: usize) -> Vec<f32> {
        let mut U = vec![0.0; count + P + 1];
        make_closed_knots::<P>(&mut U);
        U
    }

    fn alphas() -> impl Iterator<Item = f32> {
        (0..=100).map(|i| i as f32 / 100.0)
    }

    fn check_partition<const P: usize>(U: &[f32]) {
        for u in alphas() {
            let b = evaluate_basis::<P>(U, u);
            let sum: f32 = b.iter().map(|(_, w)| w).sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-4);
            assert!(b.iter().all(|(_, w)| w >= -1e-6));
        }
    }

    #[test]
    fn partition_of_unity() {
        check_partition::<1>(&open::<1>(4));
        check_partition::<2>(&open::<2>(5));
        check_partition::<3>(&open::<3>(9));
        check_partition::<4>(&open::<4>(6));
        check_partition::<2>(&closed::<2>(6));
        check_partition::<3>(&closed::<3>(6));
        check_partition::<3>(&closed::<3>(12));
    }

    #[test]
    fn span_contains_alpha() {
        for U in [open::<3>(8), closed::<3>(8)] {
            for u in alphas() {
                let s = find_span::<3>(&U, u);
                assert!((3..=U.len() - 5).contains(&s));
                assert!(U[s] <= u && u <= U[s + 1], "u = {u}, span = {s}");
            }
        }
    }

    #[test]
    fn span_falls_back_to_last() {
        let U = open::<2>(5);
        assert_eq!(find_span::<2>(&U, 1.0), 4);
        assert_eq!(find_span::<2>(&U, 1.5), 4);
        assert_eq!(find_span::<2>(&U, f32::NAN), 4);
    }

    #[test]
    fn cubic_uniform_weights() {
        // Uniform cubic B-spline at the middle of a segment: 1/48, 23/48, 23/48, 1/48
        let U = closed::<3>(6);
        let b = evaluate_basis::<3>(&U, 0.5);
        assert_eq!(b.span(), 4);
        assert_eq!(b.num(), 4);
        assert_relative_eq!(b.weight(0), 1.0 / 48.0, epsilon = 1e-5);
        assert_relative_eq!(b.weight(1), 23.0 / 48.0, epsilon = 1e-5);
        assert_relative_eq!(b.weight(2), 23.0 / 48.0, epsilon = 1e-5);
        assert_relative_eq!(b.weight(3), 1.0 / 48.0, epsilon = 1e-5);
        assert_eq!((0..4).map(|i| b.index(i)).collect::<Vec<_>>(), [1, 2, 3, 4]);
    }

    #[test]
    fn degenerate_denominator_is_substituted() {
        // Every knot coincides, so every denominator is zero
        let U = [0.5; 6];
        let mut N = [0.0; 3];
        basis_functions::<2>(2, &U, 0.5, &mut N);
        assert!(N.iter().all(|n| n.is_finite()));
        assert_eq!(N, [0.0, 0.0, 0.0]);
    }

    /// Degree-1 weights at the middle of a single span of the given width
    fn linear_weights(width: f32) -> [f32; 2] {
        let U = [0.0, 0.0, width, 1.0];
        let mut N = [0.0; 2];
        basis_functions::<1>(1, &U, width / 2.0, &mut N);
        N
    }

    #[test]
    fn narrow_span_thresholds() {
        assert_eq!(DENOMINATOR_EPSILON, 1e-4);
        assert_eq!(DENOMINATOR_FALLBACK, 1e-5);

        // Denominators in (1e-5, 1e-4] are replaced by 1e-5, so each weight
        // becomes its numerator times 1e5 instead of summing to 1
        let N = linear_weights(5e-5);
        assert_relative_eq!(N[0], 2.5, max_relative = 1e-4);
        assert_relative_eq!(N[1], 2.5, max_relative = 1e-4);

        let N = linear_weights(9e-5);
        assert_relative_eq!(N[0], 4.5, max_relative = 1e-4);
        assert_relative_eq!(N[1], 4.5, max_relative = 1e-4);

        // Just above the threshold the exact basis is kept
        let N = linear_weights(1.1e-4);
        assert_relative_eq!(N[0], 0.5, max_relative = 1e-4);
        assert_relative_eq!(N[1], 0.5, max_relative = 1e-4);
    }

    #[test]
    fn clamps_alpha() {
        let U = open::<2>(5);
        assert_eq!(evaluate_basis::<2>(&U, -3.0), evaluate_basis::<2>(&U, 0.0));
        assert_eq!(evaluate_basis::<2>(&U, 7.0), evaluate_basis::<2>(&U, 1.0));
    }

    #[test]
    fn blend_scalar_payload() {
        let U = open::<2>(5);
        let data = [10.0f32, 20.0, 30.0, 40.0, 50.0];
        let b = evaluate_basis::<2>(&U, 0.0);
        assert_relative_eq!(b.apply(&data), 10.0);
        let b = evaluate_basis::<2>(&U, 1.0);
        assert_relative_eq!(b.apply(&data), 50.0);
    }
}
