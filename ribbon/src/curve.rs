use crate::{
    abstract_curve::AbstractCurve,
    basis::{evaluate_basis, span_and_basis, Basis},
    KnotLayout, KnotVector, TopologyError,
};
use nalgebra_glm::Vec3;

/// Computes the point at `u` on the degree-`P` B-spline with control points
/// `Pw` and knot vector `U`.
///
/// `u` is clamped to `[0, 1]`. The control point count must match the knot
/// vector (`Pw.len() + P + 1 == U.len()`); this is only checked in debug
/// builds, and a mismatch may panic on an out-of-bounds index.
///
/// Algorithm A3.1
pub fn evaluate_curve<const P: usize>(Pw: &[Vec3], U: &[f32], u: f32) -> Vec3 {
    debug_assert_eq!(Pw.len() + P + 1, U.len());
    let (span, N) = span_and_basis::<P>(U, u);

    let mut C = Pw[span - P] * N[0];
    for i in 1..=P {
        C += Pw[span - P + i] * N[i];
    }
    C
}

/// A uniform B-spline curve of degree `P` which owns its control points
#[derive(Clone, Debug)]
pub struct SplineCurve<const P: usize> {
    control_points: Vec<Vec3>,
    knots: KnotVector,
}

impl<const P: usize> SplineCurve<P> {
    pub fn new(layout: KnotLayout, control_points: Vec<Vec3>) -> Result<Self, TopologyError> {
        let knots = KnotVector::new::<P>(layout, control_points.len())?;
        Ok(Self {
            control_points,
            knots,
        })
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }

    /// Returns the basis at `u`, for blending data attached to control points
    pub fn basis(&self, u: f32) -> Basis<P> {
        evaluate_basis::<P>(&self.knots, u)
    }
}

impl<const P: usize> AbstractCurve for SplineCurve<P> {
    fn point(&self, u: f32) -> Vec3 {
        evaluate_curve::<P>(&self.control_points, &self.knots, u)
    }
}
