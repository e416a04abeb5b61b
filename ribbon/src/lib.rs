#![allow(clippy::needless_range_loop)]
// The basis evaluation follows the Cox-de Boor formulation from the NURBS
// book, which uses single-character names everywhere; we match its convention.
#![allow(non_snake_case)]

mod abstract_curve;
mod basis;
mod curve;
mod error;
mod knot_vector;
mod pole;
mod quadratic;
mod rig;

use smallvec::SmallVec;
type VecF = SmallVec<[f32; 8]>;

pub use crate::abstract_curve::AbstractCurve;
pub use crate::basis::{
    basis_functions, evaluate_basis, find_span, Basis, DENOMINATOR_EPSILON,
    DENOMINATOR_FALLBACK,
};
pub use crate::curve::{evaluate_curve, SplineCurve};
pub use crate::error::TopologyError;
pub use crate::knot_vector::{make_closed_knots, make_open_clamped_knots, KnotLayout, KnotVector};
pub use crate::pole::pole_vector;
pub use crate::quadratic::{solve_quadratic, QuadraticRoots};
pub use crate::rig::{rest_offsets, translation, RigBone, SplineRig};
