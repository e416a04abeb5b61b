use crate::TopologyError;
use log::{debug, warn};
use smallvec::SmallVec;

/// Shape of a uniform knot vector
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KnotLayout {
    /// `P + 1` knots pinned at each end, so the curve passes through its
    /// first and last control points.
    OpenClamped,
    /// Uniform spacing that continues past 0 and 1, so no control point is
    /// interpolated and the ends can be stitched into a loop.
    Closed,
}

/// Number of uniform intervals between `knots[P]` and `knots[N - P - 1]`
fn interval_count<const P: usize>(n: usize) -> usize {
    debug_assert!(
        n >= 2 * P + 2,
        "knot vector of length {} is too short for degree {}",
        n,
        P
    );
    n - 2 * P - 1
}

/// Fills `U` with an open-clamped knot vector for degree `P`.
///
/// The first and last `P` knots are 0 and 1 respectively; the knots from
/// `P` to `N - P - 1` are spaced uniformly from exactly 0 to exactly 1.
pub fn make_open_clamped_knots<const P: usize>(U: &mut [f32]) {
    let n = U.len();
    let D = interval_count::<P>(n) as f32;
    let end = n - P;

    for i in 0..P {
        U[i] = 0.0;
    }
    for i in P..end {
        U[i] = (i - P) as f32 / D;
    }
    for i in end..n {
        U[i] = 1.0;
    }
}

/// Fills `U` with a closed knot vector for degree `P`.
///
/// Every knot sits on the same uniform grid, with `U[P] == 0` and
/// `U[N - P - 1] == 1`; the first `P` knots are negative and the last `P`
/// exceed 1.
pub fn make_closed_knots<const P: usize>(U: &mut [f32]) {
    let n = U.len();
    let D = interval_count::<P>(n) as f32;

    for i in 0..P {
        U[i] = -((P - i) as f32 / D);
    }
    for i in P..n {
        U[i] = (i - P) as f32 / D;
    }
}

pub(crate) fn check_control_count<const P: usize>(count: usize) -> Result<(), TopologyError> {
    if count < P + 1 {
        warn!("rejecting topology: degree {} with {} control points", P, count);
        return Err(TopologyError::TooFewControlPoints { degree: P, count });
    }
    Ok(())
}

/// An owned knot vector, sized for a particular degree and control count.
///
/// Knots are stored inline for typical rig sizes and only spill to the heap
/// for long chains.
#[derive(Clone, Debug, PartialEq)]
pub struct KnotVector {
    layout: KnotLayout,
    degree: usize,
    knots: SmallVec<[f32; 16]>,
}

impl KnotVector {
    pub fn new<const P: usize>(
        layout: KnotLayout,
        control_count: usize,
    ) -> Result<Self, TopologyError> {
        check_control_count::<P>(control_count)?;

        let mut knots: SmallVec<[f32; 16]> = smallvec::smallvec![0.0; control_count + P + 1];
        match layout {
            KnotLayout::OpenClamped => make_open_clamped_knots::<P>(&mut knots),
            KnotLayout::Closed => make_closed_knots::<P>(&mut knots),
        }
        debug!(
            "built {:?} knot vector for degree {}, {} control points: {:?}",
            layout,
            P,
            control_count,
            knots.as_slice()
        );

        Ok(Self {
            layout,
            degree: P,
            knots,
        })
    }

    pub fn layout(&self) -> KnotLayout {
        self.layout
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of control points this knot vector was built for
    pub fn control_count(&self) -> usize {
        self.knots.len() - self.degree - 1
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.knots
    }
}

impl std::ops::Deref for KnotVector {
    type Target = [f32];
    fn deref(&self) -> &[f32] {
        &self.knots
    }
}
