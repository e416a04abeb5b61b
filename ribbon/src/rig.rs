use crate::{evaluate_basis, KnotLayout, KnotVector, TopologyError};
use log::{debug, warn};
use nalgebra_glm::{self as glm, Mat4, Vec3};

/// Anything in a rig chain with a current location
pub trait RigBone {
    fn location(&self) -> Vec3;
}

impl RigBone for Vec3 {
    fn location(&self) -> Vec3 {
        *self
    }
}

impl RigBone for Mat4 {
    fn location(&self) -> Vec3 {
        translation(self)
    }
}

/// Extracts the translation column of an affine transform
pub fn translation(m: &Mat4) -> Vec3 {
    glm::vec3(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

/// Computes, for each bone, the offset from its projection onto the curve
/// to its current location.
///
/// Bones are parametrized uniformly, so bone `i` of `M` sits at
/// `i / (M - 1)`. The curve is driven by the translations of `controls`.
/// Chains with fewer than two bones can't be parametrized; in that case
/// nothing is written to `out`.
pub fn rest_offsets<const P: usize, B: RigBone>(
    bones: &[B],
    U: &[f32],
    controls: &[Mat4],
    out: &mut [Vec3],
) {
    if bones.len() <= 1 {
        return;
    }
    debug_assert_eq!(bones.len(), out.len());

    let step = 1.0 / (bones.len() - 1) as f32;
    for (i, (bone, o)) in bones.iter().zip(out.iter_mut()).enumerate() {
        let basis = evaluate_basis::<P>(U, i as f32 * step);
        let projected = basis.blend(|j| translation(&controls[j]));
        *o = bone.location() - projected;
    }
}

/// A spline rig of degree `P`, which owns the knot vector for its current
/// control count and rebuilds it when the topology changes.
#[derive(Clone, Debug)]
pub struct SplineRig<const P: usize> {
    knots: KnotVector,
}

impl<const P: usize> SplineRig<P> {
    pub fn new(layout: KnotLayout, control_count: usize) -> Result<Self, TopologyError> {
        Ok(Self {
            knots: KnotVector::new::<P>(layout, control_count)?,
        })
    }

    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }

    pub fn control_count(&self) -> usize {
        self.knots.control_count()
    }

    /// Rebuilds the knot vector if `count` differs from the current control
    /// count. On error, the rig is left unchanged.
    pub fn set_control_count(&mut self, count: usize) -> Result<(), TopologyError> {
        if count != self.control_count() {
            debug!(
                "rebuilding knots: {} -> {} control points",
                self.control_count(),
                count
            );
            self.knots = KnotVector::new::<P>(self.knots.layout(), count)?;
        }
        Ok(())
    }

    /// Checked version of [`rest_offsets`] using this rig's knot vector
    pub fn rest_offsets<B: RigBone>(
        &self,
        bones: &[B],
        controls: &[Mat4],
        out: &mut [Vec3],
    ) -> Result<(), TopologyError> {
        if controls.len() != self.control_count() {
            warn!(
                "rig expects {} controls, got {}",
                self.control_count(),
                controls.len()
            );
            return Err(TopologyError::ControlCountMismatch {
                expected: self.control_count(),
                actual: controls.len(),
            });
        }
        if out.len() != bones.len() {
            warn!(
                "offset buffer of length {} for {} bones",
                out.len(),
                bones.len()
            );
            return Err(TopologyError::OutputLengthMismatch {
                expected: bones.len(),
                actual: out.len(),
            });
        }
        rest_offsets::<P, B>(bones, &self.knots, controls, out);
        Ok(())
    }
}
