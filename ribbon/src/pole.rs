use nalgebra_glm::{self as glm, Quat, Vec3};

/// Below this squared distance, the mid joint is considered to lie on the
/// root-tip line.
const STRAIGHT_CHAIN_EPSILON: f32 = 1e-3;

/// Places a pole vector target for a root / mid / tip chain.
///
/// The pole sits `distance` beyond the mid joint, along the direction in which
/// the chain bends. When the chain is straight there is no bend direction, so
/// the pole is placed at `rotation * pole_dir * distance` from the midpoint of
/// root and tip; that reference direction also picks the side of the bend.
pub fn pole_vector(
    root: &Vec3,
    mid: &Vec3,
    tip: &Vec3,
    rotation: &Quat,
    pole_dir: &Vec3,
    distance: f32,
) -> Vec3 {
    let reference = glm::quat_rotate_vec3(rotation, pole_dir) * distance;
    let mid_t = (tip + root) * 0.5;

    if glm::length2(&(mid - mid_t)) <= STRAIGHT_CHAIN_EPSILON {
        return mid_t + reference;
    }

    let axis = glm::normalize(&(mid_t - root));
    let center = root + axis * glm::dot(&(mid - root), &axis);

    let mut pole = mid - center;
    if glm::dot(&pole, &reference) < 0.0 {
        pole = -pole;
    }
    center + pole + glm::normalize(&pole) * distance
}
