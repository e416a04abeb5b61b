use nalgebra_glm::Vec3;

pub trait AbstractCurve {
    /// Evaluates the curve at `u`, which is clamped to `[0, 1]`
    fn point(&self, u: f32) -> Vec3;

    /// Evaluates the curve at `n` uniformly spaced parameters, including both
    /// ends of the unit interval.
    fn sample(&self, n: usize) -> Vec<Vec3> {
        match n {
            0 => vec![],
            1 => vec![self.point(0.0)],
            _ => {
                let step = 1.0 / (n - 1) as f32;
                (0..n).map(|i| self.point(i as f32 * step)).collect()
            }
        }
    }
}
