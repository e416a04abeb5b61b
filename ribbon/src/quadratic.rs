use arrayvec::ArrayVec;

/// Real roots of a quadratic, of which there are at most two
pub type QuadraticRoots = ArrayVec<f32, 2>;

/// Solves `a x² + b x + c = 0` over the reals.
///
/// Two distinct roots are returned as `(-b + √Δ) / 2a` then `(-b - √Δ) / 2a`;
/// complex roots are not reported. `a` must be non-zero.
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> QuadraticRoots {
    let det = b * b - 4.0 * a * c;
    let inv_2a = 1.0 / (2.0 * a);

    let mut out = QuadraticRoots::new();
    if det > 0.0 {
        let s = det.sqrt();
        out.push((-b + s) * inv_2a);
        out.push((-b - s) * inv_2a);
    } else if det == 0.0 {
        out.push(-b * inv_2a);
    }
    out
}
