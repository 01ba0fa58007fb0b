/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` by `t`, where `t == 0` yields `a` and `t == 1` yields `b`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        if t >= 1.0 {
            return *b;
        }
        a + (b - a) * t
    }
}
