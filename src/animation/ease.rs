/// Easing functions used to map normalized transition progress.
///
/// The CSS-named curves (`ease`, `ease-in`, ...) use the cubic-bezier control points of the CSS
/// timing functions; the polynomial curves are kept for authored configs that name them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// CSS `ease`, `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    #[default]
    Ease,
    /// CSS `ease-in`, `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// CSS `ease-out`, `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// CSS `ease-in-out`, `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
}

impl Ease {
    /// Every supported curve, in declaration order.
    pub const ALL: [Ease; 11] = [
        Self::Linear,
        Self::Ease,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
    ];

    /// Look up a curve by its authored name.
    ///
    /// Accepts kebab-case, snake_case and camelCase spellings (`ease-in-out`, `ease_in_out`,
    /// `easeInOut`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if !name.chars().any(|c| c.is_ascii_lowercase()) {
            let lower = name.to_ascii_lowercase().replace('_', "-");
            return Self::ALL.into_iter().find(|e| e.name() == lower);
        }
        let mut canon = String::with_capacity(name.len() + 4);
        for (i, ch) in name.chars().enumerate() {
            if ch == '_' {
                canon.push('-');
            } else if ch.is_ascii_uppercase() {
                if i > 0 {
                    canon.push('-');
                }
                canon.push(ch.to_ascii_lowercase());
            } else {
                canon.push(ch);
            }
        }
        Self::ALL.into_iter().find(|e| e.name() == canon)
    }

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::InQuad => "in-quad",
            Self::OutQuad => "out-quad",
            Self::InOutQuad => "in-out-quad",
            Self::InCubic => "in-cubic",
            Self::OutCubic => "out-cubic",
            Self::InOutCubic => "in-out-cubic",
        }
    }

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    ///
    /// The endpoints are exact: `apply(0) == 0` and `apply(1) == 1` for every curve.
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::Ease => CubicBezier::new(0.25, 0.1, 0.25, 1.0).solve(t),
            Self::EaseIn => CubicBezier::new(0.42, 0.0, 1.0, 1.0).solve(t),
            Self::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0).solve(t),
            Self::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0).solve(t),
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// Unit cubic bezier through `(0,0)` and `(1,1)` with two inner control points.
#[derive(Clone, Copy, Debug)]
struct CubicBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl CubicBezier {
    const EPSILON: f64 = 1e-9;

    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    fn sample_x(&self, s: f64) -> f64 {
        ((self.ax * s + self.bx) * s + self.cx) * s
    }

    fn sample_y(&self, s: f64) -> f64 {
        ((self.ay * s + self.by) * s + self.cy) * s
    }

    fn sample_dx(&self, s: f64) -> f64 {
        (3.0 * self.ax * s + 2.0 * self.bx) * s + self.cx
    }

    /// Find the curve parameter whose x equals `x`, then return its y.
    fn solve(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..8 {
            let err = self.sample_x(s) - x;
            if err.abs() < Self::EPSILON {
                return self.sample_y(s).clamp(0.0, 1.0);
            }
            let d = self.sample_dx(s);
            if d.abs() < 1e-6 {
                break;
            }
            s -= err / d;
        }

        // Newton stalled; x(s) is monotonic on [0, 1] so bisection always converges.
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        s = x;
        for _ in 0..64 {
            let v = self.sample_x(s);
            if (v - x).abs() < Self::EPSILON {
                break;
            }
            if v < x {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        self.sample_y(s).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
