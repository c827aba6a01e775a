//! Easing curves
//!
//! Map linear time `t` in `0.0..=1.0` to an eased fraction.

/// Easing function applied to a tween's time fraction
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Fast start, slow finish: `1 - (1 - t)^(2f)`
    Decelerate(f32),
}

impl Easing {
    /// The standard decelerating curve (`factor = 1`)
    pub const fn decelerate() -> Self {
        Easing::Decelerate(1.0)
    }

    /// Apply the curve; `t` is clamped to `0.0..=1.0`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::Decelerate(factor) => {
                let inv = 1.0 - t;
                if factor == 1.0 {
                    1.0 - inv * inv
                } else {
                    1.0 - inv.powf(2.0 * factor)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 3] = [
        Easing::Linear,
        Easing::Decelerate(1.0),
        Easing::Decelerate(1.5),
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_decelerate_runs_ahead_of_linear() {
        let easing = Easing::decelerate();
        assert!((easing.apply(0.5) - 0.75).abs() < 1e-6);
        assert!(easing.apply(0.25) > 0.25);
    }

    #[test]
    fn test_decelerate_factor_sharpens_curve() {
        // 1 - 0.5^3
        assert!((Easing::Decelerate(1.5).apply(0.5) - 0.875).abs() < 1e-6);
        assert!(Easing::Decelerate(1.5).apply(0.5) > Easing::decelerate().apply(0.5));
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::decelerate().apply(2.0), 1.0);
    }
}
