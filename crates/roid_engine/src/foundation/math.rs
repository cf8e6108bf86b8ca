//! Math utilities and types
//!
//! Provides the 2D vector type used for positions and velocities.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Unit vector pointing along `angle` (radians, counter-clockwise from +X)
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Squared distance between two points
///
/// Overlap tests compare this against a squared radius sum so no square root
/// is needed.
pub fn distance_squared(a: &Vec2, b: &Vec2) -> f32 {
    (b - a).norm_squared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_heading_is_unit_length() {
        for angle in [0.0_f32, 0.5, 1.7, -2.3, 6.0] {
            assert_relative_eq!(heading(angle).norm(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_heading_quarter_turn() {
        let up = heading(std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(up.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(up.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_distance_squared() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert_relative_eq!(distance_squared(&a, &b), 25.0);
        assert_relative_eq!(distance_squared(&b, &a), 25.0);
    }
}
