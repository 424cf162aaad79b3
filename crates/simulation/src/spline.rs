//! Uniform Catmull-Rom sampling for road curves.
//!
//! A draft stroke is a sparse polyline of ground points; the committed road
//! follows a smooth spline through all of them. Endpoints are clamped by
//! duplicating the first and last control points, so the curve interpolates
//! every input point including the ends.

use bevy::prelude::*;

/// Evaluate one uniform Catmull-Rom span at `t` in [0, 1].
///
/// `p1` and `p2` are the interpolated endpoints of the span; `p0` and `p3`
/// shape the tangents.
pub fn catmull_rom_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

/// Sample a Catmull-Rom spline through `points` at `subdiv` samples per
/// control span.
///
/// Returns `(points.len() - 1) * subdiv + 1` samples: the spline passes
/// through every control point and the final sample is exactly the last
/// input point. Fewer than two points are returned unchanged.
pub fn sample_catmull_rom(points: &[Vec2], subdiv: usize) -> Vec<Vec2> {
    if points.len() < 2 || subdiv == 0 {
        return points.to_vec();
    }

    let n = points.len();
    let mut out = Vec::with_capacity((n - 1) * subdiv + 1);

    for i in 0..n - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];

        for s in 0..subdiv {
            let t = s as f32 / subdiv as f32;
            out.push(catmull_rom_point(p0, p1, p2, p3, t));
        }
    }

    if let Some(&last) = points.last() {
        out.push(last);
    }
    out
}

/// Total length of a sampled polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| (w[1] - w[0]).length()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolates_control_points() {
        let pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(20.0, -3.0),
            Vec2::new(30.0, 0.0),
        ];
        let subdiv = 4;
        let samples = sample_catmull_rom(&pts, subdiv);
        assert_eq!(samples.len(), (pts.len() - 1) * subdiv + 1);

        // Every control point appears at a span boundary.
        for (i, &p) in pts.iter().enumerate() {
            let sample = samples[i * subdiv];
            assert!((sample - p).length() < 1e-4, "control {i}: {sample:?} vs {p:?}");
        }
    }

    #[test]
    fn test_two_points_is_a_straight_segment() {
        let pts = vec![Vec2::ZERO, Vec2::new(12.0, 0.0)];
        let samples = sample_catmull_rom(&pts, 8);
        // With clamped endpoints, the two-point spline degenerates to the
        // chord: all samples on the segment, monotone in x.
        for w in samples.windows(2) {
            assert!(w[1].x >= w[0].x);
            assert!(w[0].y.abs() < 1e-4);
        }
        assert!((polyline_length(&samples) - 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_inputs_pass_through() {
        assert!(sample_catmull_rom(&[], 4).is_empty());
        let single = vec![Vec2::new(3.0, 4.0)];
        assert_eq!(sample_catmull_rom(&single, 4), single);
    }

    #[test]
    fn test_curve_length_exceeds_chord_for_a_bend() {
        let pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 0.0),
        ];
        let samples = sample_catmull_rom(&pts, 16);
        let chord = (pts[2] - pts[0]).length();
        assert!(polyline_length(&samples) > chord);
    }

    #[test]
    fn test_higher_subdiv_refines_the_same_curve() {
        let pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(8.0, 6.0),
            Vec2::new(16.0, -2.0),
            Vec2::new(25.0, 4.0),
        ];
        let coarse = polyline_length(&sample_catmull_rom(&pts, 4));
        let fine = polyline_length(&sample_catmull_rom(&pts, 16));
        // Finer sampling can only lengthen the measured polyline, and not by
        // much once the curve is resolved.
        assert!(fine >= coarse - 1e-3);
        assert!((fine - coarse) / coarse < 0.05);
    }
}
