//! Shape recognition for hand-drawn strokes.
//!
//! Classifies a stroke's point sequence into an idealized primitive. The
//! classifiers run in a fixed priority order (circle, line, arrow, polygon)
//! and the first match wins; returning no match is a normal outcome, not an
//! error.

pub mod geometry;

use crate::config::RecognitionConfig;
use crate::draw::{PolygonKind, ShapeDescriptor};
use geometry::{
    convex_hull, distance, fit_line, mean, mean_residual, mean_step, ring_perimeter,
    simplify_ring, std_dev,
};
use log::debug;

/// Stateless classifier over point sequences.
///
/// Holds only the configured thresholds; `recognize` is a pure function of
/// its input and those thresholds.
#[derive(Debug, Clone)]
pub struct ShapeRecognizer {
    config: RecognitionConfig,
}

impl ShapeRecognizer {
    /// Creates a recognizer with the given thresholds.
    pub fn new(config: RecognitionConfig) -> Self {
        Self { config }
    }

    /// Minimum number of points a stroke needs before classification is
    /// attempted.
    pub fn min_points(&self) -> usize {
        self.config.min_points
    }

    /// Classifies a point sequence.
    ///
    /// Classifiers run in priority order; the circle test runs before the
    /// line test because a small circle fits a straight line within the
    /// line threshold and would otherwise never be reachable.
    ///
    /// # Returns
    /// - `Some(descriptor)` for the first classifier that accepts
    /// - `None` when the sequence is too short or nothing matches
    pub fn recognize(&self, points: &[(i32, i32)]) -> Option<ShapeDescriptor> {
        if points.len() < self.config.min_points {
            debug!(
                "Not enough points for recognition: {} < {}",
                points.len(),
                self.config.min_points
            );
            return None;
        }

        let result = self
            .try_circle(points)
            .or_else(|| self.try_line(points))
            .or_else(|| self.try_arrow(points))
            .or_else(|| self.try_polygon(points));

        match &result {
            Some(descriptor) => debug!("Recognized {} from {} points", descriptor.name(), points.len()),
            None => debug!("No shape match for {} points", points.len()),
        }
        result
    }

    /// Circle: the path must close on itself and keep a near-constant
    /// distance to its centroid.
    fn try_circle(&self, points: &[(i32, i32)]) -> Option<ShapeDescriptor> {
        let step = mean_step(points);
        if step <= 0.0 {
            return None;
        }
        let gap = distance(points[0], points[points.len() - 1]);
        if gap > 5.0 * step {
            return None;
        }

        let xs: Vec<f64> = points.iter().map(|p| p.0 as f64).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.1 as f64).collect();
        let cx = mean(&xs);
        let cy = mean(&ys);

        let radii: Vec<f64> = points
            .iter()
            .map(|&(x, y)| {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                (dx * dx + dy * dy).sqrt()
            })
            .collect();
        let mean_radius = mean(&radii);
        if mean_radius <= 0.0 {
            return None;
        }
        if std_dev(&radii) >= mean_radius * self.config.circle_std_threshold {
            return None;
        }

        Some(ShapeDescriptor::Circle {
            center: (cx.round() as i32, cy.round() as i32),
            radius: mean_radius.round() as i32,
        })
    }

    /// Line: a least-squares fit with small mean absolute residual.
    fn try_line(&self, points: &[(i32, i32)]) -> Option<ShapeDescriptor> {
        let fit = fit_line(points);
        if mean_residual(points, &fit) >= self.config.line_error_threshold {
            return None;
        }
        Some(ShapeDescriptor::Line {
            start: points[0],
            end: points[points.len() - 1],
        })
    }

    /// Arrow: a mostly straight path whose first or last third bends
    /// markedly more than the other. The bent third is the head region.
    fn try_arrow(&self, points: &[(i32, i32)]) -> Option<ShapeDescriptor> {
        if points.len() < self.config.arrow_min_points {
            return None;
        }

        let global_fit = fit_line(points);
        if mean_residual(points, &global_fit) > self.config.arrow_curve_ceiling {
            return None;
        }

        let third = points.len() / 3;
        let first = &points[..third];
        let last = &points[points.len() - third..];

        let first_residual = local_residual(first);
        let last_residual = local_residual(last);

        let ratio = self.config.arrow_residual_ratio;
        let floor = self.config.arrow_residual_floor;

        if first_residual > last_residual * ratio && first_residual > floor {
            Some(ShapeDescriptor::Arrow {
                tail: points[points.len() - 1],
                head: points[0],
            })
        } else if last_residual > first_residual * ratio && last_residual > floor {
            Some(ShapeDescriptor::Arrow {
                tail: points[0],
                head: points[points.len() - 1],
            })
        } else {
            // Comparably straight ends: no head side to pick
            None
        }
    }

    /// Polygon: convex hull simplified down to a small vertex count.
    fn try_polygon(&self, points: &[(i32, i32)]) -> Option<ShapeDescriptor> {
        let hull = convex_hull(points);
        if hull.len() < 3 {
            return None;
        }

        let epsilon = self.config.polygon_epsilon * ring_perimeter(&hull);
        let vertices = simplify_ring(&hull, epsilon);

        match vertices.len() {
            3 => Some(ShapeDescriptor::Polygon {
                kind: PolygonKind::Triangle,
                vertices,
            }),
            4 => {
                let mut sides: Vec<f64> =
                    vertices.windows(2).map(|w| distance(w[0], w[1])).collect();
                sides.push(distance(vertices[3], vertices[0]));
                let kind = if std_dev(&sides) < mean(&sides) * self.config.square_side_variance {
                    PolygonKind::Square
                } else {
                    PolygonKind::Rectangle
                };
                Some(ShapeDescriptor::Polygon { kind, vertices })
            }
            _ => None,
        }
    }
}

/// Mean residual of a segment against its own local line fit.
fn local_residual(points: &[(i32, i32)]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    mean_residual(points, &fit_line(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn recognizer() -> ShapeRecognizer {
        ShapeRecognizer::new(RecognitionConfig::default())
    }

    fn circle_points(cx: f64, cy: f64, radius: f64, count: usize) -> Vec<(i32, i32)> {
        (0..count)
            .map(|k| {
                let theta = 2.0 * PI * k as f64 / count as f64;
                (
                    (cx + radius * theta.cos()).round() as i32,
                    (cy + radius * theta.sin()).round() as i32,
                )
            })
            .collect()
    }

    #[test]
    fn too_few_points_is_not_an_error_just_none() {
        let points = vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)];
        assert_eq!(recognizer().recognize(&points), None);
    }

    #[test]
    fn clean_circle_is_recognized() {
        let points = circle_points(100.0, 100.0, 50.0, 40);
        match recognizer().recognize(&points) {
            Some(ShapeDescriptor::Circle { center, radius }) => {
                assert!((center.0 - 100).abs() <= 1);
                assert!((center.1 - 100).abs() <= 1);
                assert!((radius - 50).abs() <= 1);
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn wobbly_circle_is_still_a_circle() {
        // Radial wobble well inside the stddev threshold
        let points: Vec<(i32, i32)> = (0..40)
            .map(|k| {
                let theta = 2.0 * PI * k as f64 / 40.0;
                let r = 50.0 + 8.0 * (7.0 * theta).sin();
                (
                    (100.0 + r * theta.cos()).round() as i32,
                    (100.0 + r * theta.sin()).round() as i32,
                )
            })
            .collect();
        match recognizer().recognize(&points) {
            Some(ShapeDescriptor::Circle { center, radius }) => {
                assert!((center.0 - 100).abs() <= 2);
                assert!((center.1 - 100).abs() <= 2);
                assert!((radius - 50).abs() <= 3);
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn small_circle_is_not_mistaken_for_a_line() {
        // A radius-20 circle has a mean line residual under the line
        // threshold, so this only passes because the circle test runs first.
        let points = circle_points(60.0, 60.0, 20.0, 40);
        match recognizer().recognize(&points) {
            Some(ShapeDescriptor::Circle { radius, .. }) => {
                assert!((radius - 20).abs() <= 1);
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn jittered_horizontal_stroke_is_a_line() {
        let points: Vec<(i32, i32)> = (0..30)
            .map(|x| (x * 10, 50 + if x % 2 == 0 { 3 } else { -3 }))
            .collect();
        match recognizer().recognize(&points) {
            Some(ShapeDescriptor::Line { start, end }) => {
                assert_eq!(start, points[0]);
                assert_eq!(end, points[29]);
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn vertical_stroke_is_a_line() {
        let points: Vec<(i32, i32)> = (0..30).map(|y| (200, y * 8)).collect();
        match recognizer().recognize(&points) {
            Some(ShapeDescriptor::Line { start, end }) => {
                assert_eq!(start, (200, 0));
                assert_eq!(end, (200, 232));
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn near_square_path_is_a_square() {
        // Almost a full lap around a 100x100 square, stopping on the left
        // edge so the gap stays too wide for the circle closure test.
        let mut points: Vec<(i32, i32)> = Vec::new();
        for x in 0..=10 {
            points.push((x * 10, 0));
        }
        for y in 1..=10 {
            points.push((100, y * 10));
        }
        for x in (0..=9).rev() {
            points.push((x * 10, 100));
        }
        for y in (6..=9).rev() {
            points.push((0, y * 10));
        }
        match recognizer().recognize(&points) {
            Some(ShapeDescriptor::Polygon { kind, vertices }) => {
                assert_eq!(kind, PolygonKind::Square);
                assert_eq!(vertices.len(), 4);
            }
            other => panic!("expected square, got {other:?}"),
        }
    }

    #[test]
    fn uneven_sides_make_a_rectangle() {
        let mut points: Vec<(i32, i32)> = Vec::new();
        for x in 0..=16 {
            points.push((x * 10, 0));
        }
        for y in 1..=8 {
            points.push((160, y * 10));
        }
        for x in (0..=15).rev() {
            points.push((x * 10, 80));
        }
        for y in (6..=7).rev() {
            points.push((0, y * 10));
        }
        match recognizer().recognize(&points) {
            Some(ShapeDescriptor::Polygon { kind, vertices }) => {
                assert_eq!(kind, PolygonKind::Rectangle);
                assert_eq!(vertices.len(), 4);
            }
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    #[test]
    fn three_vertex_hull_is_a_triangle() {
        let mut points: Vec<(i32, i32)> = Vec::new();
        for x in 0..=20 {
            points.push((x * 10, 0));
        }
        for k in 1..=10 {
            points.push((200 - k * 10, k * 16));
        }
        for k in 1..=5 {
            points.push((100 - k * 10, 160 - k * 16));
        }
        match recognizer().recognize(&points) {
            Some(ShapeDescriptor::Polygon { kind, vertices }) => {
                assert_eq!(kind, PolygonKind::Triangle);
                assert_eq!(vertices.len(), 3);
            }
            other => panic!("expected triangle, got {other:?}"),
        }
    }

    #[test]
    fn bent_tail_reads_as_an_arrow_head() {
        // Loose thresholds isolate the thirds heuristic from the line and
        // curvature gates.
        let config = RecognitionConfig {
            line_error_threshold: 4.0,
            arrow_curve_ceiling: 100.0,
            ..RecognitionConfig::default()
        };
        let recognizer = ShapeRecognizer::new(config);

        // 24 shaft points plus a 6 point hook: the last third mixes straight
        // shaft with the bend, so its local fit has a large residual while
        // the first third stays flat.
        let mut points: Vec<(i32, i32)> = (0..24).map(|x| (x * 10, 0)).collect();
        for k in 1..=6 {
            points.push((230 + k * 5, k * 30));
        }
        match recognizer.recognize(&points) {
            Some(ShapeDescriptor::Arrow { tail, head }) => {
                assert_eq!(tail, (0, 0));
                assert_eq!(head, (260, 180));
            }
            other => panic!("expected arrow, got {other:?}"),
        }
    }

    #[test]
    fn symmetric_bends_are_not_an_arrow() {
        let config = RecognitionConfig {
            line_error_threshold: 4.0,
            arrow_curve_ceiling: 100.0,
            ..RecognitionConfig::default()
        };
        let recognizer = ShapeRecognizer::new(config);

        // Both ends hook upward by the same amount; a mid-shaft bump keeps
        // the convex hull above four vertices so the polygon stage also
        // declines.
        let mut points: Vec<(i32, i32)> = Vec::new();
        for k in (1..=7).rev() {
            points.push((0 - k * 5, k * 25));
        }
        for x in 0..20 {
            points.push((x * 10, 0));
            if x == 9 {
                points.push((95, -30));
            }
        }
        for k in 1..=7 {
            points.push((190 + k * 5, k * 25));
        }
        assert_eq!(recognizer.recognize(&points), None);
    }
}
