//! Typed debug-draw callbacks and the line batch that feeds the renderer.
//!
//! A solver reports its collision geometry through [`DebugDraw`], one typed
//! callback per primitive in simulation units. [`LineBatcher`] implements the
//! interesting callbacks by tessellating each primitive into colored line
//! segments in display units, accumulating them into a [`LineBatch`], and
//! handing the finished batch to a [`LineSink`] once per frame. The sink is
//! the only rendering-facing piece; everything else is plain geometry.

use glam::{Vec2, Vec3};

use crate::units::UnitScale;

/// Straight-alpha color, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Rgba {
    /// Builds a color from all four components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a fully opaque color.
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Components as an array, the layout vertex buffers want.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Debug-draw callbacks a solver invokes while walking its fixtures.
///
/// All geometry arrives in simulation units. Every method defaults to a
/// no-op so implementors pick out only the primitives they care about.
#[allow(unused_variables)]
pub trait DebugDraw {
    /// An open polygon outline.
    fn draw_polygon(&mut self, vertices: &[Vec2], color: Rgba) {}

    /// A filled polygon.
    fn draw_solid_polygon(&mut self, vertices: &[Vec2], color: Rgba) {}

    /// A circle outline.
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {}

    /// A filled circle. `axis` is the body's local x axis, for spin cues.
    fn draw_solid_circle(&mut self, center: Vec2, radius: f32, axis: Vec2, color: Rgba) {}

    /// A single line segment.
    fn draw_segment(&mut self, a: Vec2, b: Vec2, color: Rgba) {}

    /// A body transform.
    fn draw_transform(&mut self, position: Vec2, angle: f32) {}

    /// A point with a size in meters.
    fn draw_point(&mut self, point: Vec2, size: f32, color: Rgba) {}
}

/// One frame's worth of colored line segments, in display units.
///
/// Segments are stored as independent endpoint pairs: vertices `2k` and
/// `2k + 1` bound segment `k`, and each endpoint carries its own color.
/// The z component is always zero; the simulation plane sits at z = 0.
#[derive(Debug, Clone, Default)]
pub struct LineBatch {
    /// Segment endpoints, two per segment.
    pub positions: Vec<Vec3>,
    /// Endpoint colors, parallel to `positions`.
    pub colors: Vec<Rgba>,
}

impl LineBatch {
    /// Drops all segments.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
    }

    /// Whether the batch holds no segments.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of segments in the batch.
    pub fn segment_count(&self) -> usize {
        self.positions.len() / 2
    }

    /// Appends one segment in display units.
    pub fn push_segment(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.positions.push(from.extend(0.0));
        self.positions.push(to.extend(0.0));
        self.colors.push(color);
        self.colors.push(color);
    }
}

/// Receives a finished [`LineBatch`] once per frame.
pub trait LineSink {
    /// Takes ownership of the batch contents for this frame.
    fn commit(&mut self, batch: &LineBatch);
}

/// Angular step between circle outline points, degrees.
pub const CIRCLE_STEP_DEGREES: f32 = 20.0;

/// Radius inflation applied to circle outlines so they sit just outside the
/// mesh they trace instead of z-fighting with it.
pub const CIRCLE_OUTLINE_INFLATION: f32 = 1.01;

/// Tessellates debug-draw primitives into a display-space line batch.
///
/// Filled polygons become their closed outline and filled circles become an
/// 18-segment ring; the remaining callbacks keep their default no-op bodies,
/// which keeps the overlay to fixture outlines. Call [`begin`](Self::begin)
/// before handing the batcher to the solver and [`end`](Self::end) after, so
/// each frame's batch stands alone.
#[derive(Debug)]
pub struct LineBatcher {
    scale: UnitScale,
    batch: LineBatch,
}

impl LineBatcher {
    /// Creates a batcher converting through `scale`.
    pub fn new(scale: UnitScale) -> Self {
        Self {
            scale,
            batch: LineBatch::default(),
        }
    }

    /// Starts a fresh frame, dropping anything left in the batch.
    pub fn begin(&mut self) {
        self.batch.clear();
    }

    /// Commits the finished batch to `sink` and clears it.
    pub fn end(&mut self, sink: &mut dyn LineSink) {
        sink.commit(&self.batch);
        self.batch.clear();
    }

    /// The batch accumulated so far this frame.
    pub fn batch(&self) -> &LineBatch {
        &self.batch
    }
}

impl DebugDraw for LineBatcher {
    /// Outlines the polygon edge by edge, closing the loop.
    fn draw_solid_polygon(&mut self, vertices: &[Vec2], color: Rgba) {
        match vertices {
            [] | [_] => {}
            [a, b] => {
                self.batch.push_segment(
                    self.scale.point_to_display(*a),
                    self.scale.point_to_display(*b),
                    color,
                );
            }
            _ => {
                for i in 0..vertices.len() {
                    let from = vertices[i];
                    let to = vertices[(i + 1) % vertices.len()];
                    self.batch.push_segment(
                        self.scale.point_to_display(from),
                        self.scale.point_to_display(to),
                        color,
                    );
                }
            }
        }
    }

    /// Rings the circle with fixed 20-degree arcs, slightly inflated.
    fn draw_solid_circle(&mut self, center: Vec2, radius: f32, _axis: Vec2, color: Rgba) {
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let center = self.scale.point_to_display(center);
        let radius = self.scale.to_display(radius) * CIRCLE_OUTLINE_INFLATION;
        let step = CIRCLE_STEP_DEGREES.to_radians();
        let segments = (360.0 / CIRCLE_STEP_DEGREES) as usize;
        for i in 0..segments {
            let a0 = step * i as f32;
            let a1 = step * (i + 1) as f32;
            self.batch.push_segment(
                center + Vec2::new(a0.cos(), a0.sin()) * radius,
                center + Vec2::new(a1.cos(), a1.sin()) * radius,
                color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingSink {
        commits: Vec<LineBatch>,
    }

    impl LineSink for RecordingSink {
        fn commit(&mut self, batch: &LineBatch) {
            self.commits.push(batch.clone());
        }
    }

    fn make_batcher(units_per_meter: f32) -> LineBatcher {
        LineBatcher::new(UnitScale::new(units_per_meter).unwrap())
    }

    #[test]
    fn test_polygon_outline_closes_the_loop() {
        let mut batcher = make_batcher(3.0);
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        batcher.draw_solid_polygon(&square, Rgba::opaque(0.5, 0.9, 0.5));

        let batch = batcher.batch();
        assert_eq!(batch.segment_count(), 4);
        // endpoints scaled to display units, last edge returns to the start
        assert_eq!(batch.positions[0], Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(batch.positions[1], Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(batch.positions[6], Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(batch.positions[7], Vec3::new(0.0, 0.0, 0.0));
        assert!(batch.colors.iter().all(|c| *c == Rgba::opaque(0.5, 0.9, 0.5)));
    }

    #[test]
    fn test_degenerate_polygons() {
        let mut batcher = make_batcher(1.0);
        batcher.draw_solid_polygon(&[], Rgba::opaque(1.0, 1.0, 1.0));
        batcher.draw_solid_polygon(&[Vec2::ZERO], Rgba::opaque(1.0, 1.0, 1.0));
        assert!(batcher.batch().is_empty());

        // two vertices make a single segment, not a doubled loop
        batcher.draw_solid_polygon(
            &[Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)],
            Rgba::opaque(1.0, 1.0, 1.0),
        );
        assert_eq!(batcher.batch().segment_count(), 1);
    }

    #[test]
    fn test_circle_ring_has_eighteen_inflated_segments() {
        let mut batcher = make_batcher(3.0);
        batcher.draw_solid_circle(Vec2::ZERO, 1.0, Vec2::X, Rgba::opaque(0.9, 0.7, 0.7));

        let batch = batcher.batch();
        assert_eq!(batch.segment_count(), 18);

        let expected = 3.0 * CIRCLE_OUTLINE_INFLATION;
        for p in &batch.positions {
            assert!((p.truncate().length() - expected).abs() < 1e-3);
            assert_eq!(p.z, 0.0);
        }
        // ring starts on the +x axis and the final segment closes it
        assert!((batch.positions[0].x - expected).abs() < 1e-3);
        assert!(batch.positions[0].y.abs() < 1e-3);
        assert!((batch.positions[35] - batch.positions[0]).length() < 1e-3);
    }

    #[test]
    fn test_circle_ring_is_centered() {
        let mut batcher = make_batcher(2.0);
        batcher.draw_solid_circle(
            Vec2::new(1.0, -2.0),
            0.5,
            Vec2::X,
            Rgba::opaque(0.6, 0.6, 0.6),
        );
        let center = Vec2::new(2.0, -4.0);
        let radius = 1.0 * CIRCLE_OUTLINE_INFLATION;
        for p in batcher.batch().positions.iter() {
            assert!(((p.truncate() - center).length() - radius).abs() < 1e-3);
        }
    }

    #[test]
    fn test_degenerate_circles_draw_nothing() {
        let mut batcher = make_batcher(3.0);
        batcher.draw_solid_circle(Vec2::ZERO, 0.0, Vec2::X, Rgba::opaque(1.0, 1.0, 1.0));
        batcher.draw_solid_circle(Vec2::ZERO, -1.0, Vec2::X, Rgba::opaque(1.0, 1.0, 1.0));
        batcher.draw_solid_circle(Vec2::ZERO, f32::NAN, Vec2::X, Rgba::opaque(1.0, 1.0, 1.0));
        assert!(batcher.batch().is_empty());
    }

    #[test]
    fn test_unhandled_callbacks_stay_silent() {
        let mut batcher = make_batcher(3.0);
        let color = Rgba::opaque(1.0, 0.0, 0.0);
        batcher.draw_polygon(&[Vec2::ZERO, Vec2::X, Vec2::Y], color);
        batcher.draw_circle(Vec2::ZERO, 1.0, color);
        batcher.draw_segment(Vec2::ZERO, Vec2::X, color);
        batcher.draw_transform(Vec2::ZERO, 0.5);
        batcher.draw_point(Vec2::ZERO, 0.1, color);
        assert!(batcher.batch().is_empty());
    }

    #[test]
    fn test_begin_and_end_isolate_frames() {
        let mut batcher = make_batcher(1.0);
        let mut sink = RecordingSink { commits: Vec::new() };

        batcher.begin();
        batcher.draw_solid_circle(Vec2::ZERO, 1.0, Vec2::X, Rgba::opaque(1.0, 1.0, 1.0));
        batcher.end(&mut sink);
        assert_eq!(sink.commits.len(), 1);
        assert_eq!(sink.commits[0].segment_count(), 18);
        assert!(batcher.batch().is_empty());

        // a frame with no primitives still commits, with an empty batch
        batcher.begin();
        batcher.end(&mut sink);
        assert_eq!(sink.commits.len(), 2);
        assert!(sink.commits[1].is_empty());
    }

    #[test]
    fn test_begin_discards_leftovers() {
        let mut batcher = make_batcher(1.0);
        batcher.draw_solid_polygon(
            &[Vec2::ZERO, Vec2::X, Vec2::ONE],
            Rgba::opaque(1.0, 1.0, 1.0),
        );
        batcher.begin();
        assert!(batcher.batch().is_empty());
    }
}
