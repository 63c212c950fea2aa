//! Cairo-based rendering functions for strokes and recognized shapes.

use super::color::Color;
use super::stroke::{ShapeDescriptor, Stroke, StrokeKind};
use crate::util;

/// Fills the entire surface with a solid background color.
///
/// Should be called before replaying strokes during a full redraw.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `background` - Canvas background color
pub fn render_background(ctx: &cairo::Context, background: Color) {
    ctx.set_source_rgba(background.r, background.g, background.b, background.a);
    let _ = ctx.paint();
}

/// Renders all strokes in a collection to a Cairo context.
///
/// Iterates through the stroke slice and renders each one in order.
/// Strokes are drawn in the order they appear (first stroke = bottom layer).
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `strokes` - Slice of strokes to render
/// * `background` - Canvas background color, painted by erase strokes
pub fn render_strokes(ctx: &cairo::Context, strokes: &[Stroke], background: Color) {
    for stroke in strokes {
        render_stroke(ctx, stroke, background);
    }
}

/// Renders a single stroke to a Cairo context.
///
/// Freehand and erase strokes replay their recorded points as a polyline;
/// shape strokes render their idealized descriptor instead.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `stroke` - The stroke to render
/// * `background` - Canvas background color, painted by erase strokes
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke, background: Color) {
    match &stroke.kind {
        StrokeKind::Freehand => {
            render_polyline(ctx, &stroke.points, stroke.color, stroke.thickness);
        }
        StrokeKind::Erase => {
            render_polyline(ctx, &stroke.points, background, stroke.thickness);
        }
        StrokeKind::Shape(descriptor) => {
            render_descriptor(ctx, descriptor, stroke.color, stroke.thickness);
        }
    }
}

/// Render a polyline through points.
///
/// This function accepts a borrowed slice, avoiding clones. A single point
/// renders as a round dot so a tap still leaves a mark.
pub fn render_polyline(ctx: &cairo::Context, points: &[(i32, i32)], color: Color, thickness: u32) {
    if points.is_empty() {
        return;
    }

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thickness as f64);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    // Start at first point
    let (x0, y0) = points[0];
    ctx.move_to(x0 as f64, y0 as f64);

    if points.len() == 1 {
        // A zero-length path paints nothing even with a round cap
        ctx.line_to(x0 as f64 + 0.1, y0 as f64);
    } else {
        for &(x, y) in &points[1..] {
            ctx.line_to(x as f64, y as f64);
        }
    }

    let _ = ctx.stroke();
}

/// Render one incremental segment of an in-progress stroke.
///
/// Used for live feedback while drawing; the full polyline is replayed only
/// on structural redraws.
pub fn render_segment(
    ctx: &cairo::Context,
    from: (i32, i32),
    to: (i32, i32),
    color: Color,
    thickness: u32,
) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thickness as f64);
    ctx.set_line_cap(cairo::LineCap::Round);

    ctx.move_to(from.0 as f64, from.1 as f64);
    ctx.line_to(to.0 as f64, to.1 as f64);
    let _ = ctx.stroke();
}

/// Renders a recognized shape descriptor.
///
/// Dispatches to the appropriate internal rendering function based on the
/// descriptor variant: circle outline, line segment, closed polygon outline,
/// or arrow shaft with a filled head.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `descriptor` - The shape to render
/// * `color` - Stroke color
/// * `thickness` - Stroke width in pixels
pub fn render_descriptor(
    ctx: &cairo::Context,
    descriptor: &ShapeDescriptor,
    color: Color,
    thickness: u32,
) {
    match descriptor {
        ShapeDescriptor::Circle { center, radius } => {
            render_circle(ctx, *center, *radius, color, thickness);
        }
        ShapeDescriptor::Line { start, end } => {
            render_segment(ctx, *start, *end, color, thickness);
        }
        ShapeDescriptor::Polygon { vertices, .. } => {
            render_polygon(ctx, vertices, color, thickness);
        }
        ShapeDescriptor::Arrow { tail, head } => {
            render_arrow(ctx, *tail, *head, color, thickness);
        }
    }
}

/// Render a circle outline
fn render_circle(
    ctx: &cairo::Context,
    center: (i32, i32),
    radius: i32,
    color: Color,
    thickness: u32,
) {
    if radius <= 0 {
        return;
    }

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thickness as f64);
    ctx.arc(
        center.0 as f64,
        center.1 as f64,
        radius as f64,
        0.0,
        2.0 * std::f64::consts::PI,
    );
    let _ = ctx.stroke();
}

/// Render a closed polygon outline
fn render_polygon(ctx: &cairo::Context, vertices: &[(i32, i32)], color: Color, thickness: u32) {
    if vertices.len() < 3 {
        return;
    }

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thickness as f64);
    ctx.set_line_join(cairo::LineJoin::Miter);

    let (x0, y0) = vertices[0];
    ctx.move_to(x0 as f64, y0 as f64);
    for &(x, y) in &vertices[1..] {
        ctx.line_to(x as f64, y as f64);
    }
    ctx.close_path();
    let _ = ctx.stroke();
}

/// Render an arrow (shaft with a filled triangular head at the tip)
fn render_arrow(
    ctx: &cairo::Context,
    tail: (i32, i32),
    head: (i32, i32),
    color: Color,
    thickness: u32,
) {
    // Draw the shaft
    render_segment(ctx, tail, head, color, thickness);

    // Filled triangular head at the tip
    // Returns [left_point, right_point] of the head base
    let base = util::arrowhead_base(tail, head, thickness);

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.move_to(head.0 as f64, head.1 as f64);
    ctx.line_to(base[0].0, base[0].1);
    ctx.line_to(base[1].0, base[1].1);
    ctx.close_path();
    let _ = ctx.fill();
}
