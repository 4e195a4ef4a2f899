use crate::canvas::geometry::Viewport;
use crate::canvas::model::{PrimitiveStyle, ShapeStore, ShapeStyle};
use eframe::egui::{Color32, Pos2, Shape as PaintShape, Stroke};

/// Radius of the always-on vertex overlay dots.
const VERTEX_RADIUS: f32 = 1.5;

/// Converts a stored bottom-up canvas point to a screen position.
pub fn screen_pos(point: (i32, i32), viewport: Viewport, origin: Pos2) -> Pos2 {
    Pos2::new(
        origin.x + point.0 as f32,
        origin.y + viewport.flip_y(point.1) as f32,
    )
}

fn color32(style: &ShapeStyle) -> Color32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(
        channel(style.color.r),
        channel(style.color.g),
        channel(style.color.b),
        channel(style.opacity),
    )
}

/// One render pass over the store in creation order. Every shape is drawn
/// as its primitive style plus a dot at each vertex, so vertices stay
/// visible whatever the primitive is.
pub fn canvas_shapes(store: &ShapeStore, viewport: Viewport, origin: Pos2) -> Vec<PaintShape> {
    let mut out = Vec::new();

    for shape in store.shapes() {
        let points: Vec<Pos2> = shape
            .points
            .iter()
            .map(|&p| screen_pos(p, viewport, origin))
            .collect();
        let color = color32(&shape.style);
        let stroke = Stroke::new(shape.style.width as f32, color);

        match shape.style.primitive {
            PrimitiveStyle::ClosedPolyline => {
                if points.len() >= 2 {
                    out.push(PaintShape::closed_line(points.clone(), stroke));
                }
            }
            PrimitiveStyle::OpenPolyline => {
                if points.len() >= 2 {
                    out.push(PaintShape::line(points.clone(), stroke));
                }
            }
            PrimitiveStyle::PointCloud => {
                let radius = (shape.style.width as f32 / 2.0).max(1.0);
                out.extend(
                    points
                        .iter()
                        .map(|&p| PaintShape::circle_filled(p, radius, color)),
                );
            }
            PrimitiveStyle::FilledFan => {
                if points.len() >= 3 {
                    out.push(PaintShape::convex_polygon(
                        points.clone(),
                        color,
                        Stroke::NONE,
                    ));
                }
            }
        }

        out.extend(
            points
                .iter()
                .map(|&p| PaintShape::circle_filled(p, VERTEX_RADIUS, color)),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::model::{Color, ShapeStore};
    use crate::canvas::options::DrawingOptions;

    fn style_with(primitive: PrimitiveStyle) -> ShapeStyle {
        ShapeStyle {
            color: Color::rgb(1.0, 0.0, 0.0),
            opacity: 0.5,
            width: 3,
            primitive,
        }
    }

    #[test]
    fn screen_pos_flips_back_to_top_down() {
        let viewport = Viewport::new(960, 640);
        let pos = screen_pos((10, 630), viewport, Pos2::ZERO);
        assert_eq!(pos, Pos2::new(10.0, 10.0));

        let offset = screen_pos((0, 0), viewport, Pos2::new(5.0, 7.0));
        assert_eq!(offset, Pos2::new(5.0, 647.0));
    }

    #[test]
    fn closed_polyline_emits_one_path_plus_vertex_dots() {
        let mut store = ShapeStore::default();
        let style = style_with(PrimitiveStyle::ClosedPolyline);
        store.begin_shape(style);
        for p in [(0, 0), (10, 0), (10, 10), (0, 10)] {
            store.add_point(p, style);
        }

        let shapes = canvas_shapes(&store, Viewport::new(100, 100), Pos2::ZERO);
        assert_eq!(shapes.len(), 5);
        assert!(matches!(shapes[0], PaintShape::Path(_)));
        assert!(shapes[1..].iter().all(|s| matches!(s, PaintShape::Circle(_))));
    }

    #[test]
    fn point_cloud_renders_a_dot_per_point() {
        let mut store = ShapeStore::default();
        let style = style_with(PrimitiveStyle::PointCloud);
        for p in [(1, 1), (2, 2), (3, 3)] {
            store.add_point(p, style);
        }

        let shapes = canvas_shapes(&store, Viewport::new(100, 100), Pos2::ZERO);
        // three cloud dots plus three vertex dots
        assert_eq!(shapes.len(), 6);
        assert!(shapes.iter().all(|s| matches!(s, PaintShape::Circle(_))));
    }

    #[test]
    fn single_point_outline_still_shows_its_vertex() {
        let mut store = ShapeStore::default();
        let style = style_with(PrimitiveStyle::ClosedPolyline);
        store.add_point((5, 5), style);

        let shapes = canvas_shapes(&store, Viewport::new(100, 100), Pos2::ZERO);
        assert_eq!(shapes.len(), 1);
        assert!(matches!(shapes[0], PaintShape::Circle(_)));
    }

    #[test]
    fn shape_color_carries_opacity_as_alpha() {
        let options = DrawingOptions {
            opacity: 0.5,
            ..DrawingOptions::default()
        };
        let color = color32(&options.style());
        assert_eq!(color.a(), 128);
    }
}
