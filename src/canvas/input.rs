use crate::canvas::geometry::{self, Viewport};
use crate::canvas::model::ShapeStore;
use crate::canvas::options::{DrawingOptions, Tool};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Pointer-gesture state. Tool selection lives in [`DrawingOptions`]; the
/// per-gesture state here is only the anchor of the current gesture and
/// whether the primary button is held.
///
/// Incoming positions are in top-down window pixels; the y-flip to the
/// bottom-up canvas space happens at this boundary.
#[derive(Debug, Default)]
pub struct GestureInput {
    anchor: Option<(i32, i32)>,
    primary_down: bool,
    budget_warned: bool,
}

impl GestureInput {
    pub fn handle_pointer_press(
        &mut self,
        button: PointerButton,
        pos: (i32, i32),
        store: &mut ShapeStore,
        options: &DrawingOptions,
        viewport: Viewport,
    ) {
        if button == PointerButton::Secondary {
            // Seal so the menu the press opens can never mutate an
            // in-progress shape.
            self.anchor = None;
            store.seal();
            return;
        }

        self.primary_down = true;
        self.budget_warned = false;
        let point = flip(pos, viewport);

        match options.tool {
            Tool::Line | Tool::Rectangle | Tool::Circle => {
                store.begin_shape(options.style());
                self.anchor = Some(point);
                // The circle center is not part of the outline.
                if options.tool != Tool::Circle {
                    self.try_add(store, point, options);
                }
            }
            Tool::Polygon => {
                self.try_add(store, point, options);
            }
            Tool::Brush | Tool::Spray => {
                store.begin_shape(options.style());
            }
        }
    }

    /// Pointer motion while the primary button is held.
    pub fn handle_pointer_move(
        &mut self,
        pos: (i32, i32),
        store: &mut ShapeStore,
        options: &DrawingOptions,
        viewport: Viewport,
    ) {
        if !self.primary_down {
            return;
        }
        let point = flip(pos, viewport);

        match options.tool {
            Tool::Polygon => store.drag_last_point(point),
            Tool::Brush | Tool::Spray => self.try_add(store, point, options),
            Tool::Line | Tool::Rectangle | Tool::Circle => {}
        }
    }

    pub fn handle_pointer_release(
        &mut self,
        button: PointerButton,
        pos: (i32, i32),
        store: &mut ShapeStore,
        options: &DrawingOptions,
        viewport: Viewport,
    ) {
        if button == PointerButton::Secondary {
            self.anchor = None;
            store.seal();
            return;
        }

        self.primary_down = false;
        let point = flip(pos, viewport);

        match options.tool {
            Tool::Line => {
                if let Some(anchor) = self.anchor.take() {
                    for &p in &geometry::line(anchor, point)[1..] {
                        self.try_add(store, p, options);
                    }
                }
            }
            Tool::Rectangle => {
                if let Some(anchor) = self.anchor.take() {
                    for &p in &geometry::rectangle(anchor, point)[1..] {
                        self.try_add(store, p, options);
                    }
                }
            }
            Tool::Circle => {
                if let Some(anchor) = self.anchor.take() {
                    for p in geometry::circle(anchor, point, viewport) {
                        self.try_add(store, p, options);
                    }
                }
            }
            Tool::Brush | Tool::Spray => store.seal(),
            Tool::Polygon => {}
        }
    }

    /// Explicit polygon-finish command: seals the in-progress polygon.
    pub fn finish_polygon(&mut self, store: &mut ShapeStore) {
        self.anchor = None;
        store.seal();
    }

    fn try_add(&mut self, store: &mut ShapeStore, point: (i32, i32), options: &DrawingOptions) {
        if !store.add_point(point, options.style()).accepted() && !self.budget_warned {
            warn!(
                budget = store.point_budget(),
                "point budget exhausted, dropping further input"
            );
            self.budget_warned = true;
        }
    }
}

fn flip(pos: (i32, i32), viewport: Viewport) -> (i32, i32) {
    (pos.0, viewport.flip_y(pos.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::geometry::CIRCLE_SEGMENTS;
    use crate::canvas::model::{PrimitiveStyle, ShapeStore};
    use crate::canvas::options::{apply_menu_command, FillMode, MenuCommand};

    fn setup(tool: Tool) -> (GestureInput, ShapeStore, DrawingOptions) {
        let mut options = DrawingOptions::default();
        let mut store = ShapeStore::default();
        apply_menu_command(&mut options, &mut store, MenuCommand::SelectTool(tool));
        (GestureInput::default(), store, options)
    }

    #[test]
    fn line_gesture_flips_y_against_window_height() {
        let viewport = Viewport::new(960, 640);
        let (mut input, mut store, options) = setup(Tool::Line);

        input.handle_pointer_press(PointerButton::Primary, (10, 10), &mut store, &options, viewport);
        input.handle_pointer_release(
            PointerButton::Primary,
            (100, 50),
            &mut store,
            &options,
            viewport,
        );

        assert_eq!(store.shapes().len(), 1);
        assert_eq!(store.shapes()[0].points, vec![(10, 630), (100, 590)]);
    }

    #[test]
    fn rectangle_gesture_produces_the_full_quad() {
        let viewport = Viewport::new(200, 200);
        let (mut input, mut store, options) = setup(Tool::Rectangle);

        input.handle_pointer_press(PointerButton::Primary, (0, 200), &mut store, &options, viewport);
        input.handle_pointer_release(
            PointerButton::Primary,
            (50, 150),
            &mut store,
            &options,
            viewport,
        );

        assert_eq!(store.shapes().len(), 1);
        assert_eq!(
            store.shapes()[0].points,
            vec![(0, 0), (50, 0), (50, 50), (0, 50)]
        );
        assert_eq!(
            store.shapes()[0].style.primitive,
            PrimitiveStyle::ClosedPolyline
        );
    }

    #[test]
    fn circle_gesture_emits_sixty_points_without_the_center() {
        let viewport = Viewport::new(640, 640);
        let (mut input, mut store, options) = setup(Tool::Circle);

        input.handle_pointer_press(
            PointerButton::Primary,
            (320, 320),
            &mut store,
            &options,
            viewport,
        );
        assert_eq!(store.total_points(), 0);

        input.handle_pointer_release(
            PointerButton::Primary,
            (420, 320),
            &mut store,
            &options,
            viewport,
        );
        assert_eq!(store.shapes().len(), 1);
        assert_eq!(store.shapes()[0].points.len(), CIRCLE_SEGMENTS);
    }

    #[test]
    fn polygon_clicks_append_vertices_and_finish_seals() {
        let viewport = Viewport::new(100, 100);
        let (mut input, mut store, mut options) = setup(Tool::Polygon);
        apply_menu_command(&mut options, &mut store, MenuCommand::SetFill(FillMode::Filled));

        for pos in [(0, 100), (10, 100), (10, 90)] {
            input.handle_pointer_press(PointerButton::Primary, pos, &mut store, &options, viewport);
            input.handle_pointer_release(
                PointerButton::Primary,
                pos,
                &mut store,
                &options,
                viewport,
            );
        }
        input.finish_polygon(&mut store);

        assert_eq!(store.shapes().len(), 1);
        assert!(store.active().is_none());
        assert_eq!(store.shapes()[0].points, vec![(0, 0), (10, 0), (10, 10)]);
        assert_eq!(store.shapes()[0].style.primitive, PrimitiveStyle::FilledFan);
    }

    #[test]
    fn polygon_drag_previews_the_last_vertex() {
        let viewport = Viewport::new(100, 100);
        let (mut input, mut store, options) = setup(Tool::Polygon);

        input.handle_pointer_press(PointerButton::Primary, (10, 90), &mut store, &options, viewport);
        input.handle_pointer_move((20, 80), &mut store, &options, viewport);
        input.handle_pointer_move((25, 75), &mut store, &options, viewport);

        assert_eq!(store.shapes()[0].points, vec![(25, 25)]);
    }

    #[test]
    fn brush_drag_accumulates_an_open_stroke() {
        let viewport = Viewport::new(100, 100);
        let (mut input, mut store, options) = setup(Tool::Brush);

        input.handle_pointer_press(PointerButton::Primary, (1, 99), &mut store, &options, viewport);
        input.handle_pointer_move((2, 98), &mut store, &options, viewport);
        input.handle_pointer_move((3, 97), &mut store, &options, viewport);
        input.handle_pointer_release(PointerButton::Primary, (3, 97), &mut store, &options, viewport);

        assert_eq!(store.shapes().len(), 1);
        assert_eq!(store.shapes()[0].points, vec![(2, 2), (3, 3)]);
        assert_eq!(store.shapes()[0].style.primitive, PrimitiveStyle::OpenPolyline);
        assert!(store.active().is_none());
    }

    #[test]
    fn motion_without_a_held_button_is_ignored() {
        let viewport = Viewport::new(100, 100);
        let (mut input, mut store, options) = setup(Tool::Brush);

        input.handle_pointer_move((50, 50), &mut store, &options, viewport);
        assert_eq!(store.total_points(), 0);
    }

    #[test]
    fn secondary_button_seals_on_press_and_release() {
        let viewport = Viewport::new(100, 100);
        let (mut input, mut store, options) = setup(Tool::Polygon);

        input.handle_pointer_press(PointerButton::Primary, (10, 90), &mut store, &options, viewport);
        input.handle_pointer_release(PointerButton::Primary, (10, 90), &mut store, &options, viewport);
        assert!(store.active().is_some());

        input.handle_pointer_press(PointerButton::Secondary, (50, 50), &mut store, &options, viewport);
        assert!(store.active().is_none());
        input.handle_pointer_release(PointerButton::Secondary, (50, 50), &mut store, &options, viewport);
        assert_eq!(store.shapes().len(), 1);
    }

    #[test]
    fn spray_produces_a_point_cloud() {
        let viewport = Viewport::new(100, 100);
        let (mut input, mut store, options) = setup(Tool::Spray);

        input.handle_pointer_press(PointerButton::Primary, (10, 90), &mut store, &options, viewport);
        for x in 11..15 {
            input.handle_pointer_move((x, 90), &mut store, &options, viewport);
        }
        input.handle_pointer_release(PointerButton::Primary, (15, 90), &mut store, &options, viewport);

        assert_eq!(store.shapes().len(), 1);
        assert_eq!(store.shapes()[0].points.len(), 4);
        assert_eq!(store.shapes()[0].style.primitive, PrimitiveStyle::PointCloud);
    }
}
