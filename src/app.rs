use crate::canvas::geometry::Viewport;
use crate::canvas::image_io;
use crate::canvas::input::{GestureInput, PointerButton};
use crate::canvas::model::ShapeStore;
use crate::canvas::options::{
    apply_menu_command, DrawingOptions, FillMode, MenuCommand, Tool, COLOR_PRESETS,
    OPACITY_PRESETS, WIDTH_PRESETS,
};
use crate::canvas::render;
use crate::settings::{self, AppSettings};
use eframe::egui::{
    self, Align2, Color32, CursorIcon, FontId, Key, Pos2, Rect, Sense, ViewportCommand,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Whole-application state: the shape store, the live drawing options, the
/// gesture machine and the thin texture/file glue around them.
pub struct SketchApp {
    settings: AppSettings,
    store: ShapeStore,
    options: DrawingOptions,
    gesture: GestureInput,
    viewport: Viewport,
    backdrop: Option<egui::TextureHandle>,
    pending_capture: Option<PathBuf>,
    status: Option<String>,
}

impl SketchApp {
    pub fn new(settings: AppSettings) -> Self {
        let options = settings.last_options;
        Self {
            viewport: Viewport::new(settings.window_width, settings.window_height),
            settings,
            store: ShapeStore::default(),
            options,
            gesture: GestureInput::default(),
            backdrop: None,
            pending_capture: None,
            status: None,
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(Key::Enter)) {
            self.gesture.finish_polygon(&mut self.store);
        }
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
        if ctx.input(|i| i.key_pressed(Key::S)) {
            self.request_capture(ctx);
        }
        if ctx.input(|i| i.key_pressed(Key::O)) {
            self.load_backdrop(ctx);
        }
    }

    fn request_capture(&mut self, ctx: &egui::Context) {
        match image_io::ensure_capture_folder() {
            Ok(folder) => {
                let path = folder.join(image_io::timestamped_capture_name(chrono::Local::now()));
                self.pending_capture = Some(path);
                ctx.send_viewport_cmd(ViewportCommand::Screenshot);
            }
            Err(err) => self.report_error("prepare capture folder", err),
        }
    }

    /// The screenshot requested by the save command arrives as an event on
    /// a later frame.
    fn handle_screenshots(&mut self, ctx: &egui::Context) {
        let images: Vec<Arc<egui::ColorImage>> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Screenshot { image, .. } => Some(image.clone()),
                    _ => None,
                })
                .collect()
        });

        for image in images {
            let Some(path) = self.pending_capture.take() else {
                continue;
            };
            let [width, height] = image.size;
            let rgba: Vec<u8> = image.pixels.iter().flat_map(|c| c.to_array()).collect();
            match image_io::write_bitmap(&path, width as u32, height as u32, &rgba) {
                Ok(()) => {
                    info!(path = %path.display(), "saved canvas capture");
                    self.status = Some(format!("saved {}", path.display()));
                }
                Err(err) => self.report_error("save capture", err),
            }
        }
    }

    fn load_backdrop(&mut self, ctx: &egui::Context) {
        let path = PathBuf::from(&self.settings.backdrop_file);
        let (width, height) = (self.viewport.width(), self.viewport.height());
        match image_io::read_backdrop_rgb(&path, width, height) {
            Ok(rgb) => {
                let image = egui::ColorImage::from_rgb([width as usize, height as usize], &rgb);
                self.backdrop =
                    Some(ctx.load_texture("backdrop", image, egui::TextureOptions::LINEAR));
                info!(path = %path.display(), "loaded backdrop");
                self.status = None;
            }
            Err(err) => self.report_error("load backdrop", err),
        }
    }

    fn handle_pointer_events(&mut self, ctx: &egui::Context, canvas_rect: Rect) {
        // Events over an open menu belong to the menu, not the canvas.
        if ctx.is_pointer_over_area() {
            return;
        }

        let events = ctx.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::PointerButton {
                    pos, button, pressed, ..
                } => {
                    let Some(button) = map_button(button) else {
                        continue;
                    };
                    if !canvas_rect.contains(pos) {
                        continue;
                    }
                    let point = canvas_point(pos, canvas_rect);
                    if pressed {
                        self.gesture.handle_pointer_press(
                            button,
                            point,
                            &mut self.store,
                            &self.options,
                            self.viewport,
                        );
                    } else {
                        self.gesture.handle_pointer_release(
                            button,
                            point,
                            &mut self.store,
                            &self.options,
                            self.viewport,
                        );
                    }
                }
                egui::Event::PointerMoved(pos) => {
                    self.gesture.handle_pointer_move(
                        canvas_point(pos, canvas_rect),
                        &mut self.store,
                        &self.options,
                        self.viewport,
                    );
                }
                _ => {}
            }
        }
    }

    fn menu_ui(&mut self, ui: &mut egui::Ui) {
        let mut selected = None;

        ui.menu_button("Select", |ui| {
            for tool in Tool::ALL {
                if ui.button(tool.label()).clicked() {
                    selected = Some(MenuCommand::SelectTool(tool));
                    ui.close_menu();
                }
            }
        });
        ui.menu_button("Color", |ui| {
            for (name, color) in COLOR_PRESETS {
                if ui.button(name).clicked() {
                    selected = Some(MenuCommand::SetColor(color));
                    ui.close_menu();
                }
            }
        });
        ui.menu_button("Opacity", |ui| {
            for (name, opacity) in OPACITY_PRESETS {
                if ui.button(name).clicked() {
                    selected = Some(MenuCommand::SetOpacity(opacity));
                    ui.close_menu();
                }
            }
        });
        ui.menu_button("Thickness", |ui| {
            for width in WIDTH_PRESETS {
                if ui.button(format!("{width} px")).clicked() {
                    selected = Some(MenuCommand::SetWidth(width));
                    ui.close_menu();
                }
            }
        });
        ui.menu_button("Fill", |ui| {
            for mode in FillMode::ALL {
                if ui.button(mode.label()).clicked() {
                    selected = Some(MenuCommand::SetFill(mode));
                    ui.close_menu();
                }
            }
        });

        if let Some(command) = selected {
            apply_menu_command(&mut self.options, &mut self.store, command);
        }
    }

    fn report_error(&mut self, what: &str, err: anyhow::Error) {
        error!("{what}: {err:#}");
        self.status = Some(format!("{what}: {err:#}"));
    }
}

impl eframe::App for SketchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);
        self.handle_screenshots(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::WHITE))
            .show(ctx, |ui| {
                let response = ui.allocate_rect(ui.max_rect(), Sense::click_and_drag());
                let canvas_rect = response.rect;
                self.viewport = Viewport::new(
                    canvas_rect.width().round() as u32,
                    canvas_rect.height().round() as u32,
                );

                self.handle_pointer_events(ctx, canvas_rect);

                let painter = ui.painter();
                if let Some(texture) = &self.backdrop {
                    painter.image(
                        texture.id(),
                        canvas_rect,
                        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
                painter.extend(render::canvas_shapes(
                    &self.store,
                    self.viewport,
                    canvas_rect.min,
                ));

                if let Some(status) = &self.status {
                    painter.text(
                        canvas_rect.left_bottom() + egui::vec2(4.0, -4.0),
                        Align2::LEFT_BOTTOM,
                        status,
                        FontId::proportional(12.0),
                        Color32::DARK_RED,
                    );
                }

                response.context_menu(|ui| self.menu_ui(ui));

                ctx.set_cursor_icon(if self.options.tool.uses_crosshair() {
                    CursorIcon::Crosshair
                } else {
                    CursorIcon::Default
                });
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings.last_options = self.options;
        match settings::save(&self.settings) {
            Ok(path) => info!(path = %path.display(), "persisted settings"),
            Err(err) => warn!("failed to persist settings: {err:#}"),
        }
    }
}

fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        _ => None,
    }
}

fn canvas_point(pos: Pos2, canvas_rect: Rect) -> (i32, i32) {
    (
        (pos.x - canvas_rect.min.x).round() as i32,
        (pos.y - canvas_rect.min.y).round() as i32,
    )
}
