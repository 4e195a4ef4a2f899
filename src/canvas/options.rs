use crate::canvas::model::{Color, PrimitiveStyle, ShapeStore, ShapeStyle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Line,
    Rectangle,
    Circle,
    Polygon,
    Brush,
    Spray,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Line,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Polygon,
        Tool::Brush,
        Tool::Spray,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Line => "Line",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
            Tool::Polygon => "Polygon",
            Tool::Brush => "Brush",
            Tool::Spray => "Spray",
        }
    }

    /// Primitive style a tool selects for the shapes it creates.
    pub fn primitive(self) -> PrimitiveStyle {
        match self {
            Tool::Line | Tool::Rectangle | Tool::Circle | Tool::Polygon => {
                PrimitiveStyle::ClosedPolyline
            }
            Tool::Brush => PrimitiveStyle::OpenPolyline,
            Tool::Spray => PrimitiveStyle::PointCloud,
        }
    }

    /// The four geometric tools use a crosshair cursor; freehand tools keep
    /// the default arrow.
    pub fn uses_crosshair(self) -> bool {
        !matches!(self, Tool::Brush | Tool::Spray)
    }
}

pub const COLOR_PRESETS: [(&str, Color); 12] = [
    ("White", Color::rgb(1.0, 1.0, 1.0)),
    ("Black", Color::rgb(0.0, 0.0, 0.0)),
    ("Red", Color::rgb(1.0, 0.0, 0.0)),
    ("Green", Color::rgb(0.0, 1.0, 0.0)),
    ("Blue", Color::rgb(0.0, 0.0, 1.0)),
    ("Yellow", Color::rgb(1.0, 1.0, 0.0)),
    ("Cyan", Color::rgb(0.0, 1.0, 1.0)),
    ("Magenta", Color::rgb(1.0, 0.0, 1.0)),
    ("Grey", Color::rgb(0.5, 0.5, 0.5)),
    ("Pink", Color::rgb(1.0, 0.5, 1.0)),
    ("Brown", Color::rgb(0.5, 0.25, 0.1)),
    ("Orange", Color::rgb(1.0, 0.65, 0.0)),
];

pub const OPACITY_PRESETS: [(&str, f32); 5] = [
    ("0%", 0.0),
    ("25%", 0.25),
    ("50%", 0.5),
    ("75%", 0.75),
    ("100%", 1.0),
];

pub const WIDTH_PRESETS: [u32; 5] = [1, 3, 5, 8, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Outline,
    Filled,
}

impl FillMode {
    pub const ALL: [FillMode; 2] = [FillMode::Outline, FillMode::Filled];

    pub fn label(self) -> &'static str {
        match self {
            FillMode::Outline => "Outline",
            FillMode::Filled => "Filled",
        }
    }

    fn primitive(self) -> PrimitiveStyle {
        match self {
            FillMode::Outline => PrimitiveStyle::ClosedPolyline,
            FillMode::Filled => PrimitiveStyle::FilledFan,
        }
    }
}

/// Live drawing options. Read when a shape is created; irrelevant to
/// shapes that already exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawingOptions {
    pub tool: Tool,
    pub color: Color,
    pub opacity: f32,
    pub width: u32,
    pub primitive: PrimitiveStyle,
}

impl Default for DrawingOptions {
    fn default() -> Self {
        Self {
            tool: Tool::Line,
            color: Color::BLACK,
            opacity: 1.0,
            width: 3,
            primitive: PrimitiveStyle::ClosedPolyline,
        }
    }
}

impl DrawingOptions {
    /// Style frozen into the next shape.
    pub fn style(&self) -> ShapeStyle {
        ShapeStyle {
            color: self.color,
            opacity: self.opacity,
            width: self.width,
            primitive: self.primitive,
        }
    }
}

/// The fixed command set the context menu can emit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuCommand {
    SelectTool(Tool),
    SetColor(Color),
    SetOpacity(f32),
    SetWidth(u32),
    SetFill(FillMode),
    Reset,
}

/// Applies a menu command to the live options. The active shape is sealed
/// first so an option change can never leak into an in-progress shape.
pub fn apply_menu_command(
    options: &mut DrawingOptions,
    store: &mut ShapeStore,
    command: MenuCommand,
) {
    store.seal();
    match command {
        MenuCommand::SelectTool(tool) => {
            options.tool = tool;
            options.primitive = tool.primitive();
        }
        MenuCommand::SetColor(color) => options.color = color,
        MenuCommand::SetOpacity(opacity) => options.opacity = opacity,
        MenuCommand::SetWidth(width) => options.width = width,
        MenuCommand::SetFill(mode) => options.primitive = mode.primitive(),
        MenuCommand::Reset => *options = DrawingOptions::default(),
    }
}
