use std::f32::consts::TAU;

/// Number of samples on a circle outline.
pub const CIRCLE_SEGMENTS: usize = 60;

/// Current window size in pixels. Owns the y-flip between the top-down
/// pointer coordinates and the bottom-up canvas space, and the aspect
/// correction for circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(960, 640)
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height: height.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn flip_y(&self, y: i32) -> i32 {
        self.height as i32 - y
    }
}

pub fn line(p1: (i32, i32), p2: (i32, i32)) -> [(i32, i32); 2] {
    [p1, p2]
}

/// Full quad for two opposite corners, wound corner -> adjacent ->
/// opposite -> adjacent so a closed polyline traces the outline.
pub fn rectangle(c1: (i32, i32), c2: (i32, i32)) -> [(i32, i32); 4] {
    let (x1, y1) = c1;
    let (x2, y2) = c2;
    [(x1, y1), (x2, y1), (x2, y2), (x1, y2)]
}

/// Samples `CIRCLE_SEGMENTS` points around the circle through `edge`
/// centered on `center`, in increasing angular order.
///
/// The radius and angles are computed in a normalized [-1, 1] space with
/// the wider axis stretched by the aspect ratio, then converted back, so
/// circles stay visually round on non-square windows.
pub fn circle(center: (i32, i32), edge: (i32, i32), viewport: Viewport) -> Vec<(i32, i32)> {
    let aspect = viewport.aspect();
    let width = viewport.width() as f32;
    let height = viewport.height() as f32;

    let mut cx = 2.0 * center.0 as f32 / width - 1.0;
    let mut cy = 2.0 * center.1 as f32 / height - 1.0;
    let mut ex = 2.0 * edge.0 as f32 / width - 1.0;
    let mut ey = 2.0 * edge.1 as f32 / height - 1.0;

    if aspect > 1.0 {
        cx *= aspect;
        ex *= aspect;
    } else {
        cy *= aspect;
        ey *= aspect;
    }

    let radius = ((ex - cx).powi(2) + (ey - cy).powi(2)).sqrt();
    let step = TAU / CIRCLE_SEGMENTS as f32;

    (0..CIRCLE_SEGMENTS)
        .map(|segment| {
            let theta = segment as f32 * step;
            let mut x = radius * theta.cos() + cx;
            let mut y = radius * theta.sin() + cy;
            if aspect > 1.0 {
                x /= aspect;
            } else {
                y /= aspect;
            }
            (
                ((x + 1.0) / 2.0 * width).round() as i32,
                ((y + 1.0) / 2.0 * height).round() as i32,
            )
        })
        .collect()
}
