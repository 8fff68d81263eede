//! Arc-and-arrow progress painter, reduced to the geometry it would draw.

use pullrefresh_ui_graphics::{Color, Density, Dp, Offset, Point, Rect, Size};

/// Describes one frame of the progress arc. All trims and `rotation` are
/// fractions of a full turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularProgressPainter {
    pub color: Color,
    pub alpha: f32,
    pub arc_radius: Dp,
    pub stroke_width: Dp,
    pub arrow_enabled: bool,
    pub arrow_width: Dp,
    pub arrow_height: Dp,
    pub arrow_scale: f32,
    pub start_trim: f32,
    pub end_trim: f32,
    pub rotation: f32,
}

impl Default for CircularProgressPainter {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            alpha: 1.0,
            arc_radius: Dp::ZERO,
            stroke_width: Dp(5.0),
            arrow_enabled: false,
            arrow_width: Dp::ZERO,
            arrow_height: Dp::ZERO,
            arrow_scale: 1.0,
            start_trim: 0.0,
            end_trim: 0.0,
            rotation: 0.0,
        }
    }
}

/// What a canvas would draw for a [`CircularProgressPainter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressGeometry {
    pub arc_bounds: Rect,
    /// Degrees, clockwise from three o'clock.
    pub start_angle: f32,
    pub sweep_angle: f32,
    /// The whole drawing is rotated by this many degrees around the canvas center.
    pub canvas_rotation: f32,
    pub stroke_width_px: f32,
    pub color: Color,
    pub alpha: f32,
    /// Arrow head triangle in canvas coordinates, all rotations applied.
    pub arrow: Option<[Point; 3]>,
}

impl CircularProgressPainter {
    pub fn geometry(&self, canvas: Size, density: Density) -> ProgressGeometry {
        let stroke_width_px = density.dp_to_px(self.stroke_width);
        let center = canvas.center();
        let radius = density.dp_to_px(self.arc_radius) + stroke_width_px / 2.0;
        let arc_bounds = Rect::from_center_radius(center, radius);

        let start_angle = (self.start_trim + self.rotation) * 360.0;
        let end_angle = (self.end_trim + self.rotation) * 360.0;
        let sweep_angle = end_angle - start_angle;
        let canvas_rotation = self.rotation;

        let arrow = self.arrow_enabled.then(|| {
            self.arrow_points(&arc_bounds, stroke_width_px, density)
                .map(|point| {
                    point
                        .rotate_around(center, start_angle + sweep_angle)
                        .rotate_around(center, canvas_rotation)
                })
        });

        ProgressGeometry {
            arc_bounds,
            start_angle,
            sweep_angle,
            canvas_rotation,
            stroke_width_px,
            color: self.color,
            alpha: self.alpha,
            arrow,
        }
    }

    /// Triangle pointing down, sitting on the arc's right edge before rotation.
    fn arrow_points(&self, bounds: &Rect, stroke_width_px: f32, density: Density) -> [Point; 3] {
        let width = density.dp_to_px(self.arrow_width) * self.arrow_scale;
        let height = density.dp_to_px(self.arrow_height) * self.arrow_scale;
        let radius = bounds.width.min(bounds.height) / 2.0;
        let inset = width / 2.0;
        let center = bounds.center();
        let shift = Offset::new(
            radius + center.x - inset,
            center.y + stroke_width_px / 2.0,
        );
        [
            Point::new(0.0, 0.0).translate(shift),
            Point::new(width, 0.0).translate(shift),
            Point::new(width / 2.0, height).translate(shift),
        ]
    }
}
