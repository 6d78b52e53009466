//! Drawing backend seam
//!
//! A cairo-style immediate-mode context: transforms and source state are saved
//! and restored as a stack, path points are fixed by the transform current when
//! they are added, and `fill`/`stroke` consume the path.

use orrery_core::{Color, Radians};

pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, angle: Radians);
    fn scale(&mut self, sx: f64, sy: f64);

    fn set_source(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);

    /// Counter-clockwise arc (increasing angle)
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: Radians, end: Radians);
    /// Clockwise arc (decreasing angle)
    fn arc_negative(&mut self, cx: f64, cy: f64, radius: f64, start: Radians, end: Radians);
    fn close_path(&mut self);

    fn fill(&mut self);
    fn stroke(&mut self);
    /// Flood the whole surface with the current source
    fn paint(&mut self);
}

/// One recorded backend call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { dx: f64, dy: f64 },
    Rotate(Radians),
    Scale { sx: f64, sy: f64 },
    SetSource(Color),
    SetLineWidth(f64),
    Arc { cx: f64, cy: f64, radius: f64, start: Radians, end: Radians },
    ArcNegative { cx: f64, cy: f64, radius: f64, start: Radians, end: Radians },
    ClosePath,
    Fill,
    Stroke,
    Paint,
}

/// Backend that only records the directive stream
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn rotate(&mut self, angle: Radians) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.commands.push(DrawCommand::Scale { sx, sy });
    }

    fn set_source(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetSource(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: Radians, end: Radians) {
        self.commands.push(DrawCommand::Arc { cx, cy, radius, start, end });
    }

    fn arc_negative(&mut self, cx: f64, cy: f64, radius: f64, start: Radians, end: Radians) {
        self.commands.push(DrawCommand::ArcNegative { cx, cy, radius, start, end });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn paint(&mut self) {
        self.commands.push(DrawCommand::Paint);
    }
}
