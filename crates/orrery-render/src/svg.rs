//! SVG document backend
//!
//! Arcs are flattened to polylines in device space, so non-uniform scales
//! (orbit ellipses, terminator bands) come out exact without SVG transforms.

use glam::{DAffine2, DVec2};
use orrery_core::{Color, Radians};
use std::f64::consts::TAU;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::canvas::Canvas;

const SEGMENTS_PER_TURN: f64 = 128.0;
/// Longest sweep drawn; larger sweeps keep their end angle but lose whole turns
const MAX_SWEEP: f64 = 2.0 * TAU;

#[derive(Clone, Copy, Debug)]
struct GraphicsState {
    transform: DAffine2,
    source: Color,
    line_width: f64,
}

#[derive(Clone, Debug, Default)]
struct Subpath {
    points: Vec<DVec2>,
    closed: bool,
}

pub struct SvgCanvas {
    width: u32,
    height: u32,
    state: GraphicsState,
    stack: Vec<GraphicsState>,
    path: Vec<Subpath>,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: GraphicsState {
                transform: DAffine2::IDENTITY,
                source: Color::BLACK,
                line_width: 2.0,
            },
            stack: Vec::new(),
            path: Vec::new(),
            body: String::new(),
        }
    }

    /// Complete SVG document
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }

    pub fn write_to(self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.finish())
    }

    fn line_to(&mut self, point: DVec2) {
        match self.path.last_mut() {
            Some(sub) if !sub.closed => sub.points.push(point),
            _ => self.path.push(Subpath {
                points: vec![point],
                closed: false,
            }),
        }
    }

    fn add_arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, sweep: f64) {
        if !sweep.is_finite() || !start.is_finite() {
            warn!(start, sweep, "skipping non-finite arc");
            return;
        }
        let sweep = if sweep.abs() > MAX_SWEEP {
            sweep.signum() * (sweep.abs().rem_euclid(TAU) + TAU)
        } else {
            sweep
        };
        let steps = ((sweep.abs() / TAU) * SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
        for k in 0..=steps {
            let angle = start + sweep * (k as f64 / steps as f64);
            let local = DVec2::new(cx + radius * angle.cos(), cy + radius * angle.sin());
            let device = self.state.transform.transform_point2(local);
            self.line_to(device);
        }
    }

    fn path_data(&self, close_all: bool) -> String {
        let mut d = String::new();
        for sub in &self.path {
            let mut points = sub.points.iter();
            let Some(first) = points.next() else {
                continue;
            };
            if !d.is_empty() {
                d.push(' ');
            }
            let _ = write!(d, "M{:.3} {:.3}", first.x, first.y);
            for p in points {
                let _ = write!(d, " L{:.3} {:.3}", p.x, p.y);
            }
            if close_all || sub.closed {
                d.push_str(" Z");
            }
        }
        d
    }

    /// Uniform scale factor of the current transform
    fn device_scale(&self) -> f64 {
        self.state.transform.matrix2.determinant().abs().sqrt()
    }
}

fn paint_attrs(kind: &str, color: Color) -> String {
    let [r, g, b, _] = color.to_rgba8();
    format!(
        "{kind}=\"rgb({r},{g},{b})\" {kind}-opacity=\"{:.3}\"",
        color.a.clamp(0.0, 1.0)
    )
}

impl Canvas for SvgCanvas {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => warn!("restore without matching save"),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self.state.transform * DAffine2::from_translation(DVec2::new(dx, dy));
    }

    fn rotate(&mut self, angle: Radians) {
        self.state.transform = self.state.transform * DAffine2::from_angle(angle.0);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform = self.state.transform * DAffine2::from_scale(DVec2::new(sx, sy));
    }

    fn set_source(&mut self, color: Color) {
        self.state.source = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: Radians, end: Radians) {
        let mut sweep = end.0 - start.0;
        if sweep < 0.0 {
            sweep = sweep.rem_euclid(TAU);
        }
        self.add_arc(cx, cy, radius, start.0, sweep);
    }

    fn arc_negative(&mut self, cx: f64, cy: f64, radius: f64, start: Radians, end: Radians) {
        let mut sweep = end.0 - start.0;
        if sweep > 0.0 {
            sweep = -(-sweep).rem_euclid(TAU);
        }
        self.add_arc(cx, cy, radius, start.0, sweep);
    }

    fn close_path(&mut self) {
        if let Some(sub) = self.path.last_mut() {
            sub.closed = true;
        }
    }

    fn fill(&mut self) {
        let d = self.path_data(true);
        if !d.is_empty() {
            let _ = writeln!(self.body, "<path d=\"{d}\" {}/>", paint_attrs("fill", self.state.source));
        }
        self.path.clear();
    }

    fn stroke(&mut self) {
        let d = self.path_data(false);
        if !d.is_empty() {
            let width = self.state.line_width * self.device_scale();
            let _ = writeln!(
                self.body,
                "<path d=\"{d}\" fill=\"none\" {} stroke-width=\"{width:.3}\" stroke-linecap=\"round\"/>",
                paint_attrs("stroke", self.state.source)
            );
        }
        self.path.clear();
    }

    fn paint(&mut self) {
        let _ = writeln!(
            self.body,
            "<rect width=\"100%\" height=\"100%\" {}/>",
            paint_attrs("fill", self.state.source)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn first_point(svg: &str) -> (f64, f64) {
        let start = svg.find("d=\"M").map(|i| i + 4).unwrap();
        let coords: Vec<f64> = svg[start..]
            .split(|c: char| c == ' ' || c == 'L' || c == '"')
            .filter(|s| !s.is_empty())
            .take(2)
            .map(|s| s.parse().unwrap())
            .collect();
        (coords[0], coords[1])
    }

    #[test]
    fn test_empty_document() {
        let svg = SvgCanvas::new(320, 200).finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("viewBox=\"0 0 320 200\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_paint_and_fill() {
        let mut canvas = SvgCanvas::new(100, 100);
        canvas.set_source(Color::rgb8(0x12, 0x12, 0x14));
        canvas.paint();
        canvas.set_source(Color::WHITE);
        canvas.arc(50.0, 50.0, 10.0, Radians(0.0), Radians(2.0 * PI));
        canvas.fill();
        let svg = canvas.finish();
        assert!(svg.contains("<rect width=\"100%\" height=\"100%\" fill=\"rgb(18,18,20)\""));
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains("fill=\"rgb(255,255,255)\""));
        assert_eq!(first_point(&svg), (60.0, 50.0));
    }

    #[test]
    fn test_transforms_apply_at_point_time() {
        let mut canvas = SvgCanvas::new(100, 100);
        canvas.save();
        canvas.translate(30.0, 40.0);
        canvas.scale(2.0, 2.0);
        canvas.arc(0.0, 0.0, 5.0, Radians(0.0), Radians(PI));
        canvas.restore();
        // restore does not move points already in the path
        canvas.stroke();
        let svg = canvas.finish();
        assert_eq!(first_point(&svg), (40.0, 40.0));
        assert!(svg.contains("stroke-width=\"2.000\""));
    }

    #[test]
    fn test_stroke_width_follows_scale() {
        let mut canvas = SvgCanvas::new(100, 100);
        canvas.scale(10.0, 10.0);
        canvas.set_line_width(0.5);
        canvas.arc(0.0, 0.0, 1.0, Radians(0.0), Radians(1.0));
        canvas.stroke();
        assert!(canvas.finish().contains("stroke-width=\"5.000\""));
    }

    fn second_point(svg: &str) -> (f64, f64) {
        let start = svg.find(" L").map(|i| i + 2).unwrap();
        let coords: Vec<f64> = svg[start..]
            .split(|c: char| c == ' ' || c == 'L' || c == '"')
            .filter(|s| !s.is_empty())
            .take(2)
            .map(|s| s.parse().unwrap())
            .collect();
        (coords[0], coords[1])
    }

    #[test]
    fn test_arc_directions() {
        let mut ccw = SvgCanvas::new(100, 100);
        ccw.arc(0.0, 0.0, 10.0, Radians(0.0), Radians(PI / 2.0));
        ccw.stroke();
        assert!(second_point(&ccw.finish()).1 > 0.0);

        // clockwise to +90° goes the long way through -y
        let mut cw = SvgCanvas::new(100, 100);
        cw.arc_negative(0.0, 0.0, 10.0, Radians(0.0), Radians(PI / 2.0));
        cw.stroke();
        let svg = cw.finish();
        assert_eq!(first_point(&svg), (10.0, 0.0));
        assert!(second_point(&svg).1 < 0.0);
        assert_eq!(svg.matches(" L").count(), 96);
    }

    #[test]
    fn test_huge_sweep_is_capped() {
        let mut canvas = SvgCanvas::new(100, 100);
        canvas.arc(0.0, 0.0, 1.0, Radians(0.0), Radians(1e9));
        canvas.arc_negative(0.0, 0.0, 1.0, Radians(0.0), Radians(-1e9));
        canvas.stroke();
        // two turns each at most
        let segments = canvas.finish().matches(" L").count();
        assert!(segments <= 2 * 2 * SEGMENTS_PER_TURN as usize + 1, "{segments}");
    }

    #[test]
    fn test_empty_fill_emits_nothing() {
        let mut canvas = SvgCanvas::new(10, 10);
        canvas.fill();
        canvas.stroke();
        canvas.restore();
        assert!(!canvas.finish().contains("<path"));
    }
}
