//! Render adapter between the orbital core and 2D drawing backends

pub mod adapter;
pub mod canvas;
pub mod svg;
pub mod theme;

pub use adapter::{disc_rotation, DiscPlacement, FramePlan, OrbitStroke, RenderAdapter, Viewport};
pub use canvas::{Canvas, DrawCommand, RecordingCanvas};
pub use svg::SvgCanvas;
pub use theme::{Palette, Theme, ThemeError, ViewConfig};
