//! Orbital state → drawing directives
//!
//! [`RenderAdapter::plan`] resolves each body into a shaded disc and an orbit
//! stroke in AU; [`RenderAdapter::draw`] replays that plan onto a [`Canvas`]
//! under the viewport transform from the theme.

use orrery_core::constants::{KM_TO_AU, SUN_RADIUS_KM};
use orrery_core::{Color, Point2D, Radians};
use orrery_sim::{eccentric_anomaly, project, shape, Body, BodyId, OrbitalElements};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::theme::{Palette, Theme};

/// Output surface size in device units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Shaded disc at a heliocentric position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscPlacement {
    /// `None` for the Sun
    pub body: Option<BodyId>,
    /// AU
    pub position: Point2D,
    /// Orientation of the lit hemisphere
    pub rotation: Radians,
    /// AU, already scaled by the theme
    pub radius_au: f64,
    pub palette: Palette,
    /// Draw the lit/unlit split
    pub shaded: bool,
}

/// Orbit ellipse stroke
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitStroke {
    pub body: BodyId,
    pub semi_major_axis_au: f64,
    pub semi_minor_axis_au: f64,
    pub focus_offset_au: f64,
    /// Major-axis angle in the display frame
    pub rotation: Radians,
    pub color: Color,
    pub width: f64,
}

/// Everything one render pass needs, in AU
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub background: Color,
    pub sun: DiscPlacement,
    pub orbits: Vec<OrbitStroke>,
    pub bodies: Vec<DiscPlacement>,
}

/// Rotation that turns a disc's +y hemisphere towards the Sun
pub fn disc_rotation(position: Point2D) -> Radians {
    let angle = PI - position.y.atan2(position.x);
    Radians(-(angle + FRAC_PI_2))
}

pub struct RenderAdapter<'a> {
    theme: &'a Theme,
}

impl<'a> RenderAdapter<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        self.theme
    }

    /// Resolve a frame of (body, current elements) pairs; bodies without a palette are skipped
    pub fn plan<'b, I>(&self, frame: I) -> FramePlan
    where
        I: IntoIterator<Item = (&'b Body, OrbitalElements)>,
    {
        let theme = self.theme;
        let mut orbits = Vec::new();
        let mut bodies = Vec::new();

        for (body, elements) in frame {
            let Some(palette) = theme.palette(body.id) else {
                warn!(body = body.name(), "no palette configured, skipping");
                continue;
            };

            let ea = eccentric_anomaly(elements.mean_anomaly(), elements.eccentricity);
            let position = project(&elements, ea);
            let orbit = shape(&elements);
            debug!(body = body.name(), x = position.x, y = position.y, "placing body");

            orbits.push(OrbitStroke {
                body: body.id,
                semi_major_axis_au: orbit.semi_major_axis_au,
                semi_minor_axis_au: orbit.semi_minor_axis_au,
                focus_offset_au: orbit.focus_offset_au,
                rotation: orbit.display_rotation().to_radians(),
                color: theme.orbit_line,
                width: theme.orbit_line_width,
            });

            bodies.push(DiscPlacement {
                body: Some(body.id),
                position,
                rotation: disc_rotation(position),
                radius_au: body.radius_km * KM_TO_AU * theme.planet_scale,
                palette: *palette,
                shaded: true,
            });
        }

        FramePlan {
            background: theme.background,
            sun: DiscPlacement {
                body: None,
                position: Point2D::ORIGIN,
                rotation: Radians::ZERO,
                radius_au: SUN_RADIUS_KM * KM_TO_AU * theme.sun_scale,
                palette: theme.sun,
                shaded: false,
            },
            orbits,
            bodies,
        }
    }

    /// Issue the directives for `plan`: background, orbits, Sun, then bodies
    pub fn draw<C: Canvas + ?Sized>(&self, plan: &FramePlan, viewport: Viewport, canvas: &mut C) {
        let view = &self.theme.view;

        canvas.save();
        canvas.set_source(plan.background);
        canvas.paint();

        // heliocentric AU frame, y up
        canvas.scale(viewport.height, viewport.height);
        canvas.translate(view.sun_position[0] * viewport.aspect_ratio(), view.sun_position[1]);
        canvas.scale(view.au_scale, -view.au_scale);

        for orbit in &plan.orbits {
            draw_orbit(canvas, orbit);
        }

        draw_disc(canvas, &plan.sun);
        for disc in &plan.bodies {
            draw_disc(canvas, disc);
        }

        canvas.restore();
    }

    pub fn render<'b, C, I>(&self, frame: I, viewport: Viewport, canvas: &mut C) -> FramePlan
    where
        C: Canvas + ?Sized,
        I: IntoIterator<Item = (&'b Body, OrbitalElements)>,
    {
        let plan = self.plan(frame);
        self.draw(&plan, viewport, canvas);
        plan
    }
}

fn draw_orbit<C: Canvas + ?Sized>(canvas: &mut C, orbit: &OrbitStroke) {
    canvas.save();
    canvas.rotate(orbit.rotation);
    canvas.translate(-orbit.focus_offset_au, 0.0);
    canvas.scale(orbit.semi_major_axis_au, orbit.semi_minor_axis_au);
    canvas.arc(0.0, 0.0, 1.0, Radians::ZERO, Radians(TAU));
    canvas.close_path();
    canvas.restore();

    canvas.save();
    canvas.set_source(orbit.color);
    canvas.set_line_width(orbit.width);
    canvas.stroke();
    canvas.restore();
}

fn draw_disc<C: Canvas + ?Sized>(canvas: &mut C, disc: &DiscPlacement) {
    let r = disc.radius_au;

    canvas.save();
    canvas.translate(disc.position.x, disc.position.y);
    canvas.rotate(disc.rotation);

    canvas.set_source(disc.palette.lit());
    canvas.arc(0.0, 0.0, r, Radians::ZERO, Radians(TAU));
    canvas.fill();

    if disc.shaded {
        // night hemisphere faces away from the Sun (-y)
        canvas.set_source(disc.palette.unlit());
        canvas.arc(0.0, 0.0, r, Radians(PI), Radians(TAU));
        canvas.close_path();
        canvas.fill();

        canvas.save();
        canvas.scale(1.0, 0.5);
        canvas.set_source(disc.palette.terminator());
        canvas.arc_negative(0.0, 0.0, r, Radians::ZERO, Radians(PI));
        canvas.close_path();
        canvas.fill();
        canvas.restore();
    }

    canvas.restore();
}
