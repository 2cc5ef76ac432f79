use log::{debug, warn};

use crate::color::{Color, Palette, PaletteSlot};
use crate::config::GaugeConfig;
use crate::error::GaugeError;
use crate::geometry::{Direction, RingGeometry, MAX_LEVEL};
use crate::raster::{draw_line, flood_fill, sweep_arc, ArcEnd, Connectivity, LinePoints, Mask};
use crate::surface::{Bitmap, IndexedSurface};

/// Thinner rings cannot hold a boundary line.
pub const MIN_THICKNESS: u32 = 2;

/// Largest radius whose surface fits comfortably in memory.
pub const MAX_RADIUS: u32 = 4096;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Command enum for type-safe gauge updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeCommand {
    SetLevel(u8),
    SetForeground(Color),
    SetBackground(Color),
    SetOutline(Color),
}

/// Pixels touched by one level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Repaint {
    pub boundary: usize,
    pub seeds: usize,
    pub filled: usize,
}

impl Repaint {
    pub fn is_empty(&self) -> bool {
        self.boundary == 0 && self.filled == 0
    }
}

/// Ring gauge rendered into an owned indexed surface.
#[derive(Debug, Clone)]
pub struct Gauge {
    center: (i32, i32),
    radius: u32,
    thickness: u32,
    level: u8,
    geometry: RingGeometry,
    palette: Palette,
    surface: Bitmap,
    outer_arc_end: ArcEnd,
    inner_arc_end: ArcEnd,
    interior: Mask,
}

impl Gauge {
    pub fn new(config: GaugeConfig) -> Result<Self, GaugeError> {
        let radius = config.radius;
        let thickness = config.thickness.max(MIN_THICKNESS);
        if thickness != config.thickness {
            debug!("thickness {} raised to {}", config.thickness, thickness);
        }
        if radius > MAX_RADIUS {
            return Err(GaugeError::RadiusTooLarge(radius));
        }
        if thickness > radius {
            return Err(GaugeError::ThicknessExceedsRadius { radius, thickness });
        }
        if config.level > MAX_LEVEL {
            return Err(GaugeError::LevelOutOfRange(config.level));
        }

        // bounded above by MAX_RADIUS
        let r = radius as i32;
        let t = thickness as i32;
        let width = 2 * radius as usize + 1;
        let height = (0.71 * f64::from(radius)).ceil() as usize + radius as usize + 1;

        let geometry = RingGeometry::new(r, t);
        let mut surface = Bitmap::new(width, height);
        let outer_arc_end = sweep_arc(&mut surface, r, r, PaletteSlot::Outline);
        let inner_arc_end = sweep_arc(&mut surface, r, geometry.inner_radius(), PaletteSlot::Outline);
        connect_arcs(&mut surface, r, outer_arc_end, inner_arc_end);
        let interior = seal_interior(&surface, r);

        debug!(
            "gauge at ({}, {}) radius {} thickness {}: {}x{} surface, {} interior pixels",
            config.center_x,
            config.center_y,
            radius,
            thickness,
            width,
            height,
            interior.len()
        );

        let mut gauge = Self {
            center: (config.center_x, config.center_y),
            radius,
            thickness,
            level: 0,
            geometry,
            palette: Palette::new(config.background_color, config.outline_color, config.foreground_color),
            surface,
            outer_arc_end,
            inner_arc_end,
            interior,
        };
        match gauge.set_level(config.level) {
            Ok(_) | Err(GaugeError::SeedNotFound { .. }) => Ok(gauge),
            Err(err) => Err(err),
        }
    }

    /// Moves the fill boundary to `level`, repainting only the swept band.
    ///
    /// Setting the current level again is a no-op. On `SeedNotFound` the new
    /// level and its boundary line are already in place.
    pub fn set_level(&mut self, level: u8) -> Result<Repaint, GaugeError> {
        if level > MAX_LEVEL {
            return Err(GaugeError::LevelOutOfRange(level));
        }
        let previous = self.level;
        if level == previous {
            return Ok(Repaint::default());
        }
        self.level = level;

        let direction = Direction::between(previous, level);
        let (source, target) = match direction {
            Direction::Advance => (PaletteSlot::Background, PaletteSlot::Fill),
            Direction::Regress => (PaletteSlot::Fill, PaletteSlot::Background),
        };

        let geometry = self.geometry;
        let interior = &self.interior;
        let surface = &mut self.surface;
        let changed = |x: i32, y: i32| {
            interior.contains(x, y) && geometry.is_filled(x, y, previous) != geometry.is_filled(x, y, level)
        };

        let mut repaint = Repaint::default();
        if direction.draws_boundary(level) {
            let (outer, inner) = geometry.boundary_line(level);
            for (x, y) in LinePoints::new(outer, inner).filter(|&(x, y)| changed(x, y)) {
                surface.set(x, y, target);
                repaint.boundary += 1;
            }
        }

        let primary = geometry
            .primary_candidates(level, direction)
            .find(|&(x, y)| changed(x, y) && surface.get(x, y) == Some(source));
        // Candidates already painted by an earlier seed fill nothing and are not counted.
        for seed in primary.into_iter().chain(geometry.coverage_candidates(previous, level)) {
            let painted = flood_fill(&mut *surface, seed, source, target, Connectivity::Eight, &changed);
            if painted > 0 {
                repaint.seeds += 1;
                repaint.filled += painted;
            }
        }

        if repaint.seeds == 0 && geometry.expects_seed(previous, level) {
            warn!("level {} -> {}: no seed pixel in the swept band", previous, level);
            return Err(GaugeError::SeedNotFound {
                level,
                radius: geometry.seed_radius(),
            });
        }

        debug!("level {} -> {}: {:?}", previous, level, repaint);
        Ok(repaint)
    }

    pub fn apply(&mut self, command: GaugeCommand) -> Result<Repaint, GaugeError> {
        match command {
            GaugeCommand::SetLevel(level) => self.set_level(level),
            GaugeCommand::SetForeground(color) => {
                self.set_foreground_color(color);
                Ok(Repaint::default())
            }
            GaugeCommand::SetBackground(color) => {
                self.set_background_color(color);
                Ok(Repaint::default())
            }
            GaugeCommand::SetOutline(color) => {
                self.set_outline_color(color);
                Ok(Repaint::default())
            }
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn foreground_color(&self) -> Color {
        self.palette.color(PaletteSlot::Fill)
    }

    pub fn set_foreground_color(&mut self, color: Color) {
        self.palette.set_color(PaletteSlot::Fill, color);
    }

    pub fn background_color(&self) -> Color {
        self.palette.color(PaletteSlot::Background)
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.palette.set_color(PaletteSlot::Background, color);
    }

    pub fn outline_color(&self) -> Color {
        self.palette.color(PaletteSlot::Outline)
    }

    pub fn set_outline_color(&mut self, color: Color) {
        self.palette.set_color(PaletteSlot::Outline, color);
    }

    /// Composes the gauge into an RGBA8 frame, centered on `center`.
    pub fn render_into(&self, frame: &mut [u8], frame_width: usize) {
        let r = self.radius as i32;
        self.surface
            .blit(&self.palette, frame, frame_width, self.center.0 - r, self.center.1 - r);
    }

    pub fn center(&self) -> (i32, i32) {
        self.center
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn width(&self) -> usize {
        self.surface.width()
    }

    pub fn height(&self) -> usize {
        self.surface.height()
    }

    pub fn surface(&self) -> &Bitmap {
        &self.surface
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Pixels enclosed by the ring outline.
    pub fn interior(&self) -> &Mask {
        &self.interior
    }

    pub fn outer_arc_end(&self) -> ArcEnd {
        self.outer_arc_end
    }

    pub fn inner_arc_end(&self) -> ArcEnd {
        self.inner_arc_end
    }
}

// ============================================================================
// CONSTRUCTION HELPERS
// ============================================================================

/// Closes the notch side of the ring on both sides.
fn connect_arcs<S: IndexedSurface>(surface: &mut S, origin: i32, outer: ArcEnd, inner: ArcEnd) {
    for sign in [1, -1] {
        draw_line(
            surface,
            (origin + sign * outer.y, origin + outer.x),
            (origin + sign * inner.y, origin + inner.x),
            PaletteSlot::Outline,
        );
    }
}

/// Background pixels cut off from both the surface border and the hub.
fn seal_interior(surface: &Bitmap, origin: i32) -> Mask {
    let width = surface.width() as i32;
    let height = surface.height() as i32;
    let border = (0..width)
        .flat_map(|x| [(x, 0), (x, height - 1)])
        .chain((0..height).flat_map(|y| [(0, y), (width - 1, y)]));
    let outside = Mask::flood(
        surface,
        border.chain([(origin, origin)]),
        PaletteSlot::Background,
        Connectivity::Four,
    );

    let mut interior = Mask::empty(surface.width(), surface.height());
    for (x, y, _) in surface
        .cells()
        .filter(|&(x, y, slot)| slot == PaletteSlot::Background && !outside.contains(x, y))
    {
        interior.insert(x, y);
    }
    interior
}
