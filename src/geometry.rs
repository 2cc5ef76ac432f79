// ============================================================================
// LEVEL-BOUNDARY GEOMETRY
// ============================================================================
//
// Angles are in degrees measured from the downward axis towards the right
// (screen y grows downwards), so 0 points into the notch, 315 is the left end
// of the scale and 45 the right end.

/// Highest accepted level.
pub const MAX_LEVEL: u8 = 100;

/// Boundary angle of level 0.
pub const START_ANGLE: f64 = 315.0;

/// Degrees covered by the full scale.
pub const SWEEP_ANGLE: f64 = 270.0;

/// Extra sweep past a scale end so pixels hugging the connectors get a seed.
const END_MARGIN: f64 = 2.0;

/// Shortest arc, in pixels at the seed radius, that must yield a seed.
const MIN_SEEDED_ARC: f64 = 3.0;

pub fn level_angle(level: u8) -> f64 {
    START_ANGLE - f64::from(level) * SWEEP_ANGLE / f64::from(MAX_LEVEL)
}

/// Whether a pixel at `angle` belongs to the filled sector of `level`.
pub fn in_sector(angle: f64, level: u8) -> bool {
    match level {
        0 => false,
        l if l >= MAX_LEVEL => true,
        _ => angle > level_angle(level),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Advance,
    Regress,
}

impl Direction {
    pub fn between(from: u8, to: u8) -> Self {
        if to > from {
            Direction::Advance
        } else {
            Direction::Regress
        }
    }

    fn sign(self) -> f64 {
        match self {
            Direction::Advance => 1.0,
            Direction::Regress => -1.0,
        }
    }

    /// A full ring needs no boundary; an empty one only when advancing.
    pub fn draws_boundary(self, level: u8) -> bool {
        match self {
            Direction::Advance => level != MAX_LEVEL,
            Direction::Regress => level != 0 && level != MAX_LEVEL,
        }
    }
}

/// Ring dimensions in surface coordinates, centered at `(origin, origin)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingGeometry {
    origin: i32,
    radius: i32,
    thickness: i32,
}

impl RingGeometry {
    pub fn new(radius: i32, thickness: i32) -> Self {
        Self {
            origin: radius,
            radius,
            thickness,
        }
    }

    pub fn inner_radius(&self) -> i32 {
        self.radius - self.thickness + 1
    }

    /// Distance of the primary seed search, halfway into the band.
    pub fn seed_radius(&self) -> i32 {
        self.radius - self.thickness / 2
    }

    pub fn polar(&self, degrees: f64, distance: f64) -> (i32, i32) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        (
            self.origin + (sin * distance).round() as i32,
            self.origin + (cos * distance).round() as i32,
        )
    }

    /// Angle of a surface pixel around the center, in `[0, 360)`.
    pub fn pixel_angle(&self, x: i32, y: i32) -> f64 {
        f64::from(x - self.origin)
            .atan2(f64::from(y - self.origin))
            .to_degrees()
            .rem_euclid(360.0)
    }

    pub fn is_filled(&self, x: i32, y: i32, level: u8) -> bool {
        in_sector(self.pixel_angle(x, y), level)
    }

    /// Segment across the band at the level's angle, outer end first.
    pub fn boundary_line(&self, level: u8) -> ((i32, i32), (i32, i32)) {
        let angle = level_angle(level);
        (
            self.polar(angle, f64::from(self.radius - 1)),
            self.polar(angle, f64::from(self.radius - self.thickness + 2)),
        )
    }

    /// Points just past the new boundary, in the direction of travel.
    pub fn primary_candidates(&self, level: u8, direction: Direction) -> impl Iterator<Item = (i32, i32)> + '_ {
        let angle = level_angle(level);
        let distance = f64::from(self.seed_radius());
        (1..=4).map(move |step| self.polar(angle + direction.sign() * f64::from(step), distance))
    }

    /// Points covering the band between two levels.
    ///
    /// Walks every half-pixel ring radius in half-pixel arc steps, so each
    /// pixel of the swept band is visited at least once.
    pub fn coverage_candidates(&self, from: u8, to: u8) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (a, b) = (level_angle(from), level_angle(to));
        let mut low = a.min(b);
        let mut high = a.max(b);
        if from == MAX_LEVEL || to == MAX_LEVEL {
            low -= END_MARGIN;
        }
        if from == 0 || to == 0 {
            high += END_MARGIN;
        }

        (0..=2 * (self.thickness - 1))
            .map(move |half_steps| f64::from(self.radius) - f64::from(half_steps) * 0.5)
            .filter(|&distance| distance > 0.0)
            .flat_map(move |distance| {
                let step = (0.5 / distance).to_degrees();
                let count = ((high - low) / step) as usize + 1;
                (0..=count).map(move |i| self.polar(low + i as f64 * step, distance))
            })
    }

    /// Whether a move between two levels sweeps enough arc to need a seed.
    ///
    /// Two-pixel rings have adjacent arcs and no band to seed.
    pub fn expects_seed(&self, from: u8, to: u8) -> bool {
        if self.thickness < 3 {
            return false;
        }
        let degrees = f64::from(from.abs_diff(to)) * SWEEP_ANGLE / f64::from(MAX_LEVEL);
        degrees.to_radians() * f64::from(self.seed_radius()) >= MIN_SEEDED_ARC
    }
}
