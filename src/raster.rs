use crate::color::PaletteSlot;
use crate::surface::IndexedSurface;

// ============================================================================
// CIRCLE RASTERIZER
// ============================================================================

/// Last octant point drawn by [`sweep_arc`], relative to the circle center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArcEnd {
    pub x: i32,
    pub y: i32,
}

/// Midpoint circle around `(origin, origin)` drawing six octants.
///
/// The two octants straddling the downward axis are skipped, which leaves a
/// 90 degree opening at the bottom. Returns the final `(x, y)` step so the
/// caller can close the opening with straight segments.
pub fn sweep_arc<S: IndexedSurface>(surface: &mut S, origin: i32, radius: i32, slot: PaletteSlot) -> ArcEnd {
    let mut x = 0;
    let mut y = radius;
    let mut d = 3 - 2 * radius;
    let mut end = ArcEnd::default();

    while x <= y {
        for (px, py) in [(-x, -y), (x, -y), (y, x), (-y, x), (-y, -x), (y, -x)] {
            surface.set(origin + px, origin + py, slot);
        }
        end = ArcEnd { x, y };

        if d <= 0 {
            d += 4 * x + 6;
        } else {
            d += 4 * (x - y) + 10;
            y -= 1;
        }
        x += 1;
    }

    end
}

// ============================================================================
// LINES
// ============================================================================

/// Bresenham walk from one point to another, both endpoints included.
#[derive(Debug, Clone)]
pub struct LinePoints {
    x: i32,
    y: i32,
    x1: i32,
    y1: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl LinePoints {
    pub fn new(from: (i32, i32), to: (i32, i32)) -> Self {
        let dx = (to.0 - from.0).abs();
        let dy = -(to.1 - from.1).abs();
        Self {
            x: from.0,
            y: from.1,
            x1: to.0,
            y1: to.1,
            dx,
            dy,
            sx: if from.0 < to.0 { 1 } else { -1 },
            sy: if from.1 < to.1 { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for LinePoints {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let point = (self.x, self.y);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
        } else {
            let e2 = 2 * self.err;
            if e2 >= self.dy {
                self.err += self.dy;
                self.x += self.sx;
            }
            if e2 <= self.dx {
                self.err += self.dx;
                self.y += self.sy;
            }
        }
        Some(point)
    }
}

pub fn draw_line<S: IndexedSurface>(surface: &mut S, from: (i32, i32), to: (i32, i32), slot: PaletteSlot) {
    for (x, y) in LinePoints::new(from, to) {
        surface.set(x, y, slot);
    }
}

// ============================================================================
// REGION FILL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Four,
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Four => &[(1, 0), (-1, 0), (0, 1), (0, -1)],
            Connectivity::Eight => &[
                (1, 0),
                (-1, 0),
                (0, 1),
                (0, -1),
                (1, 1),
                (1, -1),
                (-1, 1),
                (-1, -1),
            ],
        }
    }
}

/// Repaints the `source` region connected to `seed` with `target`.
///
/// Only pixels accepted by `within` are visited. Returns the number of pixels
/// painted, zero when the seed itself is not eligible.
pub fn flood_fill<S, F>(
    surface: &mut S,
    seed: (i32, i32),
    source: PaletteSlot,
    target: PaletteSlot,
    connectivity: Connectivity,
    within: F,
) -> usize
where
    S: IndexedSurface,
    F: Fn(i32, i32) -> bool,
{
    if source == target {
        return 0;
    }

    let mut painted = 0;
    let mut stack = vec![seed];
    while let Some((x, y)) = stack.pop() {
        if surface.get(x, y) != Some(source) || !within(x, y) {
            continue;
        }
        surface.set(x, y, target);
        painted += 1;
        stack.extend(connectivity.offsets().iter().map(|(dx, dy)| (x + dx, y + dy)));
    }
    painted
}

/// Set of surface coordinates, sized like the surface it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
    len: usize,
}

impl Mask {
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
            len: 0,
        }
    }

    /// Collects the `slot` regions connected to `seeds` without repainting them.
    pub fn flood<S, I>(surface: &S, seeds: I, slot: PaletteSlot, connectivity: Connectivity) -> Self
    where
        S: IndexedSurface,
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut mask = Self::empty(surface.width(), surface.height());
        let mut stack: Vec<(i32, i32)> = seeds.into_iter().collect();
        while let Some((x, y)) = stack.pop() {
            if surface.get(x, y) != Some(slot) || mask.contains(x, y) {
                continue;
            }
            mask.insert(x, y);
            stack.extend(connectivity.offsets().iter().map(|(dx, dy)| (x + dx, y + dy)));
        }
        mask
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height)
            .then(|| y as usize * self.width + x as usize)
    }

    pub fn insert(&mut self, x: i32, y: i32) {
        if let Some(i) = self.offset(x, y) {
            if !self.bits[i] {
                self.bits[i] = true;
                self.len += 1;
            }
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.offset(x, y).is_some_and(|i| self.bits[i])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width;
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &set)| set)
            .map(move |(i, _)| ((i % width) as i32, (i / width) as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Bitmap;

    fn outline_points(bitmap: &Bitmap) -> Vec<(i32, i32)> {
        bitmap
            .cells()
            .filter(|&(_, _, slot)| slot == PaletteSlot::Outline)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn arc_is_mirrored_left_to_right() {
        let radius = 15;
        let mut bitmap = Bitmap::new(31, 31);
        sweep_arc(&mut bitmap, radius, radius, PaletteSlot::Outline);
        for (x, y) in outline_points(&bitmap) {
            assert_eq!(bitmap.get(2 * radius - x, y), Some(PaletteSlot::Outline), "({x}, {y})");
        }
    }

    #[test]
    fn arc_leaves_bottom_open() {
        let radius = 20;
        let mut bitmap = Bitmap::new(41, 41);
        sweep_arc(&mut bitmap, radius, radius, PaletteSlot::Outline);
        // straight down from the center and the two points 30 degrees either side
        assert_eq!(bitmap.get(radius, 2 * radius), Some(PaletteSlot::Background));
        assert_eq!(bitmap.get(radius + 10, radius + 17), Some(PaletteSlot::Background));
        assert_eq!(bitmap.get(radius - 10, radius + 17), Some(PaletteSlot::Background));
        // top and both sides are drawn
        assert_eq!(bitmap.get(radius, 0), Some(PaletteSlot::Outline));
        assert_eq!(bitmap.get(0, radius), Some(PaletteSlot::Outline));
        assert_eq!(bitmap.get(2 * radius, radius), Some(PaletteSlot::Outline));
    }

    #[test]
    fn arc_end_lies_on_the_diagonal() {
        let mut bitmap = Bitmap::new(64, 64);
        let end = sweep_arc(&mut bitmap, 30, 30, PaletteSlot::Outline);
        assert!(end.x <= end.y);
        assert!((end.x - end.y).abs() <= 1);
        let dist = ((end.x * end.x + end.y * end.y) as f64).sqrt();
        assert!((dist - 30.0).abs() < 1.0);
    }

    #[test]
    fn unit_arc_ends_at_axis() {
        let mut bitmap = Bitmap::new(3, 3);
        let end = sweep_arc(&mut bitmap, 1, 1, PaletteSlot::Outline);
        assert_eq!(end, ArcEnd { x: 0, y: 1 });
        assert_eq!(bitmap.get(1, 0), Some(PaletteSlot::Outline));
        assert_eq!(bitmap.get(0, 1), Some(PaletteSlot::Outline));
        assert_eq!(bitmap.get(2, 1), Some(PaletteSlot::Outline));
    }

    #[test]
    fn line_includes_both_endpoints() {
        let points: Vec<_> = LinePoints::new((0, 0), (5, 2)).collect();
        assert_eq!(points.first(), Some(&(0, 0)));
        assert_eq!(points.last(), Some(&(5, 2)));
        assert_eq!(points.len(), 6);
    }

    #[test]
    fn line_steps_are_eight_connected() {
        let points: Vec<_> = LinePoints::new((7, -3), (-4, 9)).collect();
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!((a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1);
        }
    }

    #[test]
    fn degenerate_line_is_one_point() {
        let points: Vec<_> = LinePoints::new((3, 3), (3, 3)).collect();
        assert_eq!(points, vec![(3, 3)]);
    }

    #[test]
    fn fill_stops_at_walls_and_predicate() {
        let mut bitmap = Bitmap::new(10, 10);
        draw_line(&mut bitmap, (5, 0), (5, 9), PaletteSlot::Outline);
        let painted = flood_fill(
            &mut bitmap,
            (1, 1),
            PaletteSlot::Background,
            PaletteSlot::Fill,
            Connectivity::Four,
            |_, y| y < 5,
        );
        assert_eq!(painted, 25);
        assert_eq!(bitmap.get(6, 1), Some(PaletteSlot::Background));
        assert_eq!(bitmap.get(1, 6), Some(PaletteSlot::Background));
    }

    #[test]
    fn eight_connected_fill_crosses_diagonal_gaps() {
        let mut bitmap = Bitmap::new(6, 6);
        draw_line(&mut bitmap, (0, 5), (5, 0), PaletteSlot::Outline);
        let four = {
            let mut copy = bitmap.clone();
            flood_fill(&mut copy, (0, 0), PaletteSlot::Background, PaletteSlot::Fill, Connectivity::Four, |_, _| true)
        };
        let eight = flood_fill(
            &mut bitmap,
            (0, 0),
            PaletteSlot::Background,
            PaletteSlot::Fill,
            Connectivity::Eight,
            |_, _| true,
        );
        assert_eq!(four, 15);
        assert_eq!(eight, 30);
    }

    #[test]
    fn ineligible_seed_paints_nothing() {
        let mut bitmap = Bitmap::new(4, 4);
        bitmap.set(0, 0, PaletteSlot::Outline);
        let painted = flood_fill(
            &mut bitmap,
            (0, 0),
            PaletteSlot::Background,
            PaletteSlot::Fill,
            Connectivity::Eight,
            |_, _| true,
        );
        assert_eq!(painted, 0);
        assert_eq!(bitmap.count(PaletteSlot::Fill), 0);
    }

    #[test]
    fn mask_flood_leaves_surface_untouched() {
        let mut bitmap = Bitmap::new(8, 8);
        draw_line(&mut bitmap, (0, 3), (7, 3), PaletteSlot::Outline);
        let before = bitmap.clone();
        let mask = Mask::flood(&bitmap, [(2, 1)], PaletteSlot::Background, Connectivity::Four);
        assert_eq!(bitmap, before);
        assert_eq!(mask.len(), 24);
        assert!(mask.contains(7, 0));
        assert!(!mask.contains(0, 3));
        assert!(!mask.contains(0, 4));
        assert_eq!(mask.iter().count(), 24);
    }
}
