use crate::color::{Palette, PaletteSlot};

// ============================================================================
// INDEXED SURFACE
// ============================================================================

/// 2-D grid of palette slots addressed by signed pixel coordinates.
pub trait IndexedSurface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Returns `None` outside the surface.
    fn get(&self, x: i32, y: i32) -> Option<PaletteSlot>;

    /// Writes outside the surface are ignored.
    fn set(&mut self, x: i32, y: i32, slot: PaletteSlot);

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }
}

/// Owned row-major surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    cells: Vec<PaletteSlot>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![PaletteSlot::Background; width * height],
        }
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y).then(|| y as usize * self.width + x as usize)
    }

    /// Iterates every cell as `(x, y, slot)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, PaletteSlot)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &slot)| ((i % width) as i32, (i / width) as i32, slot))
    }

    pub fn count(&self, slot: PaletteSlot) -> usize {
        self.cells.iter().filter(|&&s| s == slot).count()
    }

    /// Composes the surface into an RGBA8 frame with its top-left at `(left, top)`.
    pub fn blit(&self, palette: &Palette, frame: &mut [u8], frame_width: usize, left: i32, top: i32) {
        if frame_width == 0 {
            return;
        }
        let frame_height = frame.len() / (frame_width * 4);
        for (x, y, slot) in self.cells() {
            let fx = left + x;
            let fy = top + y;
            if fx < 0 || fy < 0 || fx as usize >= frame_width || fy as usize >= frame_height {
                continue;
            }
            let idx = (fy as usize * frame_width + fx as usize) * 4;
            frame[idx..idx + 4].copy_from_slice(&palette.color(slot).as_rgba());
        }
    }
}

impl IndexedSurface for Bitmap {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get(&self, x: i32, y: i32) -> Option<PaletteSlot> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    fn set(&mut self, x: i32, y: i32, slot: PaletteSlot) {
        if let Some(i) = self.offset(x, y) {
            self.cells[i] = slot;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut bitmap = Bitmap::new(3, 2);
        bitmap.set(-1, 0, PaletteSlot::Fill);
        bitmap.set(3, 1, PaletteSlot::Fill);
        bitmap.set(0, 2, PaletteSlot::Fill);
        assert_eq!(bitmap.count(PaletteSlot::Fill), 0);
        assert_eq!(bitmap.get(3, 0), None);
        assert_eq!(bitmap.get(-1, -1), None);
    }

    #[test]
    fn set_then_get() {
        let mut bitmap = Bitmap::new(4, 4);
        bitmap.set(2, 3, PaletteSlot::Outline);
        assert_eq!(bitmap.get(2, 3), Some(PaletteSlot::Outline));
        assert_eq!(bitmap.get(3, 2), Some(PaletteSlot::Background));
    }

    #[test]
    fn blit_clips_to_frame() {
        let mut bitmap = Bitmap::new(2, 2);
        bitmap.set(1, 1, PaletteSlot::Fill);
        let palette = Palette::new(Color::BLACK, Color::WHITE, Color::RED);
        let mut frame = vec![7u8; 3 * 3 * 4];
        bitmap.blit(&palette, &mut frame, 3, 2, 2);

        // only the top-left cell of the bitmap lands inside the frame
        assert_eq!(&frame[(2 * 3 + 2) * 4..(2 * 3 + 2) * 4 + 4], &[0, 0, 0, 0xff]);
        assert!(frame[..(2 * 3 + 2) * 4].iter().all(|&b| b == 7));
    }

    #[test]
    fn blit_resolves_slots_through_palette() {
        let mut bitmap = Bitmap::new(2, 1);
        bitmap.set(1, 0, PaletteSlot::Fill);
        let palette = Palette::new(Color::BLACK, Color::WHITE, Color::RED);
        let mut frame = vec![0u8; 2 * 4];
        bitmap.blit(&palette, &mut frame, 2, 0, 0);
        assert_eq!(frame, vec![0, 0, 0, 0xff, 0xff, 0, 0, 0xff]);
    }
}
