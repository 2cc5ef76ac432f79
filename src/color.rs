// ============================================================================
// COLOR & PALETTE
// ============================================================================

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const GREEN: Color = Color::new(0x00, 0xff, 0x00);
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` integer; the top byte is ignored.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn as_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Color::from_hex(hex)
    }
}

/// Index stored in every surface cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum PaletteSlot {
    #[default]
    Background = 0,
    Outline = 1,
    Fill = 2,
}

impl PaletteSlot {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Three-entry color table indexed by [`PaletteSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: [Color; 3],
}

impl Palette {
    pub const fn new(background: Color, outline: Color, fill: Color) -> Self {
        Self {
            colors: [background, outline, fill],
        }
    }

    pub fn color(&self, slot: PaletteSlot) -> Color {
        self.colors[slot.index()]
    }

    pub fn set_color(&mut self, slot: PaletteSlot, color: Color) {
        self.colors[slot.index()] = color;
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Color::BLACK, Color::WHITE, Color::GREEN)
    }
}
