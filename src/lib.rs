// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod color;
pub mod config;
pub mod error;
pub mod gauge;
pub mod geometry;
pub mod raster;
pub mod surface;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

pub use color::{Color, Palette, PaletteSlot};
pub use config::GaugeConfig;
pub use error::GaugeError;
pub use gauge::{Gauge, GaugeCommand, Repaint};
pub use geometry::MAX_LEVEL;
pub use surface::{Bitmap, IndexedSurface};
