use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GaugeError {
    #[error("thickness {thickness} leaves no inner arc inside radius {radius}")]
    ThicknessExceedsRadius { radius: u32, thickness: u32 },

    #[error("radius {0} is larger than the supported maximum")]
    RadiusTooLarge(u32),

    #[error("level {0} is outside 0..=100")]
    LevelOutOfRange(u8),

    #[error("no seed pixel found for level {level} at distance {radius}")]
    SeedNotFound { level: u8, radius: i32 },
}
