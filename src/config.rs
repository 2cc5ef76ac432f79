use bon::Builder;

use crate::color::Color;

/// Construction parameters for a [`Gauge`](crate::Gauge)
#[derive(Debug, Clone, Builder)]
pub struct GaugeConfig {
    pub center_x: i32,
    pub center_y: i32,
    pub radius: u32,

    // Ring appearance
    #[builder(default = 10)]
    pub thickness: u32,
    #[builder(default = 0)]
    pub level: u8,

    // Palette
    #[builder(default = Color::WHITE)]
    pub outline_color: Color,
    #[builder(default = Color::GREEN)]
    pub foreground_color: Color,
    #[builder(default = Color::BLACK)]
    pub background_color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = GaugeConfig::builder().center_x(60).center_y(50).radius(27).build();
        assert_eq!(config.thickness, 10);
        assert_eq!(config.level, 0);
        assert_eq!(config.outline_color.to_hex(), 0xffffff);
        assert_eq!(config.foreground_color.to_hex(), 0x00ff00);
        assert_eq!(config.background_color.to_hex(), 0x000000);
    }

    #[test]
    fn builder_overrides() {
        let config = GaugeConfig::builder()
            .center_x(0)
            .center_y(0)
            .radius(40)
            .thickness(6)
            .level(75)
            .foreground_color(Color::from_hex(0xff0000))
            .build();
        assert_eq!(config.thickness, 6);
        assert_eq!(config.level, 75);
        assert_eq!(config.foreground_color, Color::RED);
    }
}
