//! Color definitions for species and visual states

use crate::core::types::Species;

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Same color with a different alpha
    pub fn with_alpha(&self, a: f32) -> Self {
        Self { a, ..*self }
    }
}

/// Get the base color for a species
pub fn species_color(species: Species) -> Color {
    match species {
        Species::Shark => Color::rgb8(0x94, 0xa3, 0xb8),  // Slate
        Species::Fish => Color::rgb8(0x38, 0xbd, 0xf8),   // Sky blue
        Species::Shrimp => Color::rgb8(0xfb, 0x71, 0x85), // Coral pink
        Species::Algae => Color::rgb8(0x4a, 0xde, 0x80),  // Green
        Species::Coral => Color::rgb8(0xa7, 0x8b, 0xfa),  // Violet
        Species::Rock => Color::rgb8(0x1e, 0x29, 0x3b),   // Dark slate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_colors_distinct() {
        for (i, a) in Species::ALL.iter().enumerate() {
            for b in &Species::ALL[i + 1..] {
                assert_ne!(species_color(*a), species_color(*b));
            }
        }
    }

    #[test]
    fn test_with_alpha() {
        let c = species_color(Species::Fish).with_alpha(0.3);
        assert_eq!(c.a, 0.3);
        assert_eq!(c.r, species_color(Species::Fish).r);
    }
}
