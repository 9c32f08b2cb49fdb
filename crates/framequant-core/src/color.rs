//! RGB color values and packed pixel helpers
//!
//! # Packed format
//!
//! Packed 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in
//! LSB). The quantizer ignores alpha; composing always sets it to 255.

/// Shift amounts for extracting color channels from a packed pixel
pub const RED_SHIFT: u32 = 24;
pub const GREEN_SHIFT: u32 = 16;
pub const BLUE_SHIFT: u32 = 8;
pub const ALPHA_SHIFT: u32 = 0;

/// An RGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Rgb {
    /// Red component
    pub red: u8,
    /// Green component
    pub green: u8,
    /// Blue component
    pub blue: u8,
}

impl Rgb {
    /// Black (0, 0, 0)
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a new color
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a gray color
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Build a color from a packed `0xRRGGBBAA` pixel, dropping alpha.
    #[inline]
    pub fn from_packed(pixel: u32) -> Self {
        Self::new(
            ((pixel >> RED_SHIFT) & 0xff) as u8,
            ((pixel >> GREEN_SHIFT) & 0xff) as u8,
            ((pixel >> BLUE_SHIFT) & 0xff) as u8,
        )
    }

    /// Compose a packed `0xRRGGBBAA` pixel (alpha = 255).
    #[inline]
    pub fn to_packed(self) -> u32 {
        ((self.red as u32) << RED_SHIFT)
            | ((self.green as u32) << GREEN_SHIFT)
            | ((self.blue as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Channels as a tuple.
    #[inline]
    pub fn to_tuple(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Squared Euclidean distance in RGB space.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.red as i32 - other.red as i32;
        let dg = self.green as i32 - other.green as i32;
        let db = self.blue as i32 - other.blue as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.red, color.green, color.blue]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_layout() {
        let c = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_packed(), 0x123456ff);
        assert_eq!(Rgb::from_packed(0x12345600), c);
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(Rgb::BLACK.distance_squared(Rgb::BLACK), 0);
        assert_eq!(Rgb::new(1, 2, 3).distance_squared(Rgb::new(4, 6, 3)), 25);
        assert_eq!(Rgb::BLACK.distance_squared(Rgb::WHITE), 3 * 255 * 255);
    }

    #[test]
    fn test_conversions() {
        let c: Rgb = (9, 8, 7).into();
        assert_eq!(c, Rgb::from([9, 8, 7]));
        assert_eq!(<[u8; 3]>::from(c), [9, 8, 7]);
        assert_eq!(Rgb::gray(5).to_tuple(), (5, 5, 5));
    }
}
