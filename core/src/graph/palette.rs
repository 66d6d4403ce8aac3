use serde::{Deserialize, Serialize};

/// Stroke and fill colour of a curve, both packed as `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphColor {
    pub primary: u32,
    pub background: u32,
}

impl GraphColor {
    pub const fn new(primary: u32, background: u32) -> Self {
        Self {
            primary,
            background,
        }
    }

    /// Reserved for the network the device is connected to.
    pub const CONNECTED: GraphColor = GraphColor::new(0xFF00_00FF, 0x3300_00FF);
    /// Reserved for layout-only curves.
    pub const TRANSPARENT: GraphColor = GraphColor::new(0x0000_0000, 0x0000_0000);

    /// Splits a packed channel into `[r, g, b, a]`.
    pub fn rgba(value: u32) -> [u8; 4] {
        [
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
            ((value >> 24) & 0xFF) as u8,
        ]
    }
}

/// Rotation handed out to non-connected curves, in order.
pub const PALETTE: [GraphColor; 10] = [
    GraphColor::new(0xFFFB_1554, 0x33FB_1554),
    GraphColor::new(0xFF74_DF00, 0x3374_DF00),
    GraphColor::new(0xFFFF_6F00, 0x33FF_6F00),
    GraphColor::new(0xFF8B_008B, 0x338B_008B),
    GraphColor::new(0xFFFF_D600, 0x33FF_D600),
    GraphColor::new(0xFF00_B8D4, 0x3300_B8D4),
    GraphColor::new(0xFF79_5548, 0x3379_5548),
    GraphColor::new(0xFF00_897B, 0x3300_897B),
    GraphColor::new(0xFFAA_00FF, 0x33AA_00FF),
    GraphColor::new(0xFF9E_9E9E, 0x339E_9E9E),
];

/// Cyclic colour assignment, one instance per view.
#[derive(Debug, Clone, Default)]
pub struct ColorPalette {
    next: usize,
}

impl ColorPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colour the next curve gets. Stays put until [`advance`](Self::advance).
    pub fn peek_color(&self) -> GraphColor {
        PALETTE[self.next % PALETTE.len()]
    }

    /// Moves the rotation on; wraps around once every entry was used.
    pub fn advance(&mut self) {
        self.next = (self.next + 1) % PALETTE.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_after_exhaustion() {
        let mut palette = ColorPalette::new();
        let first_round: Vec<GraphColor> = (0..PALETTE.len())
            .map(|_| {
                let color = palette.peek_color();
                palette.advance();
                color
            })
            .collect();
        assert_eq!(first_round, PALETTE.to_vec());
        assert_eq!(palette.peek_color(), PALETTE[0]);
        palette.advance();
        assert_eq!(palette.peek_color(), PALETTE[1]);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut palette = ColorPalette::new();
        assert_eq!(palette.peek_color(), PALETTE[0]);
        assert_eq!(palette.peek_color(), PALETTE[0]);
        palette.advance();
        assert_eq!(palette.peek_color(), PALETTE[1]);
    }

    #[test]
    fn reserved_colours_stay_out_of_rotation() {
        assert!(!PALETTE.contains(&GraphColor::CONNECTED));
        assert!(!PALETTE.contains(&GraphColor::TRANSPARENT));
    }

    #[test]
    fn rgba_unpacks_argb() {
        assert_eq!(GraphColor::rgba(0x3300_00FF), [0, 0, 255, 0x33]);
    }
}
