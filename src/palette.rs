//! The 256-colour RGB palette used to interpret indexed pixels.

use crate::error::{Result, WadError};

const COLOUR_COUNT: usize = 256;
const PALETTE_BYTES: usize = COLOUR_COUNT * 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WadColour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// 256 colours, indexed by pixel value. No alpha is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadPalette(pub [WadColour; COLOUR_COUNT]);

impl WadPalette {
    /// Decode the first palette in the lump. PLAYPAL carries several
    /// back to back (damage and bonus flashes); only the first is
    /// needed for rendering at rest, and only it is read here.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < PALETTE_BYTES {
            return Err(WadError::Format(format!(
                "palette lump is {} bytes, need {PALETTE_BYTES}",
                data.len()
            )));
        }
        let mut colours = [WadColour::default(); COLOUR_COUNT];
        for (i, rgb) in data[..PALETTE_BYTES].chunks_exact(3).enumerate() {
            colours[i] = WadColour {
                r: rgb[0],
                g: rgb[1],
                b: rgb[2],
            };
        }
        Ok(WadPalette(colours))
    }

    pub fn colour(&self, index: u8) -> WadColour {
        self.0[index as usize]
    }
}
