//! Palette application: an indexed bitmap becomes an RGBA raster.

use crate::compose::ComposedBitmap;
use crate::palette::WadPalette;

/// A row-major raster, 4 bytes (RGBA) per pixel. Writing this out as
/// PNG or anything else is the caller's business.
pub struct RgbaImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbaImage {
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let at = (y * self.width + x) * 4;
        [
            self.data[at],
            self.data[at + 1],
            self.data[at + 2],
            self.data[at + 3],
        ]
    }
}

/// Map every bitmap cell through the palette. Transparent cells become
/// `(0,0,0,0)`, painted cells the palette colour at full alpha.
///
/// The bitmap is column-major, the raster row-major; the transposition
/// happens here and nowhere else.
pub fn render_bitmap(bitmap: &ComposedBitmap, palette: &WadPalette) -> RgbaImage {
    let mut data = Vec::with_capacity(bitmap.width() * bitmap.height() * 4);
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            match bitmap.get(x, y) {
                Some(index) => {
                    let colour = palette.colour(index);
                    data.extend_from_slice(&[colour.r, colour.g, colour.b, 255]);
                }
                None => data.extend_from_slice(&[0, 0, 0, 0]),
            }
        }
    }
    RgbaImage {
        width: bitmap.width(),
        height: bitmap.height(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::WadCache;
    use crate::compose::compose_texture;
    use crate::picture::{PatchColumn, PatchSpan, WadPatch};
    use crate::textures::testlumps::{pnames, textures};
    use crate::textures::load_textures;
    use crate::wad::testwad::build;
    use crate::wad::{LumpLookup, WadData, PALETTE_LUMP};

    /// Whole pipeline over a synthetic archive: directory, palette,
    /// PNAMES, patch decode, texture decode, composition, render.
    #[test]
    fn end_to_end() {
        let mut playpal = vec![0u8; 768];
        playpal[3 * 7..3 * 7 + 3].copy_from_slice(&[200, 50, 10]);

        // 4x4 patch whose column 1 has palette index 7 at row 2.
        let patch = WadPatch {
            width: 4,
            height: 4,
            left_offset: 0,
            top_offset: 0,
            columns: vec![
                PatchColumn::default(),
                PatchColumn {
                    spans: vec![PatchSpan {
                        top: 2,
                        pixels: vec![7],
                    }],
                },
                PatchColumn::default(),
                PatchColumn::default(),
            ],
        };

        let wad = WadData::from_bytes(build(
            b"IWAD",
            &[
                (PALETTE_LUMP, playpal),
                ("PNAMES", pnames(&["PATCH_A"])),
                ("PATCH_A", patch.to_bytes()),
                ("TEXTURE1", textures(&[("WALL", 4, 4, vec![(0, 0, 0)])])),
            ],
        ))
        .unwrap();

        let mut cache = WadCache::new();
        let palette = cache.palette(&wad).unwrap().clone();
        let store = cache.patch_store(&wad).unwrap();
        let dir = load_textures(wad.lump_bytes("TEXTURE1").unwrap(), store).unwrap();
        assert!(dir.failures.is_empty());

        let bitmap = compose_texture(&dir.textures[0], store);
        let image = render_bitmap(&bitmap, &palette);

        assert_eq!((image.width, image.height), (4, 4));
        // Cell (x=1, y=2) lands at raster row 2, column 1.
        assert_eq!(image.pixel(1, 2), [200, 50, 10, 255]);
        assert_eq!(image.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(image.data.len(), 4 * 4 * 4);
    }

    #[test]
    fn transposition_is_row_major() {
        // 2 wide, 3 tall; paint cell (x=0, y=2) only.
        let mut playpal = vec![0u8; 768];
        playpal[3..6].copy_from_slice(&[10, 20, 30]);

        let patch = WadPatch {
            width: 1,
            height: 3,
            left_offset: 0,
            top_offset: 0,
            columns: vec![PatchColumn {
                spans: vec![PatchSpan {
                    top: 2,
                    pixels: vec![1],
                }],
            }],
        };
        let wad = WadData::from_bytes(build(
            b"IWAD",
            &[
                (PALETTE_LUMP, playpal),
                ("PNAMES", pnames(&["P"])),
                ("P", patch.to_bytes()),
                ("TEXTURE1", textures(&[("T", 2, 3, vec![(0, 0, 0)])])),
            ],
        ))
        .unwrap();

        let mut cache = WadCache::new();
        let palette = cache.palette(&wad).unwrap().clone();
        let store = cache.patch_store(&wad).unwrap();
        let dir = load_textures(wad.lump_bytes("TEXTURE1").unwrap(), store).unwrap();
        let bitmap = compose_texture(&dir.textures[0], store);
        let image = render_bitmap(&bitmap, &palette);

        // Row-major offset of (x=0, y=2) in a 2-wide raster.
        let at = (2 * 2 + 0) * 4;
        assert_eq!(&image.data[at..at + 4], &[10, 20, 30, 255]);
        // Everything else transparent.
        assert_eq!(&image.data[0..4], &[0, 0, 0, 0]);
    }
}
