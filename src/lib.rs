//! Codec for the Doom-engine WAD resource container.
//!
//! A WAD is a 12-byte header (ASCII type tag, entry count, directory
//! offset), a heap of raw lump bytes, and a directory of 16-byte
//! entries naming each lump and pointing at its bytes; the layout
//! tables live in [`wad`]. On top of the container sit the formats
//! this crate decodes: the column/span picture format ([`picture`]),
//! the 256-colour palette ([`palette`]), and the PNAMES/TEXTUREx
//! composite texture definitions ([`textures`]).
//!
//! Everything here is a synchronous transform over fully buffered
//! bytes: parse the directory ([`WadData`]), optionally merge a base
//! archive with an override ([`MergedLookup`]), decode pictures
//! ([`WadPatch`]) and palettes ([`WadPalette`]), resolve texture
//! definitions ([`load_textures`]), flatten them
//! ([`compose_texture`]) and apply the palette ([`render_bitmap`]).
//! Fetching archive bytes and writing rasters to an image file format
//! are the caller's concern.

mod bytes;

pub mod cache;
pub mod compose;
pub mod error;
pub mod palette;
pub mod picture;
pub mod render;
pub mod textures;
pub mod wad;

pub use cache::WadCache;
pub use compose::{ComposedBitmap, compose_texture};
pub use error::{Result, WadError};
pub use palette::{WadColour, WadPalette};
pub use picture::{PatchColumn, PatchSpan, WadPatch};
pub use render::{RgbaImage, render_bitmap};
pub use textures::{
    PNAMES_LUMP, PatchStore, TextureDirectory, TextureFailure, WadTexPatch, WadTexture,
    load_textures, patch_names,
};
pub use wad::{Lump, LumpLookup, MergedLookup, PALETTE_LUMP, WadData, WadKind};
