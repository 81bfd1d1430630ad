//! Rendering module
//!
//! Read-only extraction of draw data from the simulation plus CPU-side quad
//! building. GPU upload and text drawing are left to the host.

pub mod frame;
pub mod shapes;
pub mod vertex;

pub use frame::{Banner, Camera, RenderFrame, SpriteCell, SpritePose, TextureSlot, TileDraw, extract};
pub use shapes::{frame_batches, quad, sprite_vertices, tile_uv, tilemap_vertices};
pub use vertex::TexturedVertex;
