//! Offline asset generation for the microgames collection
//!
//! Every generator here is a deterministic, single-pass transform: parameters in,
//! a file out. Nothing holds state between calls.
//!
//! # Sprite Example
//! ```no_run
//! use microgen::sprite::{Palette, Sprite};
//!
//! let art = "
//! K K
//! K Y
//! ";
//! let sprite = Sprite::from_ascii(art, &Palette::hazard())?.upscale(4)?;
//! sprite.write_png("corner.png".as_ref())?;
//! # Ok::<(), microgen::sprite::SpriteError>(())
//! ```
//!
//! # Raw PNG Example
//! ```
//! use microgen::png;
//!
//! let pixels = [[255, 0, 0, 255], [0, 0, 255, 128]];
//! let bytes = png::encode(2, 1, &pixels)?;
//! assert_eq!(&bytes[..8], &png::SIGNATURE);
//! # Ok::<(), microgen::png::PngError>(())
//! ```
//!
//! # Audio Example
//! ```no_run
//! use microgen::audio::*;
//!
//! let jump = presets::jump();
//! write_sound(std::path::Path::new("shared/assets"), "sfx_jump", &jump)?;
//! # Ok::<(), AudioError>(())
//! ```

pub mod audio;
pub mod pages;
pub mod png;
pub mod sprite;
