//! Type-safe Rust bindings to [yt-dlp](https://github.com/yt-dlp/yt-dlp) Python library.
//!
//! ## Modules
//!
//! - [`dl`] - Core yt-dlp API wrappers
//! - [`preset`] - Fixed audio stream presets
//!
//! ## Quick Start
//!
//! ```no_run
//! use fapmix_dl::{dl::download, preset::AudioStream};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opts = AudioStream::M4a.into_options(Path::new("/tmp/run"));
//! let info = download("https://youtube.com/watch?v=example", opts)?;
//! println!("{}", info.title);
//! # Ok(())
//! # }
//! ```

pub mod dl;
pub mod preset;
