//! fapmix-pipeline: sequencing and file bookkeeping around the `fap` audio toolkit.
//!
//! Every audio operation is delegated to the toolkit. This crate builds the
//! directory chain between its stages, runs them, and handles the files
//! left behind.
//!
//! # Pipelines
//!
//! - [`mix`]: download (optional) → to-wav → separate → slice → transcribe →
//!   rename by transcript → zip
//! - [`premix`]: soft-limit → normalize loudness → channel pairing → stereo mix →
//!   slice and transcribe each channel
//!
//! # Quick Start
//!
//! ```no_run
//! use fapmix_pipeline::config::ToolConfig;
//! use fapmix_pipeline::download::YtDlp;
//! use fapmix_pipeline::mix::{MixRequest, process_audio};
//! use fapmix_pipeline::stage::StageRunner;
//!
//! # fn main() -> fapmix_pipeline::error::Result<()> {
//! let mut runner = StageRunner::new(ToolConfig::default());
//! let request = MixRequest {
//!     audio_input_dir: "recordings".into(),
//!     output_dir: "processed".into(),
//!     url: None,
//! };
//!
//! if let Some(out) = process_audio(&mut runner, &mut YtDlp::default(), &request)? {
//!     println!("{}", out.archive.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod config;
pub mod download;
pub mod error;
pub mod mix;
pub mod premix;
pub mod rename;
pub mod sanitize;
pub mod stage;
