//! Fixed-stream presets: fetch one known audio stream to a known file name.
//!
//! **Streams:** [`AudioStream::M4a`] (YouTube itag 140, AAC 128k in an m4a container)
//!
//! **Output:** `<dir>/downloaded_audio.m4a`, no post-processing.

use crate::dl::{DownloadOptions, OutputTemplates};
use std::path::{Path, PathBuf};

/// File name every preset download is written to.
pub const DOWNLOAD_FILE_NAME: &str = "downloaded_audio.m4a";

/// Audio stream selected by format code.
#[derive(Copy, Clone, Debug, Default)]
pub enum AudioStream {
    /// itag 140: m4a / AAC
    #[default]
    M4a,
}

impl AudioStream {
    /// yt-dlp format selector for this stream.
    pub fn format_code(self) -> &'static str {
        match self {
            AudioStream::M4a => "140",
        }
    }

    /// Path the stream lands at inside `dir`.
    pub fn output_path(self, dir: &Path) -> PathBuf {
        dir.join(DOWNLOAD_FILE_NAME)
    }

    /// Quiet single-stream download into `dir`, replacing any earlier file.
    pub fn into_options(self, dir: &Path) -> DownloadOptions {
        let template = self.output_path(dir).to_string_lossy().into_owned();

        DownloadOptions {
            format: Some(self.format_code().to_string()),
            outtmpl: Some(OutputTemplates::simple(template)),
            overwrites: Some(true),
            quiet: Some(true),
            no_warnings: Some(true),
            noprogress: Some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn m4a_is_default() {
        assert!(matches!(AudioStream::default(), AudioStream::M4a));
    }

    #[test]
    fn m4a_uses_itag_140() {
        assert_eq!(AudioStream::M4a.format_code(), "140");
    }

    #[test]
    fn options_target_fixed_file() {
        let opts = AudioStream::M4a.into_options(Path::new("/tmp/run"));

        assert!(matches!(
            &opts,
            DownloadOptions {
                format,
                outtmpl: Some(_),
                quiet: Some(true),
                ..
            } if format.as_deref() == Some("140")
        ));

        let template = opts.outtmpl.as_ref().and_then(|t| t.default_template());
        let expected = Path::new("/tmp/run").join(DOWNLOAD_FILE_NAME);
        assert_eq!(template.map(Path::new), Some(expected.as_path()));
    }
}
