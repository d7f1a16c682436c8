//! Optional first step of the mix pipeline: fetch the source audio from a URL.

use crate::error::{Error, Result};
use fapmix_dl::dl::download;
use fapmix_dl::preset::AudioStream;
use std::path::{Path, PathBuf};

/// Where a download landed and what it was called.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Downloaded {
    /// Directory holding the fetched file, used as the pipeline input
    pub dir: PathBuf,
    /// Media title reported by the extractor
    pub title: String,
}

/// Fetches one audio stream into a directory and returns its title.
pub trait Downloader {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<String>;
}

/// yt-dlp through the embedded Python interpreter.
#[derive(Clone, Copy, Debug, Default)]
pub struct YtDlp {
    pub stream: AudioStream,
}

impl Downloader for YtDlp {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<String> {
        let opts = self.stream.into_options(dest);

        let info = download(url, opts).map_err(|e| Error::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(id = %info.id, path = ?info.filepath, "yt-dlp finished");

        Ok(info.title)
    }
}

/// Download `url` into `dest`.
///
/// Any failure is logged and reported as `None`; the caller decides what a
/// missing input means.
pub fn download_audio<D: Downloader>(downloader: &mut D, url: &str, dest: &Path) -> Option<Downloaded> {
    tracing::info!(url, dest = ?dest.display(), "downloading audio");

    match downloader.fetch(url, dest) {
        Ok(title) => {
            tracing::info!(title = %title, "audio downloaded");
            Some(Downloaded {
                dir: dest.to_path_buf(),
                title,
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "error downloading audio");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Writes a placeholder file and returns a fixed title, or fails.
    #[derive(Debug)]
    pub struct FakeDownloader {
        pub title: Option<String>,
    }

    impl Downloader for FakeDownloader {
        fn fetch(&mut self, url: &str, dest: &Path) -> Result<String> {
            let Some(title) = self.title.clone() else {
                return Err(Error::Download {
                    url: url.to_string(),
                    reason: "unavailable".to_string(),
                });
            };

            let path = AudioStream::M4a.output_path(dest);
            std::fs::write(&path, b"m4a").map_err(|e| Error::io("failed to write", &path, e))?;

            Ok(title)
        }
    }
}
