//! yt-dlp Python API wrappers.
//!
//! Type-safe bindings to [yt-dlp](https://github.com/yt-dlp/yt-dlp) `YoutubeDL` parameters.
//!
//! ```no_run
//! use fapmix_dl::{dl::download, preset::AudioStream};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opts = AudioStream::M4a.into_options(std::path::Path::new("/tmp/run"));
//! let info = download("https://youtube.com/watch?v=example", opts)?;
//! println!("Downloaded: {}", info.title);
//! # Ok(())
//! # }
//! ```

use pyo3::ffi::c_str;
use pyo3::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;

/// Filename templates using `%(field)s` syntax. Key `default` required.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct OutputTemplates(pub Option<HashMap<String, String>>);

impl OutputTemplates {
    /// Create with a single default template.
    pub fn simple(default: String) -> Self {
        Self(Some(HashMap::from([("default".to_string(), default)])))
    }

    /// The `default` template, if any.
    pub fn default_template(&self) -> Option<&str> {
        self.0.as_ref()?.get("default").map(String::as_str)
    }
}

/// yt-dlp download configuration passed to `YoutubeDL(params)`.
///
/// `None` fields are dropped before reaching yt-dlp so its own defaults apply.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct DownloadOptions {
    pub format: Option<String>,
    pub outtmpl: Option<OutputTemplates>,
    pub overwrites: Option<bool>,
    pub quiet: Option<bool>,
    pub no_warnings: Option<bool>,
    pub noprogress: Option<bool>,
}

/// Essential metadata from the yt-dlp info dict.
///
/// `dl.py` flattens the sanitized info dict so every key is present; missing
/// values arrive as `None`.
#[derive(Clone, Debug, FromPyObject)]
#[pyo3(from_item_all)]
pub struct DownloadInfo {
    /// Video identifier
    pub id: String,
    /// Video title, empty when the extractor reports none
    pub title: String,
    /// Extractor name (e.g., "Youtube")
    pub extractor_key: Option<String>,
    /// Full name of the video uploader
    pub uploader: Option<String>,
    /// Length of the video in seconds
    pub duration: Option<f64>,
    /// URL to the video webpage
    pub webpage_url: Option<String>,
    /// Final path of the downloaded file
    pub filepath: Option<PathBuf>,
}

/// Download a single URL and return the info dict.
///
/// Uses `extract_info(url, download=True)` to download and get metadata in one request.
pub fn download(url: &str, opts: DownloadOptions) -> Result<DownloadInfo, PyErr> {
    Python::attach(|py| {
        let module = PyModule::from_code(py, c_str!(include_str!("./dl.py")), c"dl.py", c"dl")?;

        let py_params = opts.into_pyobject(py)?;

        let info = module.getattr("download")?.call1((url, py_params))?;

        info.extract()
    })
}
