//! Copy sliced segments into the final output under names taken from their transcripts.

use crate::error::{Error, Result};
use crate::sanitize::{FILE_NAME_MAX_LEN, sanitize_filename};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of sliced audio segments.
pub const AUDIO_EXT: &str = "wav";

/// Extension of transcript companions written by the toolkit.
pub const TRANSCRIPT_EXT: &str = "lab";

/// Words of the transcript kept in the file name.
const MAX_NAME_WORDS: usize = 10;

/// A segment and its transcript, copied under a shared base name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenamedPair {
    pub audio: PathBuf,
    pub transcript: PathBuf,
}

/// Base name for a segment from the first line of its transcript.
///
/// Falls back to the zero-padded `index` when the line has no words.
pub fn name_from_transcript(first_line: &str, index: usize) -> String {
    let words = first_line
        .split_whitespace()
        .take(MAX_NAME_WORDS)
        .collect::<Vec<_>>()
        .join("_");

    if words.is_empty() {
        format!("{index:04}")
    } else {
        sanitize_filename(&words, FILE_NAME_MAX_LEN)
    }
}

/// Copy every `.wav` in `slice_dir` with a matching `.lab` into `final_dir`,
/// both renamed after the transcript.
///
/// Segments are visited in sorted order and indexed from zero for the
/// fallback name. Only `.wav` files advance the index, so transcripts and
/// subdirectories in `slice_dir` never shift it. A segment without a
/// transcript is skipped with a warning.
///
/// When two segments resolve to the same name the later one overwrites the
/// earlier on disk. The returned pairs list each destination once.
pub fn rename_and_copy_transcriptions(
    slice_dir: &Path,
    final_dir: &Path,
) -> Result<Vec<RenamedPair>> {
    fs::create_dir_all(final_dir)
        .map_err(|e| Error::io("failed to create final output directory", final_dir, e))?;

    let mut pairs = Vec::new();

    for (index, audio) in sorted_audio_files(slice_dir)?.into_iter().enumerate() {
        let transcript = audio.with_extension(TRANSCRIPT_EXT);

        if !transcript.is_file() {
            tracing::warn!(file = ?audio.display(), "matching transcript not found, skipping");
            continue;
        }

        let text = fs::read_to_string(&transcript)
            .map_err(|e| Error::io("failed to read transcript", &transcript, e))?;
        let first_line = text.lines().next().unwrap_or_default().trim();
        let name = name_from_transcript(first_line, index);

        let pair = RenamedPair {
            audio: final_dir.join(format!("{name}.{AUDIO_EXT}")),
            transcript: final_dir.join(format!("{name}.{TRANSCRIPT_EXT}")),
        };

        if pair.audio.exists() {
            tracing::warn!(path = ?pair.audio.display(), "overwriting segment with identical transcript");
        }

        copy(&audio, &pair.audio)?;
        copy(&transcript, &pair.transcript)?;

        tracing::debug!(from = ?audio.display(), to = %name, "renamed segment");

        if !pairs.contains(&pair) {
            pairs.push(pair);
        }
    }

    tracing::info!(count = pairs.len(), dir = ?final_dir.display(), "copied transcribed segments");

    Ok(pairs)
}

/// First subdirectory of `dir` by name, where the slicer leaves its segments.
pub fn find_slice_subdir(dir: &Path) -> Result<Option<PathBuf>> {
    let mut subdirs = list_dir(dir)?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect::<Vec<_>>();

    subdirs.sort();

    Ok(subdirs.into_iter().next())
}

fn sorted_audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = list_dir(dir)?
        .into_iter()
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == AUDIO_EXT))
        .collect::<Vec<_>>();

    files.sort();

    Ok(files)
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    fs::read_dir(dir)
        .and_then(|entries| entries.map(|e| e.map(|e| e.path())).collect())
        .map_err(|e| Error::io("failed to list directory", dir, e))
}

fn copy(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|e| Error::io("failed to copy file", from, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_first_ten_words() {
        let line = "one two three four five six seven eight nine ten eleven twelve";

        assert_eq!(
            name_from_transcript(line, 0),
            "one_two_three_four_five_six_seven_eight_nine_ten"
        );
    }

    #[test]
    fn sanitizes_words() {
        assert_eq!(
            name_from_transcript("Well, it's  done!", 0),
            "Well__it_s_done_"
        );
    }

    #[test]
    fn empty_line_uses_index() {
        assert_eq!(name_from_transcript("", 7), "0007");
        assert_eq!(name_from_transcript("   ", 12), "0012");
    }

    #[test]
    fn caps_long_names() {
        let line = "abcdefghijklmnopqrstuvwxyz ".repeat(10);
        assert_eq!(name_from_transcript(&line, 0).len(), FILE_NAME_MAX_LEN);
    }

    fn segment(dir: &Path, stem: &str, audio: &[u8], transcript: Option<&str>) {
        fs::write(dir.join(format!("{stem}.wav")), audio).unwrap();
        if let Some(text) = transcript {
            fs::write(dir.join(format!("{stem}.lab")), text).unwrap();
        }
    }

    #[test]
    fn copies_pairs_under_transcript_names() {
        let temp = tempfile::tempdir().unwrap();
        let slices = temp.path().join("slices");
        let out = temp.path().join("final");
        fs::create_dir(&slices).unwrap();
        segment(&slices, "0000", b"a", Some("the quick brown fox\nsecond line"));
        segment(&slices, "0001", b"b", None);
        segment(&slices, "0002", b"c", Some(""));

        let pairs = rename_and_copy_transcriptions(&slices, &out).unwrap();

        assert_eq!(
            pairs,
            [
                RenamedPair {
                    audio: out.join("the_quick_brown_fox.wav"),
                    transcript: out.join("the_quick_brown_fox.lab"),
                },
                RenamedPair {
                    audio: out.join("0002.wav"),
                    transcript: out.join("0002.lab"),
                },
            ]
        );
        assert!(!out.join("0001.wav").exists());
    }

    #[test]
    fn later_duplicate_overwrites_earlier() {
        let temp = tempfile::tempdir().unwrap();
        let slices = temp.path().join("slices");
        let out = temp.path().join("final");
        fs::create_dir(&slices).unwrap();
        segment(&slices, "0000", b"first", Some("hello there"));
        segment(&slices, "0001", b"second", Some("hello there"));

        let pairs = rename_and_copy_transcriptions(&slices, &out).unwrap();

        assert_eq!(
            pairs,
            [RenamedPair {
                audio: out.join("hello_there.wav"),
                transcript: out.join("hello_there.lab"),
            }]
        );
        assert_eq!(fs::read(out.join("hello_there.wav")).unwrap(), b"second");
        assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
    }

    #[test]
    fn picks_first_subdir_by_name() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("zeta")).unwrap();
        fs::create_dir(temp.path().join("alpha")).unwrap();
        fs::write(temp.path().join("aaa.txt"), "").unwrap();

        let found = find_slice_subdir(temp.path()).unwrap();

        assert_eq!(found, Some(temp.path().join("alpha")));
    }

    #[test]
    fn no_subdir_found() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("only.wav"), "").unwrap();

        assert_eq!(find_slice_subdir(temp.path()).unwrap(), None);
    }
}
