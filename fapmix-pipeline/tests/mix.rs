//! End-to-end mix runs against a simulated toolkit.

use chrono::{Local, TimeZone};
use fapmix_pipeline::archive::format_date;
use fapmix_pipeline::config::ToolConfig;
use fapmix_pipeline::download::Downloader;
use fapmix_pipeline::error::Result;
use fapmix_pipeline::mix::{FINAL_DIR, MixRequest, process_audio};
use fapmix_pipeline::sanitize::sanitize_filename;
use fapmix_pipeline::stage::{Stage, StageExecutor, StageFailure, StageRunner};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const SEGMENTS: &str = "vocals";

/// Stands in for `fap`: slicing writes three silent segments, transcription
/// writes `.lab` files for the first two.
#[derive(Default)]
struct FakeToolkit {
    calls: Vec<&'static str>,
}

impl StageExecutor for FakeToolkit {
    fn execute(&mut self, _program: &Path, stage: &Stage) -> std::result::Result<(), StageFailure> {
        self.calls.push(stage.name);

        match stage.name {
            "Slicing" => {
                let out = PathBuf::from(stage.args.last().unwrap()).join(SEGMENTS);
                fs::create_dir_all(&out).map_err(StageFailure::Spawn)?;
                for i in 0..3 {
                    write_silence(&out.join(format!("{i:04}.wav")));
                }
                Ok(())
            }
            "Transcription" => {
                let dir = PathBuf::from(stage.args.last().unwrap()).join(SEGMENTS);
                fs::write(dir.join("0000.lab"), "the quick brown fox\nsecond line\n")
                    .map_err(StageFailure::Spawn)?;
                fs::write(dir.join("0001.lab"), "\n").map_err(StageFailure::Spawn)?;
                Ok(())
            }
            "Separation" => Err(StageFailure::Exit(1)),
            _ => Ok(()),
        }
    }
}

struct TitleOnly(&'static str);

impl Downloader for TitleOnly {
    fn fetch(&mut self, _url: &str, dest: &Path) -> Result<String> {
        let path = dest.join("downloaded_audio.m4a");
        File::create(&path)
            .and_then(|f| f.set_modified(jan_first()))
            .unwrap();
        Ok(self.0.to_string())
    }
}

fn write_silence(path: &Path) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..1600 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

fn jan_first() -> SystemTime {
    Local
        .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .unwrap()
        .into()
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    names
}

#[test]
fn renames_by_transcript_and_archives() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("recordings");
    fs::create_dir(&input).unwrap();
    File::create(input.join("take.m4a"))
        .and_then(|f| f.set_modified(jan_first()))
        .unwrap();
    File::create(input.join("later.m4a")).unwrap();

    let request = MixRequest {
        audio_input_dir: input,
        output_dir: temp.path().join("out"),
        url: None,
    };
    let mut runner = StageRunner::with_executor(ToolConfig::default(), FakeToolkit::default());

    let out = process_audio(&mut runner, &mut TitleOnly("unused"), &request)
        .unwrap()
        .expect("run should complete");

    // separation failed, everything after it still ran
    assert_eq!(
        runner.executor().calls,
        ["WAV Conversion", "Separation", "Slicing", "Transcription"]
    );

    assert_eq!(
        file_names(&out.run_dir.join(FINAL_DIR)),
        ["0001.lab", "0001.wav", "the_quick_brown_fox.lab", "the_quick_brown_fox.wav"]
    );
    assert_eq!(out.pairs.len(), 2);

    let identifier = sanitize_filename(&request.output_dir.to_string_lossy(), 50);
    let expected = format!("{}-{identifier}.zip", format_date(jan_first()));
    assert_eq!(out.archive, out.run_dir.join(expected));
    assert!(out.archive.is_file());
}

#[test]
fn downloaded_title_names_archive() {
    let temp = tempfile::tempdir().unwrap();
    let request = MixRequest {
        audio_input_dir: PathBuf::new(),
        output_dir: temp.path().join("out"),
        url: Some("https://example.com/watch?v=1".to_string()),
    };
    let mut runner = StageRunner::with_executor(ToolConfig::default(), FakeToolkit::default());

    let out = process_audio(&mut runner, &mut TitleOnly("My Project!"), &request)
        .unwrap()
        .expect("run should complete");

    assert_eq!(
        out.archive.file_name().unwrap().to_string_lossy(),
        "01January2024-My_Project_.zip"
    );
}
