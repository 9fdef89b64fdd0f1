use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::analysis::{compute_rms_windows, detect_silence_runs};
use crate::config::SegmentationConfig;
use crate::error::SegmentationError;
use crate::export::export_segments;
use crate::media::{AudioSource, WavSource};
use crate::timeline::{resolve_segments, SpeechSegment};

/// What to do with the resolved segments.
#[derive(Debug, Clone)]
pub enum RunMode {
    /// Report boundaries only; no files are written and export errors
    /// cannot occur.
    DryRun,
    /// Write one clip per segment into `out_dir`.
    Export {
        out_dir: PathBuf,
        /// Output rate for the clips; `None` keeps the source rate.
        export_sample_rate: Option<u32>,
    },
}

/// Detected boundaries for inspection, produced by a dry run.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentationReport {
    /// Merged long silences as `(start, end)` in seconds.
    pub silences: Vec<(f64, f64)>,
    /// The segments that an export run would write.
    pub segments: Vec<SpeechSegment>,
}

/// Result of one segmentation run.
#[derive(Debug, Clone, Serialize)]
pub enum SegmentationOutcome {
    /// Dry run: boundaries only, nothing persisted.
    Report(SegmentationReport),
    /// Export run: the segments and the clip files written for them.
    Exported {
        segments: Vec<SpeechSegment>,
        clips: Vec<PathBuf>,
    },
}

/// Segments one narrated recording.
///
/// Runs the single-pass analysis chain (RMS windows -> silence runs ->
/// segment boundaries) over the file at `path`, then either reports the
/// boundaries or exports the clips, depending on `mode`. Detection may run
/// at a reduced sample rate (`config.detection_sample_rate`); export always
/// reads the file at its native rate.
pub fn segment_file(
    path: &Path,
    config: &SegmentationConfig,
    mode: RunMode,
) -> Result<SegmentationOutcome, SegmentationError> {
    config.validate()?;
    log::info!(
        "Segmenting {:?}: threshold {}, min silence {:.2}s, merge gap {:.2}s",
        path,
        config.silence_rms_threshold,
        config.min_silence_seconds,
        config.merge_gap_seconds
    );

    let mut source = WavSource::open_with_detection_rate(path, config.detection_sample_rate)?;
    let total_duration = source.duration_seconds();

    let (rms, window_duration) = compute_rms_windows(&mut source, config.frame_ms)?;
    let runs = detect_silence_runs(
        &rms,
        window_duration,
        config.silence_rms_threshold,
        config.min_silence_seconds,
        config.merge_gap_seconds,
    );
    let silences: Vec<(f64, f64)> = runs
        .iter()
        .map(|run| run.to_seconds(window_duration))
        .collect();

    log::info!("Detected {} long silence(s)", silences.len());
    for (i, (start, end)) in silences.iter().enumerate() {
        log::info!(
            "  Silence {}: {:.2}s - {:.2}s ({:.2}s)",
            i + 1,
            start,
            end,
            end - start
        );
    }

    let segments = resolve_segments(
        total_duration,
        &silences,
        config.start_pad_seconds,
        config.end_pad_seconds,
    );

    match mode {
        RunMode::DryRun => Ok(SegmentationOutcome::Report(SegmentationReport {
            silences,
            segments,
        })),
        RunMode::Export {
            out_dir,
            export_sample_rate,
        } => {
            let clips = export_segments(&source, &out_dir, &segments, export_sample_rate)?;
            Ok(SegmentationOutcome::Exported { segments, clips })
        }
    }
}
