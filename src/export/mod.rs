use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SegmentationError;
use crate::media::WavSource;
use crate::timeline::SpeechSegment;

/// Writes one clip per segment into `out_dir`, named `slide_NN.wav` with
/// 1-based, zero-padded numbering.
///
/// Downstream slide assembly matches clips to slide indices by that number,
/// so any single extraction failure aborts the whole run rather than leave
/// the numbering sparse.
pub fn export_segments(
    source: &WavSource,
    out_dir: &Path,
    segments: &[SpeechSegment],
    export_sample_rate: Option<u32>,
) -> Result<Vec<PathBuf>, SegmentationError> {
    fs::create_dir_all(out_dir)?;

    let mut clips = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        let index = i + 1;
        let out_path = out_dir.join(format!("slide_{:02}.wav", index));
        log::info!(
            "Exporting segment {}: {:.2}s -> {:.2}s ({:.2}s) to {:?}",
            index,
            segment.start,
            segment.end,
            segment.duration(),
            out_path
        );
        source
            .extract(segment.start, segment.end, &out_path, export_sample_rate)
            .map_err(|e| SegmentationError::SegmentExport {
                index,
                path: out_path.clone(),
                source: e,
            })?;
        clips.push(out_path);
    }

    log::info!("Exported {} clip(s) to {:?}", clips.len(), out_dir);
    Ok(clips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
    use tempfile::TempDir;

    fn write_tone(path: &Path, sample_rate: u32, frames: usize) {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            let sign = if i % 2 == 0 { 1 } else { -1 };
            writer.write_sample(16384 * sign).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_clips_are_numbered_from_one() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("narration.wav");
        write_tone(&src, 8000, 24_000); // 3s

        let source = WavSource::open(&src).unwrap();
        let out_dir = dir.path().join("segments");
        let segments = vec![
            SpeechSegment::new(0.0, 1.0),
            SpeechSegment::new(1.0, 2.0),
            SpeechSegment::new(2.0, 3.0),
        ];
        let clips = export_segments(&source, &out_dir, &segments, None).unwrap();

        assert_eq!(clips.len(), 3);
        assert_eq!(clips[0].file_name().unwrap(), "slide_01.wav");
        assert_eq!(clips[1].file_name().unwrap(), "slide_02.wav");
        assert_eq!(clips[2].file_name().unwrap(), "slide_03.wav");
        for clip in &clips {
            let reader = WavReader::open(clip).unwrap();
            assert_eq!(reader.duration(), 8000);
        }
    }

    #[test]
    fn test_no_segments_exports_nothing() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("narration.wav");
        write_tone(&src, 8000, 8000);

        let source = WavSource::open(&src).unwrap();
        let out_dir = dir.path().join("segments");
        let clips = export_segments(&source, &out_dir, &[], None).unwrap();

        assert!(clips.is_empty());
        assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 0);
    }
}
