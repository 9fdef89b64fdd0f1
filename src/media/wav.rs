use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use super::AudioSource;
use crate::error::SegmentationError;

/// Frames per read while copying a segment out of the source.
const EXTRACT_CHUNK_FRAMES: usize = 8192;

/// WAV-backed audio source.
///
/// Holds one forward read cursor for the analysis pass. When a detection
/// sample rate below the file's rate is requested, analysis chunks are
/// decimated by an integer frame stride; the energy envelope is all the
/// detector needs, so nearest-frame decimation is sufficient. Duration and
/// extraction always work at the file's full rate.
pub struct WavSource {
    reader: WavReader<BufReader<File>>,
    spec: WavSpec,
    path: PathBuf,
    duration_seconds: f64,
    /// Analysis keeps one frame out of every `stride`.
    stride: usize,
}

impl WavSource {
    /// Opens a WAV file for full-rate analysis.
    pub fn open(path: &Path) -> Result<Self, SegmentationError> {
        Self::open_with_detection_rate(path, None)
    }

    /// Opens a WAV file, optionally decimating the analysis stream toward
    /// `detection_sample_rate`. Rates at or above the file's rate leave the
    /// stream untouched.
    pub fn open_with_detection_rate(
        path: &Path,
        detection_sample_rate: Option<u32>,
    ) -> Result<Self, SegmentationError> {
        let reader = WavReader::open(path).map_err(|e| SegmentationError::SourceAccess {
            path: path.to_path_buf(),
            source: e,
        })?;
        let spec = reader.spec();
        let duration_seconds = f64::from(reader.duration()) / f64::from(spec.sample_rate);

        let stride = match detection_sample_rate {
            Some(target) if target < spec.sample_rate => {
                (f64::from(spec.sample_rate) / f64::from(target)).round() as usize
            }
            _ => 1,
        };

        log::info!(
            "Opened {:?}: {} Hz, {} ch, {:.2}s (analysis stride {})",
            path,
            spec.sample_rate,
            spec.channels,
            duration_seconds,
            stride
        );

        Ok(WavSource {
            reader,
            spec,
            path: path.to_path_buf(),
            duration_seconds,
            stride,
        })
    }

    /// Sample rate of the underlying file, in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copies the `(start_seconds, end_seconds)` sub-range into a 16-bit PCM
    /// WAV at `out_path`.
    ///
    /// Opens a fresh reader per call, so extraction never disturbs the
    /// analysis cursor; the handle is released on every path out of this
    /// function. `export_sample_rate` below the source rate decimates by an
    /// integer frame stride; `None` keeps the source rate.
    pub fn extract(
        &self,
        start_seconds: f64,
        end_seconds: f64,
        out_path: &Path,
        export_sample_rate: Option<u32>,
    ) -> Result<(), hound::Error> {
        let mut reader = WavReader::open(&self.path)?;
        let rate = f64::from(self.spec.sample_rate);

        let start_frame = (start_seconds.max(0.0) * rate).round() as u32;
        let end_frame = ((end_seconds * rate).round() as u32).min(reader.duration());
        reader.seek(start_frame)?;

        let stride = match export_sample_rate {
            Some(target) if target < self.spec.sample_rate => {
                (rate / f64::from(target)).round() as usize
            }
            _ => 1,
        };
        let out_rate = (rate / stride as f64).round() as u32;

        let out_spec = WavSpec {
            channels: self.spec.channels,
            sample_rate: out_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(out_path, out_spec)?;

        // Reads are whole multiples of the stride so decimation keeps its
        // phase across chunk boundaries.
        let read_quantum = (EXTRACT_CHUNK_FRAMES / stride).max(1) * stride;
        let mut remaining = end_frame.saturating_sub(start_frame) as usize;
        while remaining > 0 {
            let take = remaining.min(read_quantum);
            let frames = read_normalized(&mut reader, &self.spec, take)?;
            if frames.is_empty() {
                break;
            }
            let channels = self.spec.channels as usize;
            let read_frames = frames.len() / channels;
            for frame in frames[..read_frames * channels].chunks(channels).step_by(stride) {
                for &sample in frame {
                    let value = (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16;
                    writer.write_sample(value)?;
                }
            }
            remaining -= read_frames.min(remaining);
        }

        writer.finalize()?;
        Ok(())
    }
}

impl AudioSource for WavSource {
    fn analysis_sample_rate(&self) -> f64 {
        f64::from(self.spec.sample_rate) / self.stride as f64
    }

    fn channels(&self) -> u16 {
        self.spec.channels
    }

    fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    fn next_chunk(&mut self, max_frames: usize) -> Result<Option<Vec<f32>>, SegmentationError> {
        let raw = read_normalized(
            &mut self.reader,
            &self.spec,
            max_frames.saturating_mul(self.stride),
        )
        .map_err(|e| SegmentationError::SourceRead {
            path: self.path.clone(),
            source: e,
        })?;
        if raw.is_empty() {
            return Ok(None);
        }
        if self.stride == 1 {
            return Ok(Some(raw));
        }

        let channels = self.spec.channels as usize;
        let whole = raw.len() / channels * channels;
        let mut decimated = Vec::with_capacity(raw.len() / self.stride + channels);
        for frame in raw[..whole].chunks(channels).step_by(self.stride) {
            decimated.extend_from_slice(frame);
        }
        Ok(Some(decimated))
    }
}

/// Reads up to `max_frames` frames as interleaved `[-1, 1]` floats.
///
/// Integer formats are scaled by `2^(bits-1)`; float files are passed
/// through. Returns fewer frames (possibly zero) at end of stream.
fn read_normalized(
    reader: &mut WavReader<BufReader<File>>,
    spec: &WavSpec,
    max_frames: usize,
) -> Result<Vec<f32>, hound::Error> {
    let want = max_frames * spec.channels as usize;
    match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().take(want).collect(),
        SampleFormat::Int => {
            let norm = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .take(want)
                .map(|s| s.map(|v| v as f32 / norm))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Writes a mono 16-bit WAV; `spans` are (frame count, amplitude).
    fn write_wav(path: &Path, sample_rate: u32, spans: &[(usize, i16)]) {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &(count, amplitude) in spans {
            for i in 0..count {
                // Square wave keeps RMS exactly |amplitude| / 32768.
                let sign = if i % 2 == 0 { 1 } else { -1 };
                writer.write_sample(amplitude * sign).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_open_reports_rate_and_duration() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 8000, &[(16_000, 16384)]);

        let source = WavSource::open(&path).unwrap();
        assert_eq!(source.sample_rate(), 8000);
        assert_eq!(source.channels(), 1);
        assert!((source.duration_seconds() - 2.0).abs() < 1e-9);
        assert_eq!(source.analysis_sample_rate(), 8000.0);
    }

    #[test]
    fn test_chunks_are_normalized_and_forward_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 8000, &[(1000, 16384)]);

        let mut source = WavSource::open(&path).unwrap();
        let mut total = 0usize;
        while let Some(chunk) = source.next_chunk(256).unwrap() {
            assert!(chunk.len() <= 256);
            assert!(chunk.iter().all(|s| (s.abs() - 0.5).abs() < 1e-6));
            total += chunk.len();
        }
        assert_eq!(total, 1000);
    }

    #[test]
    fn test_detection_rate_decimates_analysis_stream() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 16_000, &[(16_000, 16384)]);

        let mut source = WavSource::open_with_detection_rate(&path, Some(8000)).unwrap();
        assert_eq!(source.analysis_sample_rate(), 8000.0);
        // Duration is unaffected by decimation.
        assert!((source.duration_seconds() - 1.0).abs() < 1e-9);

        let mut total = 0usize;
        while let Some(chunk) = source.next_chunk(1024).unwrap() {
            total += chunk.len();
        }
        assert_eq!(total, 8000);
    }

    #[test]
    fn test_extract_sample_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 8000, &[(16_000, 16384)]);

        let source = WavSource::open(&path).unwrap();
        let out = dir.path().join("cut.wav");
        source.extract(0.5, 1.25, &out, None).unwrap();

        let reader = WavReader::open(&out).unwrap();
        assert_eq!(reader.spec().sample_rate, 8000);
        assert_eq!(reader.duration(), 6000); // 0.75s at 8 kHz
    }

    #[test]
    fn test_extract_clamps_to_stream_end() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 8000, &[(8000, 16384)]);

        let source = WavSource::open(&path).unwrap();
        let out = dir.path().join("cut.wav");
        source.extract(0.75, 5.0, &out, None).unwrap();

        let reader = WavReader::open(&out).unwrap();
        assert_eq!(reader.duration(), 2000); // 0.25s remained
    }

    #[test]
    fn test_missing_file_is_source_access_error() {
        let result = WavSource::open(Path::new("/nonexistent/audio.wav"));
        assert!(matches!(
            result,
            Err(SegmentationError::SourceAccess { .. })
        ));
    }
}
