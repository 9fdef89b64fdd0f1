pub mod wav;

pub use wav::WavSource;

use crate::error::SegmentationError;

/// In-process contract between the analysis stages and whatever owns the
/// decoded audio.
///
/// The engine only ever reads forward through the stream, one chunk at a
/// time; it never asks for random access and never materializes the whole
/// stream.
pub trait AudioSource {
    /// Sample rate the analysis pass sees, in Hz. For a decimated source
    /// this is the reduced rate, not the rate of the underlying file.
    fn analysis_sample_rate(&self) -> f64;

    /// Number of interleaved channels per frame.
    fn channels(&self) -> u16;

    /// Total duration of the source in seconds, independent of any
    /// analysis-rate decimation.
    fn duration_seconds(&self) -> f64;

    /// Reads up to `max_frames` frames of interleaved samples, normalized
    /// to `[-1, 1]`. Returns `None` once the stream is exhausted.
    fn next_chunk(&mut self, max_frames: usize) -> Result<Option<Vec<f32>>, SegmentationError>;
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    /// Fixed in-memory source for driving the analysis stages in tests.
    pub struct MemorySource {
        samples: Vec<f32>,
        channels: u16,
        sample_rate: f64,
        pos: usize,
    }

    impl MemorySource {
        pub fn new(samples: Vec<f32>, channels: u16, sample_rate: f64) -> Self {
            MemorySource {
                samples,
                channels,
                sample_rate,
                pos: 0,
            }
        }
    }

    impl AudioSource for MemorySource {
        fn analysis_sample_rate(&self) -> f64 {
            self.sample_rate
        }

        fn channels(&self) -> u16 {
            self.channels
        }

        fn duration_seconds(&self) -> f64 {
            self.samples.len() as f64 / self.channels as f64 / self.sample_rate
        }

        fn next_chunk(
            &mut self,
            max_frames: usize,
        ) -> Result<Option<Vec<f32>>, SegmentationError> {
            if self.pos >= self.samples.len() {
                return Ok(None);
            }
            let want = max_frames * self.channels as usize;
            let end = (self.pos + want).min(self.samples.len());
            let chunk = self.samples[self.pos..end].to_vec();
            self.pos = end;
            Ok(Some(chunk))
        }
    }
}
