use serde::{Deserialize, Serialize};

use crate::error::SegmentationError;

/// Configuration for one segmentation run.
///
/// All values are passed explicitly into each stage; nothing is read from
/// shared or global state. Defaults match the tuning used for narrated
/// lecture recordings, where slide boundaries are marked by pauses of
/// several seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// RMS analysis window size in milliseconds.
    pub frame_ms: f64,
    /// RMS level (0-1) at or below which a window counts as silence.
    pub silence_rms_threshold: f32,
    /// Minimum duration in seconds for a pause to count as a slide boundary.
    pub min_silence_seconds: f64,
    /// Silences separated by a voiced gap shorter than this are merged into
    /// one pause.
    pub merge_gap_seconds: f64,
    /// Pre-roll in seconds kept before each segment's nominal start.
    pub start_pad_seconds: f64,
    /// Post-roll in seconds kept after each segment's nominal end.
    pub end_pad_seconds: f64,
    /// Optional reduced sample rate for the analysis pass only. Export is
    /// unaffected. `None` analyzes at the source rate.
    pub detection_sample_rate: Option<u32>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        SegmentationConfig {
            frame_ms: 50.0,
            silence_rms_threshold: 0.01,
            min_silence_seconds: 5.5,
            merge_gap_seconds: 0.3,
            start_pad_seconds: 0.15,
            end_pad_seconds: 0.25,
            detection_sample_rate: Some(16_000),
        }
    }
}

impl SegmentationConfig {
    /// Validates the numeric parameters. Called by the pipeline before any
    /// audio is read; stage constructors re-check what concerns them.
    pub fn validate(&self) -> Result<(), SegmentationError> {
        if !self.frame_ms.is_finite() || self.frame_ms <= 0.0 {
            return Err(SegmentationError::InvalidConfig(format!(
                "frame_ms must be positive, got {}",
                self.frame_ms
            )));
        }
        if !self.silence_rms_threshold.is_finite() || self.silence_rms_threshold < 0.0 {
            return Err(SegmentationError::InvalidConfig(format!(
                "silence_rms_threshold must be non-negative, got {}",
                self.silence_rms_threshold
            )));
        }
        if self.min_silence_seconds < 0.0 {
            return Err(SegmentationError::InvalidConfig(format!(
                "min_silence_seconds must be non-negative, got {}",
                self.min_silence_seconds
            )));
        }
        if self.merge_gap_seconds < 0.0 {
            return Err(SegmentationError::InvalidConfig(format!(
                "merge_gap_seconds must be non-negative, got {}",
                self.merge_gap_seconds
            )));
        }
        if self.start_pad_seconds < 0.0 || self.end_pad_seconds < 0.0 {
            return Err(SegmentationError::InvalidConfig(format!(
                "paddings must be non-negative, got start={} end={}",
                self.start_pad_seconds, self.end_pad_seconds
            )));
        }
        if let Some(rate) = self.detection_sample_rate {
            if rate == 0 {
                return Err(SegmentationError::InvalidConfig(
                    "detection_sample_rate must be greater than zero".to_string(),
                ));
            }
        }
        Ok(())
    }
}
