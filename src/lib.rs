//! Splits a continuous narrated recording into per-slide speech clips,
//! using long silent pauses as the split points.
//!
//! The analysis chain is a single forward pass: fixed-duration RMS windows
//! over the sample stream, silence-run detection with duration and merge
//! tolerances, then conversion of the detected silences into padded,
//! non-overlapping speech segments. [`pipeline::segment_file`] drives the
//! whole chain for one file and either reports the boundaries (dry run) or
//! exports numbered `slide_NN.wav` clips.

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod media;
pub mod pipeline;
pub mod timeline;

pub use analysis::{compute_rms_windows, detect_silence_runs, EnergyWindow, EnergyWindower, SilenceRun};
pub use config::SegmentationConfig;
pub use error::SegmentationError;
pub use export::export_segments;
pub use media::{AudioSource, WavSource};
pub use pipeline::{segment_file, RunMode, SegmentationOutcome, SegmentationReport};
pub use timeline::{resolve_segments, SpeechSegment};
