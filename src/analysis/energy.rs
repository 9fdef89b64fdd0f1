use crate::error::SegmentationError;
use crate::media::AudioSource;

/// A single fixed-duration RMS analysis window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyWindow {
    /// Position of the window in the stream, starting at 0.
    pub index: u64,
    /// RMS energy over all samples and channels of the window, in 0-1 scale.
    pub rms: f32,
}

/// Streaming RMS windower.
///
/// Consumes interleaved sample chunks of arbitrary, non-uniform size and
/// emits one scalar energy value per fixed-duration window, in arrival
/// order. Carry-over across chunk boundaries is a running sum of squares
/// plus a fill counter, so memory use stays constant regardless of stream
/// length. A trailing partial window is discarded, never emitted short:
/// every index→time conversion downstream assumes a uniform window length.
pub struct EnergyWindower {
    /// Frames (one sample per channel) per window.
    window_frames: usize,
    /// Samples per window across all channels.
    window_len: usize,
    window_duration: f64,
    sum_squares: f64,
    filled: usize,
    next_index: u64,
}

impl EnergyWindower {
    /// Creates a windower for the given analysis rate and channel layout.
    ///
    /// Fails if `frame_ms` rounds to fewer than one sample at this rate.
    pub fn new(sample_rate: f64, channels: u16, frame_ms: f64) -> Result<Self, SegmentationError> {
        if channels == 0 {
            return Err(SegmentationError::InvalidConfig(
                "audio source reports zero channels".to_string(),
            ));
        }
        let frames = (sample_rate * frame_ms / 1000.0).round();
        if !frames.is_finite() || frames < 1.0 {
            return Err(SegmentationError::InvalidConfig(format!(
                "frame_ms {} resolves to zero samples at {} Hz",
                frame_ms, sample_rate
            )));
        }
        let window_frames = frames as usize;
        log::debug!(
            "Energy windower: {} frames per window ({:.1} ms requested, {} channels)",
            window_frames,
            frame_ms,
            channels
        );
        Ok(EnergyWindower {
            window_frames,
            window_len: window_frames * channels as usize,
            window_duration: window_frames as f64 / sample_rate,
            sum_squares: 0.0,
            filled: 0,
            next_index: 0,
        })
    }

    /// Duration of one window in seconds. Constant for the life of the
    /// windower.
    pub fn window_duration(&self) -> f64 {
        self.window_duration
    }

    /// Frames per window at the analysis rate.
    pub fn window_frames(&self) -> usize {
        self.window_frames
    }

    /// Feeds one interleaved chunk and returns the windows it completed.
    ///
    /// Chunks must contain whole frames; any number of frames is fine,
    /// including zero.
    pub fn push(&mut self, chunk: &[f32]) -> Vec<EnergyWindow> {
        let mut completed = Vec::new();
        for &sample in chunk {
            self.sum_squares += f64::from(sample) * f64::from(sample);
            self.filled += 1;
            if self.filled == self.window_len {
                let rms = (self.sum_squares / self.window_len as f64).sqrt() as f32;
                completed.push(EnergyWindow {
                    index: self.next_index,
                    rms,
                });
                self.next_index += 1;
                self.sum_squares = 0.0;
                self.filled = 0;
            }
        }
        completed
    }

    /// Ends the stream, discarding any buffered partial window.
    pub fn finish(self) {
        if self.filled > 0 {
            log::debug!(
                "Discarding {} trailing samples (short of a full window)",
                self.filled
            );
        }
    }
}

/// Drives an [`AudioSource`] through a windower and collects the per-window
/// RMS values.
///
/// Returns the RMS sequence and the window duration in seconds. A stream
/// too short for even one window yields an empty vector, which downstream
/// stages treat as "no silences found", not as an error.
pub fn compute_rms_windows<S: AudioSource>(
    source: &mut S,
    frame_ms: f64,
) -> Result<(Vec<f32>, f64), SegmentationError> {
    let rate = source.analysis_sample_rate();
    let mut windower = EnergyWindower::new(rate, source.channels(), frame_ms)?;

    // Pull roughly a second at a time, in whole-window multiples.
    let chunk_frames = (windower.window_frames() * 20).max(rate as usize);

    let mut rms = Vec::new();
    while let Some(chunk) = source.next_chunk(chunk_frames)? {
        for window in windower.push(&chunk) {
            rms.push(window.rms);
        }
    }
    let window_duration = windower.window_duration();
    windower.finish();

    log::info!(
        "Computed {} RMS windows ({:.0} ms each) at {:.0} Hz analysis rate",
        rms.len(),
        window_duration * 1000.0,
        rate
    );
    Ok((rms, window_duration))
}
