/// A maximal run of silent windows, half-open `[start, end)` in
/// window-index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilenceRun {
    pub start: usize,
    pub end: usize,
}

impl SilenceRun {
    /// Length of the run in windows.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Materializes the run as a `(start, end)` pair in seconds.
    pub fn to_seconds(&self, window_duration: f64) -> (f64, f64) {
        (
            self.start as f64 * window_duration,
            self.end as f64 * window_duration,
        )
    }
}

/// Detects long silences in a per-window RMS sequence.
///
/// A window is silent iff `rms <= threshold` (inclusive, so a window exactly
/// at the threshold counts as silence). Maximal silent runs shorter than
/// `min_silence_seconds` are dropped; surviving runs separated by a voiced
/// gap of at most `merge_gap_seconds` are merged into one. The result is
/// sorted and disjoint. Runs touching either end of the stream are ordinary
/// runs; an empty RMS sequence or nothing surviving the filters yields an
/// empty list, which callers read as "the whole stream is one segment".
pub fn detect_silence_runs(
    rms: &[f32],
    window_duration: f64,
    threshold: f32,
    min_silence_seconds: f64,
    merge_gap_seconds: f64,
) -> Vec<SilenceRun> {
    if rms.is_empty() {
        return Vec::new();
    }

    // Group maximal contiguous runs of silent windows.
    let mut runs: Vec<SilenceRun> = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &value) in rms.iter().enumerate() {
        let is_silent = value <= threshold;
        match (is_silent, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(SilenceRun { start: s, end: i });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(SilenceRun {
            start: s,
            end: rms.len(),
        });
    }

    // Short pauses are breathing, not slide boundaries.
    let min_windows = (min_silence_seconds / window_duration).ceil() as usize;
    runs.retain(|run| run.len() >= min_windows);

    if runs.is_empty() {
        return Vec::new();
    }

    // Merge runs separated by voiced blips shorter than the gap tolerance.
    let gap_windows = (merge_gap_seconds / window_duration).floor() as usize;
    let mut merged: Vec<SilenceRun> = Vec::with_capacity(runs.len());
    let mut current = runs[0];
    for run in &runs[1..] {
        if run.start - current.end <= gap_windows {
            current.end = run.end;
        } else {
            merged.push(current);
            current = *run;
        }
    }
    merged.push(current);

    log::debug!(
        "Silence detection: {} raw runs -> {} after min-duration and merge",
        runs.len(),
        merged.len()
    );
    merged
}
