use super::segment::SpeechSegment;

/// Segments shorter than this are dropped as numeric noise.
const MIN_SEGMENT_SECONDS: f64 = 1e-3;

/// Converts detected silences into the ordered list of speech segments to
/// export.
///
/// Each silence ends the segment that precedes it; `end_pad` extends the
/// segment slightly past the nominal silence start so trailing speech is not
/// clipped, and `start_pad` pulls the next segment's start slightly before
/// the silence's end for the same reason at the onset. Starts are clamped to
/// the previous emitted end, so the result is sorted and non-overlapping no
/// matter how large the pads are relative to the gaps.
pub fn resolve_segments(
    total_duration: f64,
    silences: &[(f64, f64)],
    start_pad: f64,
    end_pad: f64,
) -> Vec<SpeechSegment> {
    let start_pad = start_pad.max(0.0);
    let end_pad = end_pad.max(0.0);

    if silences.is_empty() {
        // The whole stream is one segment.
        let seg_start = 0.0f64.max(0.0 - start_pad);
        let seg_end = total_duration.min(total_duration + end_pad);
        if seg_end - seg_start <= MIN_SEGMENT_SECONDS {
            return Vec::new();
        }
        return vec![SpeechSegment::new(seg_start, seg_end)];
    }

    let mut segments: Vec<SpeechSegment> = Vec::new();
    // End of the previous silence, i.e. where the current stretch of speech
    // nominally begins.
    let mut prev = 0.0f64;

    for &(silence_start, silence_end) in silences {
        let seg_end = total_duration.min(silence_start + end_pad);
        let mut seg_start = (prev - start_pad).max(0.0);
        if let Some(last) = segments.last() {
            seg_start = seg_start.max(last.end);
        }
        if seg_end - seg_start > MIN_SEGMENT_SECONDS {
            segments.push(SpeechSegment::new(seg_start, seg_end));
        }
        prev = prev.max(silence_end);
    }

    // Trailing speech after the last silence.
    if prev < total_duration {
        let mut seg_start = (prev - start_pad).max(0.0);
        if let Some(last) = segments.last() {
            seg_start = seg_start.max(last.end);
        }
        let seg_end = total_duration;
        if seg_end - seg_start > MIN_SEGMENT_SECONDS {
            segments.push(SpeechSegment::new(seg_start, seg_end));
        }
    }

    log::info!(
        "Resolved {} speech segment(s) from {} silence(s) over {:.2}s",
        segments.len(),
        silences.len(),
        total_duration
    );
    segments
}
