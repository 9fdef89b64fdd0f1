use serde::{Deserialize, Serialize};

/// A speech segment on the source timeline, in seconds.
///
/// Segments come out of the resolver sorted and pairwise non-overlapping;
/// each one maps 1:1 to an exported clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechSegment {
    /// Start time in the source audio, seconds.
    pub start: f64,
    /// End time in the source audio, seconds.
    pub end: f64,
}

impl SpeechSegment {
    pub fn new(start: f64, end: f64) -> Self {
        SpeechSegment { start, end }
    }

    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Validates the time boundaries.
    pub fn is_valid(&self) -> bool {
        self.start >= 0.0 && self.end > self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_duration() {
        let segment = SpeechSegment::new(2.5, 7.5);
        assert_eq!(segment.duration(), 5.0);
    }

    #[test]
    fn test_segment_validation() {
        assert!(SpeechSegment::new(0.0, 1.0).is_valid());
        assert!(!SpeechSegment::new(1.0, 1.0).is_valid());
        assert!(!SpeechSegment::new(-0.5, 1.0).is_valid());
    }

    #[test]
    fn test_segment_serializes() {
        let segment = SpeechSegment::new(0.0, 8.25);
        let json = serde_json::to_string(&segment).unwrap();
        let back: SpeechSegment = serde_json::from_str(&json).unwrap();
        assert_eq!(segment, back);
    }
}
