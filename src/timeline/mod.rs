pub mod resolver;
pub mod segment;

pub use resolver::resolve_segments;
pub use segment::SpeechSegment;
