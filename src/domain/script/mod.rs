pub mod chunker;
pub mod model;
pub mod phonetic;

pub use chunker::Chunker;
pub use model::{Script, Segment};
pub use phonetic::{PhoneticRule, PhoneticRules};

/// Marker the drafting prompt asks for between topic sections
pub const DEFAULT_DELIMITER: &str = "[TRANSITION]";
