mod person_name;
mod segment_length;

pub use person_name::PersonName;
pub use segment_length::SegmentLength;
