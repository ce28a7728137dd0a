use crate::Error;

pub const DEFAULT_SEGMENT_SECONDS: u32 = 15;

/// Length of the clip cut from the middle of a track, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentLength(u32);

impl SegmentLength {
    pub fn from_seconds(seconds: u32) -> Result<Self, Error> {
        if seconds == 0 {
            return Err(Error::EmptySegment);
        }
        Ok(Self(seconds))
    }

    pub fn seconds(&self) -> u32 {
        self.0
    }

    pub fn as_millis(&self) -> u64 {
        u64::from(self.0) * 1000
    }
}

impl Default for SegmentLength {
    fn default() -> Self {
        Self(DEFAULT_SEGMENT_SECONDS)
    }
}
