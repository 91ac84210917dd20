use std::ops::RangeInclusive;

/// Page identifier type
pub type PageId = u32;

/// Index of a slot in the resident frame set
pub type FrameSlot = usize;

/// Allowed number of frames in a simulation
pub const FRAME_COUNT_RANGE: RangeInclusive<usize> = 1..=10;

/// Allowed auto-step interval in milliseconds
pub const SPEED_MS_RANGE: RangeInclusive<u64> = 100..=2000;

/// Allowed TLB window length
pub const TLB_SIZE_RANGE: RangeInclusive<usize> = 1..=8;

/// Allowed working-set window length
pub const WORKING_SET_RANGE: RangeInclusive<usize> = 2..=10;

/// Reference string loaded when no other input is given
pub const DEFAULT_REFERENCE_STRING: &str = "7,0,1,2,0,3,0,4,2,3,0,3,2,1,2,0,1,7,0,1";

/// Length of a generated reference string
pub const DEFAULT_GENERATED_LENGTH: usize = 20;

/// Highest page number in a generated reference string
pub const DEFAULT_GENERATED_MAX_PAGE: PageId = 9;
