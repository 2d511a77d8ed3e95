// ABOUTME: Defines SMPP v3.4 priority_flag values applied to every submitted part
// ABOUTME: Levels 4-255 are reserved and rejected on construction

use num_enum::TryFromPrimitive;

/// SMPP v3.4 Priority Flag Field (Section 5.2.14)
///
/// Carried unchanged on every part of a concatenated message, so all segments
/// of one logical message are queued at the same level by the SMSC.
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PriorityFlag {
    /// Level 0 - Lowest priority (default)
    Level0 = 0,
    /// Level 1 - Normal priority
    Level1 = 1,
    /// Level 2 - High priority
    Level2 = 2,
    /// Level 3 - Highest priority
    Level3 = 3,
}

impl Default for PriorityFlag {
    fn default() -> Self {
        PriorityFlag::Level0
    }
}
