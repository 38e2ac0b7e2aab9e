//! Classifies a change row into its display status.

use crate::core::model::ChangeRecord;

/// Residual position size at or below which a reduced position counts as
/// fully exited. Funds often leave odd-lot remnants behind when closing
/// a position, so exit detection uses this ceiling instead of zero.
pub const RESIDUAL_EXIT_THRESHOLD: i64 = 1000;

/// Display status of one change row. Used for labeling only, never for
/// filtering or sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldingStatus {
    /// New position opened this period.
    Added,
    /// Existing position grew.
    Increased,
    /// Position shrank but remains above the residual threshold.
    Reduced,
    /// Position exited, possibly leaving a residual remnant.
    Removed,
}

impl HoldingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HoldingStatus::Added => "Added",
            HoldingStatus::Increased => "Increased",
            HoldingStatus::Reduced => "Reduced",
            HoldingStatus::Removed => "Removed",
        }
    }
}

/// Maps a row's share deltas to one of the four statuses.
///
/// The rule is order sensitive: positive deltas split on whether the
/// position is new, everything else splits on the residual threshold.
/// A zero delta therefore also lands on the threshold branch; that
/// matches the upstream behavior and is kept deliberately.
pub fn classify(record: &ChangeRecord) -> HoldingStatus {
    if record.delta_shares > 0 {
        if record.old_shares == 0 {
            HoldingStatus::Added
        } else {
            HoldingStatus::Increased
        }
    } else if record.new_shares <= RESIDUAL_EXIT_THRESHOLD {
        HoldingStatus::Removed
    } else {
        HoldingStatus::Reduced
    }
}
