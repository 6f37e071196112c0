//! Notifications emitted by the edit session

use crate::animation::KeyframeId;
use crate::collection::BandId;

/// Outgoing notification for the host
///
/// Every user edit is bracketed: one `BeginEdit`, the mutation events, one
/// `EndEdit`. Hosts use the bracket to group undo steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    BeginEdit,
    EndEdit,
    BandAdded(BandId),
    BandRemoved(BandId),
    /// A drag step wrote new values into these keyframes
    KeyframesMoved {
        band: BandId,
        frequency: KeyframeId,
        gain: KeyframeId,
    },
    SelectionChanged(Option<BandId>),
    /// The selected band changed outside the editor; redraw everything.
    /// Only ever delivered through [`EditSession::flush_deferred`](super::EditSession::flush_deferred).
    ForceRefresh,
}

impl EditorEvent {
    /// Whether the event opens or closes an edit bracket
    pub fn is_bracket(&self) -> bool {
        matches!(self, Self::BeginEdit | Self::EndEdit)
    }
}
