//! Errors raised by layout generation, task indexing and snapshots.

use thiserror::Error;

use crate::task::TargetKind;

/// Errors that can occur while running an episode.
#[derive(Debug, Error)]
pub enum GameError {
    /// More packages and zones were requested than there are placement cells.
    #[error("cannot reserve {reserved} package/zone cells out of {cells}")]
    TooManyReservations { reserved: usize, cells: usize },

    #[error("layout needs at least one placement cell")]
    EmptyLayout,

    /// Zero packages or zero zones leave nothing to deliver.
    #[error("{packages} packages and {zones} zones give no deliveries")]
    NoDeliveries { packages: usize, zones: usize },

    /// The placement inset does not fit inside a cell.
    #[error("cell radius {cell_radius} is smaller than the obstacle radius {required}")]
    CellTooSmall { cell_radius: f32, required: f32 },

    /// A package or zone index ran past the end of the layout. The episode
    /// completion signal was ignored or a stale task state was reused.
    #[error("{kind:?} index {index} is out of range for {len} entries")]
    TargetOutOfRange {
        kind: TargetKind,
        index: usize,
        len: usize,
    },

    #[error("snapshot encode error: {0}")]
    SnapshotEncode(#[from] bincode::error::EncodeError),

    #[error("snapshot decode error: {0}")]
    SnapshotDecode(#[from] bincode::error::DecodeError),
}

impl GameError {
    /// Whether the error comes from caller configuration rather than
    /// a broken call sequence.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::TooManyReservations { .. }
                | Self::EmptyLayout
                | Self::NoDeliveries { .. }
                | Self::CellTooSmall { .. }
        )
    }
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
