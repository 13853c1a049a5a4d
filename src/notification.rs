//! User-facing reporting of aborted invocations.

use crate::error::{OperationError, ParallelError, SegmentRole};

/// How prominently a notice should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A terminal condition reported to the user instead of being raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The selection is not two pairs of vertices on two chains.
    InvalidSelection(String),
    /// The named segment has fewer than three vertices.
    SegmentTooShort(SegmentRole),
    /// A chain runs the wrong way, or a closed chain cannot be handled.
    DirectionUnsupported(String),
    /// Reconciliation would delete a tagged or shared vertex.
    ProtectedVertex,
    /// The source geometry cannot be offset (zero-length edge, NaN).
    DegenerateGeometry(String),
    /// The host refused an edit or history operation.
    Internal(String),
}

impl Notice {
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::ProtectedVertex | Self::DegenerateGeometry(_) | Self::Internal(_) => {
                Severity::Error
            }
            _ => Severity::Info,
        }
    }

    /// Text to show to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InvalidSelection(detail) => {
                format!("Please select exactly four nodes on two different ways ({detail})")
            }
            Self::SegmentTooShort(SegmentRole::Source) => {
                "Source segment must be at least 3 nodes long".to_owned()
            }
            Self::SegmentTooShort(SegmentRole::Destination) => {
                "Destination segment must be at least 3 nodes long".to_owned()
            }
            Self::DirectionUnsupported(detail) => detail.clone(),
            Self::ProtectedVertex => "This will delete a node with tags or node that belongs \
                                      to multiple ways. Aborting."
                .to_owned(),
            Self::DegenerateGeometry(detail) => format!("Cannot make parallel: {detail}"),
            Self::Internal(detail) => format!("Make Parallel failed: {detail}"),
        }
    }
}

impl From<&ParallelError> for Notice {
    fn from(err: &ParallelError) -> Self {
        match err {
            ParallelError::Selection(e) => Self::InvalidSelection(e.to_string()),
            ParallelError::Geometry(e) => Self::DegenerateGeometry(e.to_string()),
            ParallelError::Topology(e) => Self::Internal(e.to_string()),
            ParallelError::Operation(e) => match e {
                OperationError::ReversedDirection => {
                    Self::DirectionUnsupported("Way is in wrong direction, try to reverse".into())
                }
                OperationError::SeamInSpan | OperationError::ClosedChainRejected => {
                    Self::DirectionUnsupported(format!("Unsupported closed way: {e}"))
                }
                OperationError::SegmentTooShort { role, .. } => Self::SegmentTooShort(*role),
                OperationError::ProtectedVertex { .. } => Self::ProtectedVertex,
                OperationError::History(_) => Self::Internal(e.to_string()),
            },
        }
    }
}

/// Receiver of user-facing notices.
pub trait NotificationSink {
    fn notify(&mut self, notice: Notice);
}

impl NotificationSink for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}
