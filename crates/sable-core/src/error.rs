use thiserror::Error;

use crate::{ListenerKinds, ViewId};

/// Failures are local to a widget; none of them are shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("widget is disabled")]
    Disabled,

    #[error("anchor view {0} is not mounted")]
    AnchorNotMounted(ViewId),

    #[error("widget has been unmounted")]
    Unmounted,

    #[error("option index {index} out of range for {len} options")]
    InvalidIndex { index: usize, len: usize },

    #[error("host refused listener registration for {0:?}")]
    ListenerRejected(ListenerKinds),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
