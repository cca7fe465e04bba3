pub use crate::animation::*;
pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::error::*;
pub use crate::geometry::{Rect, Size, Vec2};
pub use crate::host::Host;
pub use crate::input::*;
pub use crate::listeners::{
    GlobalEvent, Handler, ListenerHandle, ListenerKinds, ListenerRegistry, Propagation,
    ScrollOrigin,
};
pub use crate::locals::{Density, Dp, density, dp_to_px, local, with_density, with_local};
pub use crate::runtime::{Frame, Scheduler, SemNode};
pub use crate::scope::{Scope, current_scope};
pub use crate::semantics::{Role, Semantics};
pub use crate::signal::{Signal, signal};
pub use crate::view::{Callback, View, ViewId, ViewKind};
