//! # Scopes, listeners, and the host seam
//!
//! `sable-core` is the small runtime every Sable widget sits on. It has no
//! rendering of its own; it describes *what* a widget wants from its
//! environment and gives it tools to release those things reliably.
//!
//! - `Host`: implemented by a page or window. Provides listener
//!   registration, scroll offset, bounds lookup, focus and an after‑paint queue.
//! - `ListenerRegistry` / `ListenerHandle`: global event subscriptions
//!   returned as tokens that unregister on drop.
//! - `Dispose` / `Scope`: cleanup tokens and the lifetime that owns them.
//! - `Signal<T>`: observable value used for host bindings.
//! - `View` / `Semantics`: the declarative tree widgets produce each frame.
//!
//! ## Cleanup
//!
//! ```rust
//! use sable_core::*;
//!
//! let scope = Scope::new();
//! let value = signal(String::new());
//!
//! scope.run(|| {
//!     effect({
//!         let value = value.clone();
//!         move || value.watch(|v| log::debug!("value is now {v}"))
//!     });
//! });
//! assert_eq!(value.subscriber_count(), 1);
//!
//! scope.dispose();
//! assert_eq!(value.subscriber_count(), 0);
//! ```
//!
//! Widgets create one scope per mount and dispose it on unmount, so every
//! subscription made while mounting goes away with the widget.

pub mod animation;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod listeners;
pub mod locals;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod semantics;
pub mod signal;
pub mod view;

pub use effects::*;
pub use error::*;
pub use geometry::*;
pub use host::*;
pub use input::*;
pub use listeners::*;
pub use locals::*;
pub use prelude::*;
pub use runtime::*;
pub use semantics::*;
pub use signal::*;
pub use view::*;
