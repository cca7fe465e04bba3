use crate::{GlobalEvent, ListenerHandle, ListenerKinds, Propagation, Rect, Result, Vec2, ViewId};

/// Everything a widget needs from the page or window it is mounted in.
///
/// Platform runners implement this; widgets hold it as `Rc<dyn Host>`.
pub trait Host {
    /// Allocates a fresh view id.
    fn next_id(&self) -> ViewId;

    /// Registers a page-level listener. Restricted hosts may refuse with
    /// `Error::ListenerRejected`.
    fn listen(
        &self,
        kinds: ListenerKinds,
        handler: Box<dyn Fn(&GlobalEvent) -> Propagation>,
    ) -> Result<ListenerHandle>;

    /// Current page scroll offset.
    fn scroll_offset(&self) -> Vec2;

    /// Viewport-relative bounding box of a laid out view, or `None` if the view
    /// is not mounted.
    fn bounds_of(&self, id: ViewId) -> Option<Rect>;

    /// Queues `f` to run once the next frame has been painted.
    fn after_paint(&self, f: Box<dyn FnOnce()>);

    fn request_focus(&self, id: Option<ViewId>);

    fn focused(&self) -> Option<ViewId>;
}
