use sable_core::{Modifiers, PointerButton, PointerEvent, PointerEventKind, PointerId, PointerKind, Vec2};

/// Pixels per wheel "line" for devices that report line deltas.
pub const LINE_SCROLL_PX: f32 = 40.0;

fn pe_mouse(event: PointerEventKind, pos: Vec2, mods: Modifiers) -> PointerEvent {
    PointerEvent {
        id: PointerId(0),
        kind: PointerKind::Mouse,
        event,
        position: pos,
        modifiers: mods,
    }
}

pub fn pe_down_primary(pos: Vec2, mods: Modifiers) -> PointerEvent {
    pe_mouse(PointerEventKind::Down(PointerButton::Primary), pos, mods)
}

pub fn pe_up_primary(pos: Vec2, mods: Modifiers) -> PointerEvent {
    pe_mouse(PointerEventKind::Up(PointerButton::Primary), pos, mods)
}

pub fn pe_move(pos: Vec2) -> PointerEvent {
    pe_mouse(PointerEventKind::Move, pos, Modifiers::default())
}

/// Wheel at `pos`; positive `delta.y` moves content up.
pub fn pe_wheel(pos: Vec2, delta: Vec2) -> PointerEvent {
    pe_mouse(PointerEventKind::Wheel(delta), pos, Modifiers::default())
}
