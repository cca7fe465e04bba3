use anyhow::bail;
use sable_core::*;
use sable_platform::{HeadlessHost, pe_move, pe_wheel};
use sable_ui::*;

const LANGUAGES: &[&str] = &[
    "English",
    "Deutsch",
    "Español",
    "Français",
    "Italiano",
    "Nederlands",
    "Polski",
    "Português",
    "Русский",
    "Svenska",
    "Türkçe",
    "Українська",
    "العربية",
    "हिन्दी",
    "中文",
    "日本語",
    "한국어",
];

fn app(selector: &Selector, language: &Signal<String>) -> View {
    Column().with_children(vec![
        Text(format!("Interface language: {}", language.get())),
        selector.view(),
    ])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let host = HeadlessHost::new(Size::new(1024.0, 768.0));
    let anchor = host.next_id();
    host.set_bounds(anchor, Rect::new(32.0, 64.0, 240.0, 36.0));

    let language = signal("English".to_string());
    let selector = with_selector_config(
        SelectorConfig {
            searchable: true,
            on_resize: ViewportPolicy::Reposition,
            ..Default::default()
        },
        || {
            Selector::mount(
                host.clone(),
                anchor,
                SelectorProps {
                    label: "Language".into(),
                    options: option_set(LANGUAGES.iter().copied()),
                    ..Default::default()
                },
            )
        },
    );
    selector.bind_value(&language);
    host.request_focus(Some(anchor));

    let paint = || {
        let frame = host.paint(app(&selector, &language));
        selector.tick();
        frame
    };
    paint();

    // keyboard: open, page down, filter, commit
    host.press_key(Key::ArrowDown);
    paint();
    host.press_key(Key::PageDown);
    println!("highlighted after PageDown: {:?}", selector.highlighted());
    for c in "sv".chars() {
        host.press_key(Key::Character(c));
    }
    println!("filtered: {:?}", selector.visible_options());
    host.press_key(Key::ArrowDown);
    host.press_key(Key::Enter);
    println!("selected: {}", language.get());

    // pointer: open, scroll the list, hover, pick
    let anchor_box = host
        .bounds_of(anchor)
        .ok_or_else(|| anyhow::anyhow!("anchor lost its layout"))?;
    host.click(Vec2::new(anchor_box.x + 8.0, anchor_box.y + 8.0));
    paint();
    let panel = selector.state().panel_rect;
    let first_row = panel.y + 4.0 + 32.0;
    host.pointer(pe_wheel(Vec2::new(panel.x + 8.0, first_row), Vec2::new(0.0, 56.0)));
    host.pointer(pe_move(Vec2::new(panel.x + 8.0, first_row + 10.0)));
    println!("hovered row: {:?}", selector.highlighted());
    host.click(Vec2::new(panel.x + 8.0, first_row + 10.0));
    println!("selected: {}", language.get());

    // window resize keeps an open panel, page scroll closes it
    selector.open()?;
    host.resize(Size::new(800.0, 600.0));
    println!("open after resize: {}", selector.is_open());
    host.scroll_page(Vec2::new(0.0, 40.0));
    println!("open after page scroll: {}", selector.is_open());

    let frame = paint();
    for node in &frame.semantics_nodes {
        println!("{:?} {:?} expanded={:?}", node.role, node.label, node.expanded);
    }

    selector.unmount();
    if !host.registry().is_empty() {
        bail!("{} listeners outlived the selector", host.registry().len());
    }
    Ok(())
}
