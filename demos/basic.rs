//! Standalone demo: two independent swatch pickers bound to text fields.

use floem::prelude::*;
use floem::reactive::SignalGet;
use floem::window::WindowConfig;
use floem_swatch::{dismissal_layer, swatch_picker, HostField, SwatchOptions};

fn main() {
    let first = RwSignal::new(String::new());
    let second = RwSignal::new("#3366cc".to_string());

    floem::Application::new()
        .window(
            move |_| {
                let (_, plain) = swatch_picker(HostField::new(first), &SwatchOptions::new());
                let (_, fancy) = swatch_picker(
                    HostField::new(second),
                    &SwatchOptions::new()
                        .display_color_code(true)
                        .live_preview(true)
                        .on_select(|code| println!("picked #{code}")),
                );

                let root = v_stack((
                    plain,
                    label(move || format!("first: {}", first.get())),
                    fancy,
                    label(move || format!("second: {}", second.get())),
                ))
                .style(|s| s.gap(12.0).padding(16.0).size_full());

                dismissal_layer(root).on_event_stop(
                    floem::event::EventListener::WindowClosed,
                    |_| floem::quit_app(),
                )
            },
            Some(
                WindowConfig::default()
                    .size((420.0, 260.0))
                    .title("floem-swatch"),
            ),
        )
        .run();
}
