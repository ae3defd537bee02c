use std::path::PathBuf;

use anyhow::Context as _;
use gpui::*;
use gpui_component::Root;
use scribe_editor_core::{Editor, EditorConfig, EditorStore, JsonFileSlot};
use scribe_editor_view::EditorView;

mod logging;

/// Path to an optional JSON [`EditorConfig`].
const CONFIG_ENV: &str = "SCRIBE_CONFIG";
/// Directory the persisted editor state is written to.
const DATA_DIR_ENV: &str = "SCRIBE_DATA_DIR";

fn load_config() -> anyhow::Result<EditorConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            EditorConfig::load(&path)
                .with_context(|| format!("loading editor config from {}", path.display()))
        }
        None => Ok(EditorConfig::default()),
    }
}

fn build_editor(config: &EditorConfig) -> Editor {
    let data_dir = std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let slot = JsonFileSlot::new(&data_dir, config.storage_key.clone());
    tracing::info!(path = %slot.path().display(), "editor state file");

    let store = EditorStore::with_slot(config, Box::new(slot));
    Editor::from_config(config, store)
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = load_config()?;
    let app = Application::new();

    app.run(move |cx| {
        gpui_component::init(cx);
        scribe_editor_view::init(cx);
        cx.activate(true);

        let editor = build_editor(&config);

        cx.spawn(async move |cx| {
            cx.open_window(
                WindowOptions {
                    titlebar: Some(TitlebarOptions {
                        title: Some("Scribe".into()),
                        appears_transparent: false,
                        traffic_light_position: None,
                    }),
                    ..Default::default()
                },
                |window, cx| {
                    let view = EditorView::view(editor, window, cx);
                    window.focus(&view.read(cx).focus_handle());
                    cx.new(|cx| Root::new(view, window, cx))
                },
            )?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });

    Ok(())
}
