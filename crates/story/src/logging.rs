use tracing_subscriber::EnvFilter;

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Our crates at info, everything else at warn.
        EnvFilter::new("warn,scribe_story=info,scribe_editor_core=info,scribe_editor_view=info")
    })
}

pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_target(true)
        .try_init();
}
