use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "studio_engine=debug,wgpu=warn"). On the web only the level part of the
/// filter is honoured.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Native only: ANSI coloring behavior.
    #[cfg(not(target_family = "wasm"))]
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            #[cfg(not(target_family = "wasm"))]
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent; subsequent calls are ignored. Call early, before the engine
/// binding is initialized, so module-load diagnostics are captured.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| install(config));
}

#[cfg(not(target_family = "wasm"))]
fn install(config: LoggingConfig) {
    let mut builder = env_logger::Builder::new();

    if let Some(filter) = config.env_filter {
        builder.parse_filters(&filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }

    builder.write_style(config.write_style);

    // A test harness may have installed a logger already.
    if builder.try_init().is_err() {
        return;
    }

    log::debug!("logging initialized");
}

#[cfg(target_family = "wasm")]
fn install(config: LoggingConfig) {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    let level = config
        .env_filter
        .as_deref()
        .and_then(|f| f.parse::<log::Level>().ok())
        .unwrap_or(log::Level::Info);

    if console_log::init_with_level(level).is_err() {
        return;
    }

    log::debug!("logging initialized");
}
