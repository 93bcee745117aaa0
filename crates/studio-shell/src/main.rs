use anyhow::Result;

use studio_engine::logging::{init_logging, LoggingConfig};
use studio_engine::module::stub::{StubLoader, StubModule};
use studio_shell::{app, ShellConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = ShellConfig::from_env();
    log::info!(
        "canvas {}x{}, draw mode {}",
        config.canvas.width,
        config.canvas.height,
        if config.draw_mode { "on" } else { "off" }
    );
    log::info!("keys: R add, C add colored, Del clear, D draw mode, arrows resize canvas");

    // No native engine build ships with the shell; the in-process module stands in.
    app::run(config, StubLoader::new(StubModule::new()))
}
