use std::str::FromStr;

use studio_engine::coords::CanvasSize;

use crate::canvas::{clamp_canvas, DEFAULT_CANVAS};

/// Shell configuration.
///
/// Defaults to an 800×600 canvas with draw mode off.
/// `from_env` layers `STUDIO_*` variables on top:
///
/// | variable               | field        |
/// |------------------------|--------------|
/// | `STUDIO_CANVAS_WIDTH`  | canvas width |
/// | `STUDIO_CANVAS_HEIGHT` | canvas height|
/// | `STUDIO_DRAW_MODE`     | draw_mode    |
/// | `STUDIO_SEED`          | seed         |
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub title: String,
    /// Initial canvas size; clamped to the shell's limits when applied.
    pub canvas: CanvasSize,
    pub draw_mode: bool,
    /// Seed for random shapes. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "Design Studio".to_string(),
            canvas: DEFAULT_CANVAS,
            draw_mode: false,
            seed: None,
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Applies overrides found through `lookup`. Malformed values are logged and skipped.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(w) = parse_var(&lookup, "STUDIO_CANVAS_WIDTH") {
            self.canvas.width = w;
        }
        if let Some(h) = parse_var(&lookup, "STUDIO_CANVAS_HEIGHT") {
            self.canvas.height = h;
        }
        if let Some(raw) = lookup("STUDIO_DRAW_MODE") {
            match parse_flag(&raw) {
                Some(on) => self.draw_mode = on,
                None => log::warn!("ignoring STUDIO_DRAW_MODE={raw:?}: expected a boolean"),
            }
        }
        if let Some(seed) = parse_var(&lookup, "STUDIO_SEED") {
            self.seed = Some(seed);
        }
        self.canvas = clamp_canvas(self.canvas);
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {key}={raw:?}: not a valid number");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
