//! winit event translation.
//!
//! Turns window events into shell inputs: canvas-local pointer events and the
//! keyboard shortcuts that stand in for the studio's buttons and inputs.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use studio_engine::coords::Vec2;

use crate::canvas::{to_canvas_local, CANVAS_ORIGIN, CANVAS_STEP};

/// User-level actions bound to keys.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShellCommand {
    AddRectangle,
    AddColoredRectangle,
    ClearShapes,
    ToggleDrawMode,
    /// Grow (positive) or shrink (negative) the canvas by this many pixels.
    ResizeCanvas { dw: i32, dh: i32 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ShellInput {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp(Vec2),
    Command(ShellCommand),
}

/// Keeps the last pointer position; winit button events carry none.
#[derive(Debug, Default)]
pub struct PointerTracker {
    pos: Option<Vec2>,
}

impl PointerTracker {
    pub fn position(&self) -> Option<Vec2> {
        self.pos
    }

    /// Records a cursor move and returns the canvas-local position.
    pub fn moved(&mut self, client: PhysicalPosition<f64>) -> Vec2 {
        let local = to_canvas_local(Vec2::new(client.x as f32, client.y as f32), CANVAS_ORIGIN);
        self.pos = Some(local);
        local
    }

    pub fn left(&mut self) {
        self.pos = None;
    }

    /// Primary button transition at the last known position.
    pub fn button(&self, state: ElementState) -> ShellInput {
        let pos = self.pos.unwrap_or_default();
        match state {
            ElementState::Pressed => ShellInput::PointerDown(pos),
            ElementState::Released => ShellInput::PointerUp(pos),
        }
    }
}

/// Translates a window event. Returns `None` for events the shell ignores.
pub fn translate_window_event(
    pointer: &mut PointerTracker,
    event: &WindowEvent,
) -> Option<ShellInput> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            Some(ShellInput::PointerMove(pointer.moved(*position)))
        }

        WindowEvent::CursorLeft { .. } => {
            pointer.left();
            None
        }

        WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
            Some(pointer.button(*state))
        }

        WindowEvent::KeyboardInput { event, .. }
            if event.state == ElementState::Pressed && !event.repeat =>
        {
            match event.physical_key {
                PhysicalKey::Code(code) => command_for_key(code).map(ShellInput::Command),
                PhysicalKey::Unidentified(_) => None,
            }
        }

        _ => None,
    }
}

/// Key bindings.
pub fn command_for_key(code: KeyCode) -> Option<ShellCommand> {
    let cmd = match code {
        KeyCode::KeyR => ShellCommand::AddRectangle,
        KeyCode::KeyC => ShellCommand::AddColoredRectangle,
        KeyCode::Delete | KeyCode::Backspace => ShellCommand::ClearShapes,
        KeyCode::KeyD => ShellCommand::ToggleDrawMode,

        KeyCode::ArrowRight => ShellCommand::ResizeCanvas { dw: CANVAS_STEP, dh: 0 },
        KeyCode::ArrowLeft => ShellCommand::ResizeCanvas { dw: -CANVAS_STEP, dh: 0 },
        KeyCode::ArrowDown => ShellCommand::ResizeCanvas { dw: 0, dh: CANVAS_STEP },
        KeyCode::ArrowUp => ShellCommand::ResizeCanvas { dw: 0, dh: -CANVAS_STEP },

        _ => return None,
    };
    Some(cmd)
}
