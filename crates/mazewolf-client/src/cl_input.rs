// cl_input.rs — held-key and pointer state from the input collaborator

use mazewolf_common::shared::{MoveButtons, Vec3, PITCH, YAW};

/// Snapshot-style input state. The window layer calls `key_down`/`key_up`
/// and `pointer_move` as events arrive; the simulation drains the pointer
/// accumulator once per tick with `take_deltas`.
pub struct InputState {
    buttons: MoveButtons,
    last_x: f32,
    last_y: f32,
    accum_dx: f32,
    accum_dy: f32,
    /// next pointer event only seeds the last position
    first_event: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            buttons: MoveButtons::empty(),
            last_x: 0.0,
            last_y: 0.0,
            accum_dx: 0.0,
            accum_dy: 0.0,
            first_event: true,
        }
    }

    pub fn key_down(&mut self, button: MoveButtons) {
        self.buttons |= button;
    }

    pub fn key_up(&mut self, button: MoveButtons) {
        self.buttons &= !button;
    }

    pub fn buttons(&self) -> MoveButtons {
        self.buttons
    }

    /// Feed an absolute pointer position. The first event after creation or
    /// `reset_pointer` is swallowed except to seed the reference position,
    /// so regaining focus doesn't whip the view around.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.first_event {
            self.last_x = x;
            self.last_y = y;
            self.first_event = false;
            return;
        }

        self.accum_dx += x - self.last_x;
        self.accum_dy += y - self.last_y;
        self.last_x = x;
        self.last_y = y;
    }

    /// Re-arm the first-event latch (pointer grab lost and regained).
    pub fn reset_pointer(&mut self) {
        self.first_event = true;
    }

    /// Drain the accumulated pointer delta for this tick.
    pub fn take_deltas(&mut self) -> (f32, f32) {
        let deltas = (self.accum_dx, self.accum_dy);
        self.accum_dx = 0.0;
        self.accum_dy = 0.0;
        deltas
    }
}

/// Turn a tick's pointer delta into view angles. Screen Y grows downward
/// while pitch grows upward, so the vertical axis is inverted. Pitch is
/// clamped inside +-`pitch_clamp` so the basis never degenerates. Runs
/// every tick, with (0,0) deltas included, so callers can recompute the
/// basis from the returned angles unconditionally.
pub fn apply_pointer_deltas(
    viewangles: &mut Vec3,
    dx: f32,
    dy: f32,
    sensitivity: f32,
    pitch_clamp: f32,
) {
    viewangles[YAW] += dx * sensitivity;
    viewangles[PITCH] += -dy * sensitivity;

    if viewangles[PITCH] > pitch_clamp {
        viewangles[PITCH] = pitch_clamp;
    }
    if viewangles[PITCH] < -pitch_clamp {
        viewangles[PITCH] = -pitch_clamp;
    }
}

// ============================================================
// Tests
// ============================================================
