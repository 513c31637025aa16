// cl_main.rs — client state and the per-frame simulation tick

use mazewolf_common::common::com_printf;
use mazewolf_common::cvar::{cvar_init, cvar_variable_value};
use mazewolf_common::pmove::{pmove, MoveParams, PmoveData};
use mazewolf_common::shared::{angle_vectors_tuple, VEC3_ORIGIN};
use mazewolf_common::world::World;

use crate::cl_input::{apply_pointer_deltas, InputState};
use crate::ref_def::{RefDef, Refresh};

/// One-time client startup: registers every cvar with its default.
pub fn cl_init() {
    cvar_init();
    com_printf("client initialized\n");
}

/// All mutable simulation state, owned by the tick loop and passed by
/// reference wherever it is needed. Nothing in here is a global.
pub struct ClientState {
    pub pm: PmoveData,
    pub input: InputState,
}

impl ClientState {
    /// Spawn at the center of cell `(col, row)`, eyes at cl_eyeheight.
    pub fn spawn(world: &World, col: usize, row: usize) -> Self {
        let cs = world.cell_size;
        let pm = PmoveData {
            origin: [
                (col as f32 + 0.5) * cs,
                cvar_variable_value("cl_eyeheight"),
                (row as f32 + 0.5) * cs,
            ],
            viewangles: VEC3_ORIGIN,
            ..Default::default()
        };
        Self {
            pm,
            input: InputState::new(),
        }
    }

    /// One simulation tick: pointer deltas into view angles, held keys into
    /// a collision-checked move, then a read-only snapshot to the renderer.
    pub fn frame(&mut self, frametime: f32, world: &World, refresh: &mut dyn Refresh) {
        // orientation first, so this tick's movement uses this tick's basis;
        // runs with zero deltas too, keeping the basis recompute unconditional
        let (dx, dy) = self.input.take_deltas();
        apply_pointer_deltas(
            &mut self.pm.viewangles,
            dx,
            dy,
            cvar_variable_value("sensitivity"),
            cvar_variable_value("cl_pitchclamp"),
        );

        self.pm.buttons = self.input.buttons();
        self.pm.frametime = frametime;
        let params = MoveParams::from_cvars();
        pmove(&mut self.pm, world, &params);

        let (forward, _, up) = angle_vectors_tuple(&self.pm.viewangles);
        let rd = RefDef {
            vieworg: self.pm.origin,
            viewforward: forward,
            viewup: up,
            world_extent: world.extent(),
            wall_height: cvar_variable_value("r_wallheight"),
            show_grid: cvar_variable_value("r_showgrid") != 0.0,
        };

        refresh.begin_frame();
        refresh.draw_world(&rd, world);
        refresh.end_frame();
    }
}

// ============================================================
// Tests
// ============================================================
