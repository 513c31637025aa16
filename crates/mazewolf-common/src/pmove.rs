// pmove.rs — player movement code

use crate::collide::{closest_point_blocked, trace_move};
use crate::cvar::cvar_variable_value;
use crate::shared::{
    angle_vectors, vector_ma, vector_normalize, vector_length, MoveButtons, Vec3, VEC3_ORIGIN,
};
use crate::world::World;

// ============================================================
// Constants
// ============================================================

/// Wish directions shorter than this mean "no keys held".
const MIN_WISH_LEN: f32 = 0.0001;

// ============================================================
// Movement parameters — snapshot of the pm_* cvars for one tick
// ============================================================

#[derive(Clone, Copy, Debug)]
pub struct MoveParams {
    /// world units per second
    pub speed: f32,
    /// collision radius (the safety margin, not the visual width)
    pub radius: f32,
    /// sub-steps per tick; keeps single-step penetration below the radius
    pub substeps: u32,
    /// fixed eye height the Y coordinate is pinned to
    pub eye_height: f32,
}

impl MoveParams {
    pub fn from_cvars() -> Self {
        let mut p = Self {
            speed: cvar_variable_value("pm_speed"),
            radius: cvar_variable_value("pm_radius"),
            substeps: cvar_variable_value("pm_substeps") as u32,
            eye_height: cvar_variable_value("cl_eyeheight"),
        };
        if p.substeps == 0 {
            p.substeps = 30;
        }
        p
    }
}

impl Default for MoveParams {
    fn default() -> Self {
        Self {
            speed: 2.5,
            radius: 0.3,
            substeps: 30,
            eye_height: 1.0,
        }
    }
}

// ============================================================
// Pmove state — in/out data for one movement call
// ============================================================

#[derive(Clone, Copy, Debug)]
pub struct PmoveData {
    pub origin: Vec3,
    /// view angles in degrees, [pitch, yaw, roll]
    pub viewangles: Vec3,
    /// held movement keys for this tick
    pub buttons: MoveButtons,
    /// seconds covered by this tick
    pub frametime: f32,
}

impl Default for PmoveData {
    fn default() -> Self {
        Self {
            origin: VEC3_ORIGIN,
            viewangles: VEC3_ORIGIN,
            buttons: MoveButtons::empty(),
            frametime: 0.0,
        }
    }
}

/// Horizontal wish direction from the held buttons and the view basis.
/// Forward/right are projected onto the X/Z plane and renormalized, so
/// looking up or down never changes ground speed. Returns None when no
/// buttons are held or opposing keys cancel out.
fn wish_dir(pm: &PmoveData) -> Option<Vec3> {
    if pm.buttons.is_empty() {
        return None;
    }

    let mut forward = VEC3_ORIGIN;
    let mut right = VEC3_ORIGIN;
    angle_vectors(&pm.viewangles, Some(&mut forward), Some(&mut right), None);

    forward[1] = 0.0;
    vector_normalize(&mut forward);
    right[1] = 0.0;
    vector_normalize(&mut right);

    let mut wish = VEC3_ORIGIN;
    if pm.buttons.contains(MoveButtons::FORWARD) {
        wish = vector_ma(&wish, 1.0, &forward);
    }
    if pm.buttons.contains(MoveButtons::BACK) {
        wish = vector_ma(&wish, -1.0, &forward);
    }
    if pm.buttons.contains(MoveButtons::MOVERIGHT) {
        wish = vector_ma(&wish, 1.0, &right);
    }
    if pm.buttons.contains(MoveButtons::MOVELEFT) {
        wish = vector_ma(&wish, -1.0, &right);
    }

    if vector_length(&wish) < MIN_WISH_LEN {
        return None;
    }
    vector_normalize(&mut wish);
    Some(wish)
}

/// Advance the player for one tick with sub-stepped collision checking.
///
/// The full move distance is split into `substeps` equal advances so a
/// single step can never carry the disc through a wall thinner than the
/// collision radius. A blocked sub-step falls back to axis-separated
/// sliding: the X and Z components are tried alone, so motion along a wall
/// continues when the diagonal is blocked. When neither axis clears, the
/// player is flush against a corner and the rest of the tick is dropped.
pub fn pmove(pm: &mut PmoveData, world: &World, params: &MoveParams) {
    let dir = match wish_dir(pm) {
        Some(dir) => dir,
        None => return, // origin stays bit-for-bit untouched
    };

    pm.origin[1] = params.eye_height;

    let total_distance = params.speed * pm.frametime;
    let step_size = total_distance / params.substeps as f32;

    for _step in 0..params.substeps {
        let next = vector_ma(&pm.origin, step_size, &dir);

        if !closest_point_blocked(world, &next, params.radius) {
            pm.origin = next;
            continue;
        }

        // blocked: slide by trying each horizontal axis on its own
        let mut moved = false;

        let mut x_next = pm.origin;
        x_next[0] += dir[0] * step_size;
        if !closest_point_blocked(world, &x_next, params.radius) {
            pm.origin = x_next;
            moved = true;
        }

        let mut z_next = pm.origin;
        z_next[2] += dir[2] * step_size;
        if !closest_point_blocked(world, &z_next, params.radius) {
            pm.origin = z_next;
            moved = true;
        }

        if !moved {
            break; // wedged into a corner, give up the rest of the tick
        }
    }
}

/// Higher-fidelity variant for fast movers: one swept trace over the whole
/// tick displacement instead of sub-stepping, then an axis-separated retry
/// with the remaining distance. The trace endpoint is validated with the
/// exact probe before it is accepted, which also covers the degenerate
/// empty world (where the trace has no cells to test).
pub fn pmove_swept(pm: &mut PmoveData, world: &World, params: &MoveParams) {
    let dir = match wish_dir(pm) {
        Some(dir) => dir,
        None => return,
    };

    pm.origin[1] = params.eye_height;

    let total_distance = params.speed * pm.frametime;
    let end = vector_ma(&pm.origin, total_distance, &dir);

    let trace = trace_move(world, &pm.origin, &end, params.radius);
    if !closest_point_blocked(world, &trace.endpos, params.radius) {
        pm.origin = trace.endpos;
    }
    if !trace.hit {
        return;
    }

    // slide the remainder along each axis separately
    let remaining = total_distance * (1.0 - trace.fraction);
    if remaining <= 0.0 {
        return;
    }

    for axis in [0usize, 2] {
        let mut axis_dir = VEC3_ORIGIN;
        axis_dir[axis] = dir[axis];
        if vector_length(&axis_dir) < MIN_WISH_LEN {
            continue;
        }
        vector_normalize(&mut axis_dir);

        let axis_end = vector_ma(&pm.origin, remaining * dir[axis].abs(), &axis_dir);
        let axis_trace = trace_move(world, &pm.origin, &axis_end, params.radius);
        if !closest_point_blocked(world, &axis_trace.endpos, params.radius) {
            pm.origin = axis_trace.endpos;
        }
    }
}

// ============================================================
// Tests
// ============================================================
