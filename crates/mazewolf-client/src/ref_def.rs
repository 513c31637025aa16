// ref_def.rs — parameters handed to the renderer each frame

use mazewolf_common::shared::Vec3;
use mazewolf_common::world::World;

/// Everything the renderer needs for one frame. Built fresh each tick from
/// the simulation state; the renderer only ever sees this read-only
/// snapshot, never the live player state.
#[derive(Clone, Copy, Debug)]
pub struct RefDef {
    pub vieworg: Vec3,
    pub viewforward: Vec3,
    pub viewup: Vec3,
    /// world-space extent (width, depth) for floor/ceiling sizing
    pub world_extent: (f32, f32),
    pub wall_height: f32,
    /// debug cell-grid overlay (r_showgrid)
    pub show_grid: bool,
}

/// The renderer collaborator. Wall geometry comes from
/// `World::solid_cells()`; cells are corner-anchored, so implementations
/// place meshes at `(col + 0.5, row + 0.5) * cell_size` themselves.
pub trait Refresh {
    fn begin_frame(&mut self);
    fn draw_world(&mut self, rd: &RefDef, world: &World);
    fn end_frame(&mut self);
}

// ============================================================
// Tests
// ============================================================
