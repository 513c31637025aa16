// collide.rs — disc-vs-grid collision probes and the swept segment test

use crate::shared::{vector_ma, vector_normalize, vector_subtract, Vec3};
use crate::world::World;

/// Samples on the conservative ring probe.
const RING_SAMPLES: usize = 16;

/// Fraction of the segment length a swept hit backs off from the surface,
/// so the mover never comes to rest exactly on a cell boundary.
const TRACE_BACKOFF: f32 = 0.01;

/// Segments shorter than this are stationary: no collision, no movement.
const MIN_TRACE_LEN: f32 = 1e-4;

/// Direction components below this are treated as parallel to the slab
/// instead of being inverted into an unusable 1/0.
const AXIS_EPSILON: f32 = 1e-6;

/// Extra cells searched around the swept segment's bounding box.
const TRACE_CELL_MARGIN: i32 = 2;

/// Result of a swept movement test.
#[derive(Clone, Copy, Debug)]
pub struct Trace {
    /// How far along the segment the mover got, 0..1 (1.0 = no hit).
    pub fraction: f32,
    pub endpos: Vec3,
    pub hit: bool,
}

// ============================================================
// Probe strategy selection
// ============================================================

/// Which stationary probe decides "does a disc of this radius fit here".
///
/// `ClosestPoint` is the default and the correctness baseline: exact
/// circle-vs-axis-aligned-square. `PointSample` and `Ring` are the earlier
/// approximations, kept for comparison and for callers that want their
/// (cheaper, less precise) behavior on purpose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProbeKind {
    /// Center plus 8 points at +-radius. Misses discs that overlap a cell
    /// corner between sample points; not for production movement.
    PointSample,
    /// RING_SAMPLES points on an enlarged circle. Never tunnels, but blocks
    /// some legal positions in tight corridors.
    Ring { safety_scale: f32 },
    ClosestPoint,
}

impl Default for ProbeKind {
    fn default() -> Self {
        ProbeKind::ClosestPoint
    }
}

impl ProbeKind {
    /// Ring probe with the safety scale taken from the pm_safetyscale cvar
    /// (falls back to the stock 1.6 when unset).
    pub fn ring_from_cvars() -> Self {
        let scale = crate::cvar::cvar_variable_value("pm_safetyscale");
        ProbeKind::Ring {
            safety_scale: if scale > 0.0 { scale } else { 1.6 },
        }
    }

    pub fn blocked(&self, world: &World, pos: &Vec3, radius: f32) -> bool {
        match *self {
            ProbeKind::PointSample => point_sample_blocked(world, pos, radius),
            ProbeKind::Ring { safety_scale } => ring_blocked(world, pos, radius * safety_scale),
            ProbeKind::ClosestPoint => closest_point_blocked(world, pos, radius),
        }
    }
}

// ============================================================
// Stationary probes
// ============================================================

/// Center + 4 cardinal + 4 diagonal point tests at +-radius.
pub fn point_sample_blocked(world: &World, pos: &Vec3, radius: f32) -> bool {
    let (x, z) = (pos[0], pos[2]);

    if world.is_solid_at(x, z) {
        return true;
    }
    if world.is_solid_at(x + radius, z) || world.is_solid_at(x - radius, z) {
        return true;
    }
    if world.is_solid_at(x, z + radius) || world.is_solid_at(x, z - radius) {
        return true;
    }

    world.is_solid_at(x + radius, z + radius)
        || world.is_solid_at(x + radius, z - radius)
        || world.is_solid_at(x - radius, z + radius)
        || world.is_solid_at(x - radius, z - radius)
}

/// Point tests on a circle of `safety_radius` around the candidate center.
/// The enlarged radius papers over the gaps between samples.
pub fn ring_blocked(world: &World, pos: &Vec3, safety_radius: f32) -> bool {
    for i in 0..RING_SAMPLES {
        let angle = i as f32 / RING_SAMPLES as f32 * std::f32::consts::TAU;
        let check_x = pos[0] + safety_radius * angle.cos();
        let check_z = pos[2] + safety_radius * angle.sin();
        if world.is_solid_at(check_x, check_z) {
            return true;
        }
    }
    false
}

/// Exact circle-vs-cell test: for every solid cell near the query point,
/// clamp the center onto the cell square and compare the squared distance
/// against radius^2. The candidate neighborhood is bounded by the radius and
/// clamped to the grid, never a whole-grid scan.
pub fn closest_point_blocked(world: &World, pos: &Vec3, radius: f32) -> bool {
    // a disc poking past the grid edge is in out-of-bounds territory,
    // and out of bounds is solid
    let (ext_x, ext_z) = world.extent();
    if pos[0] - radius < 0.0
        || pos[2] - radius < 0.0
        || pos[0] + radius > ext_x
        || pos[2] + radius > ext_z
    {
        return true;
    }

    let cs = world.cell_size;
    let center_col = (pos[0] / cs) as i32;
    let center_row = (pos[2] / cs) as i32;
    let radius_cells = (radius / cs).ceil() as i32 + 1;

    for row in (center_row - radius_cells)..=(center_row + radius_cells) {
        for col in (center_col - radius_cells)..=(center_col + radius_cells) {
            if col < 0 || row < 0 || col as usize >= world.width || row as usize >= world.height {
                continue;
            }
            if !world.solid(col as usize, row as usize) {
                continue;
            }

            let min_x = col as f32 * cs;
            let min_z = row as f32 * cs;
            let closest_x = pos[0].clamp(min_x, min_x + cs);
            let closest_z = pos[2].clamp(min_z, min_z + cs);

            let dx = pos[0] - closest_x;
            let dz = pos[2] - closest_z;
            if dx * dx + dz * dz < radius * radius {
                return true;
            }
        }
    }

    false
}

// ============================================================
// Swept test
// ============================================================

/// Slab-method ray/box intersection. Returns `(t_min, t_max)` in world
/// units along `dir`, or None when the ray misses the box entirely.
fn ray_box_intersection(origin: &Vec3, dir: &Vec3, mins: &Vec3, maxs: &Vec3) -> Option<(f32, f32)> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        if dir[axis].abs() < AXIS_EPSILON {
            // parallel to this slab: either always inside it or never
            if origin[axis] < mins[axis] || origin[axis] > maxs[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / dir[axis];
        let mut t1 = (mins[axis] - origin[axis]) * inv;
        let mut t2 = (maxs[axis] - origin[axis]) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
    }

    if t_max >= t_min && t_max >= 0.0 {
        Some((t_min, t_max))
    } else {
        None
    }
}

/// Sweep a disc of `radius` from `start` to `end` against the grid.
/// Every solid cell near the segment is inflated by the radius and tested
/// with the slab method; the earliest entry wins. On a hit the end position
/// is pulled back by TRACE_BACKOFF so the mover stops short of the surface.
pub fn trace_move(world: &World, start: &Vec3, end: &Vec3, radius: f32) -> Trace {
    let mut dir = vector_subtract(end, start);
    let dist = vector_normalize(&mut dir);

    if dist < MIN_TRACE_LEN {
        return Trace {
            fraction: 1.0,
            endpos: *start,
            hit: false,
        };
    }

    let cs = world.cell_size;
    let min_col = ((((start[0].min(end[0]) - radius) / cs) as i32) - TRACE_CELL_MARGIN).max(0);
    let min_row = ((((start[2].min(end[2]) - radius) / cs) as i32) - TRACE_CELL_MARGIN).max(0);
    let max_col =
        ((((start[0].max(end[0]) + radius) / cs) as i32) + TRACE_CELL_MARGIN).min(world.width as i32 - 1);
    let max_row = ((((start[2].max(end[2]) + radius) / cs) as i32) + TRACE_CELL_MARGIN)
        .min(world.height as i32 - 1);

    let mut closest = dist;
    let mut hit = false;

    for row in min_row..=max_row {
        for col in min_col..=max_col {
            if !world.solid(col as usize, row as usize) {
                continue;
            }

            // cell box inflated by the disc radius on every side
            let mins = [
                col as f32 * cs - radius,
                start[1] - radius,
                row as f32 * cs - radius,
            ];
            let maxs = [
                col as f32 * cs + cs + radius,
                start[1] + radius,
                row as f32 * cs + cs + radius,
            ];

            if let Some((t_min, _)) = ray_box_intersection(start, &dir, &mins, &maxs) {
                if t_min < closest {
                    closest = t_min;
                    hit = true;
                }
            }
        }
    }

    if hit {
        let fraction = (closest / dist - TRACE_BACKOFF).max(0.0);
        Trace {
            fraction,
            endpos: vector_ma(start, fraction * dist, &dir),
            hit: true,
        }
    } else {
        Trace {
            fraction: 1.0,
            endpos: *end,
            hit: false,
        }
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_point_against_unit_cell() {
        // single solid cell spanning (0,0)-(1,1), open floor to its right
        let world = World::parse("#..\n", 1.0);

        // touching: closest point (1.0, 0.5) is 0.2 away, inside radius 0.3
        assert!(closest_point_blocked(&world, &[1.2, 0.0, 0.5], 0.3));
        // barely overlapping
        assert!(closest_point_blocked(&world, &[1.05, 0.0, 0.5], 0.3));
        // clear of the edge: 0.35 away
        assert!(!closest_point_blocked(&world, &[1.35, 0.0, 0.5], 0.3));
        // far away
        assert!(!closest_point_blocked(&world, &[2.0, 0.0, 0.5], 0.3));
    }

    #[test]
    fn test_closest_point_grid_edge_is_solid() {
        let world = World::parse("...\n...\n...\n", 1.0);
        // disc wholly inside
        assert!(!closest_point_blocked(&world, &[1.5, 0.0, 1.5], 0.3));
        // disc pokes past the left edge
        assert!(closest_point_blocked(&world, &[0.2, 0.0, 1.5], 0.3));
        // disc pokes past the far edge
        assert!(closest_point_blocked(&world, &[1.5, 0.0, 2.9], 0.3));
    }

    #[test]
    fn test_closest_point_empty_world_blocks() {
        let world = World::empty(1.0);
        assert!(closest_point_blocked(&world, &[0.0, 0.0, 0.0], 0.3));
        assert!(closest_point_blocked(&world, &[5.0, 0.0, 5.0], 0.3));
    }

    /// An 8x8 grid of 0.25-unit cells with one solid cell at (4,4),
    /// spanning world (1.0,1.0)-(1.25,1.25).
    fn small_cell_world() -> World {
        World::parse(
            "........\n........\n........\n........\n....#...\n........\n........\n........\n",
            0.25,
        )
    }

    #[test]
    fn test_point_sample_misses_corner_overlap() {
        // With the radius larger than a cell, a whole cell fits between the
        // 9 sample points: the disc at (0.96, 0.97) overlaps the corner of
        // the solid cell at (1.0, 1.0) while every sample lands in empty
        // cells (the +x/+z diagonal overshoots past the far corner). The
        // 9-point probe reports clear, the exact probe reports blocked --
        // the gap that motivated the closest-point strategy.
        let world = small_cell_world();
        let pos: Vec3 = [0.96, 0.0, 0.97];

        assert!(!point_sample_blocked(&world, &pos, 0.3));
        assert!(closest_point_blocked(&world, &pos, 0.3));
    }

    #[test]
    fn test_point_sample_hits_face_overlap() {
        let world = World::parse("#..\n", 1.0);
        assert!(point_sample_blocked(&world, &[1.2, 0.0, 0.5], 0.3));
        assert!(!point_sample_blocked(&world, &[1.35, 0.0, 0.5], 0.3));
    }

    #[test]
    fn test_ring_is_conservative() {
        let world = World::parse("#..\n", 1.0);
        let pos: Vec3 = [1.35, 0.0, 0.5];
        // exact probe: clear at 0.35 from the face with radius 0.3
        assert!(!closest_point_blocked(&world, &pos, 0.3));
        // ring probe at safety radius 0.48 reaches into the cell
        assert!(ring_blocked(&world, &pos, 0.3 * 1.6));
    }

    #[test]
    fn test_probe_kind_dispatch() {
        let world = small_cell_world();
        let pos: Vec3 = [0.96, 0.0, 0.97];
        assert!(!ProbeKind::PointSample.blocked(&world, &pos, 0.3));
        assert!(ProbeKind::default().blocked(&world, &pos, 0.3));
    }

    #[test]
    fn test_ring_from_cvars_falls_back() {
        // without an initialized cvar context the stock scale applies
        crate::cvar::cvar_shutdown();
        let kind = ProbeKind::ring_from_cvars();
        assert_eq!(kind, ProbeKind::Ring { safety_scale: 1.6 });
    }

    #[test]
    fn test_trace_stops_short_of_inflated_face() {
        // sweep across a solid cell spanning z in [0,1]
        let world = World::parse("#", 1.0);
        let start: Vec3 = [0.5, 0.5, -1.0];
        let end: Vec3 = [0.5, 0.5, 2.0];

        let trace = trace_move(&world, &start, &end, 0.1);
        assert!(trace.hit);
        assert!(trace.fraction < 1.0);
        // stops strictly before the inflated near face at z = -0.1
        assert!(trace.endpos[2] < -0.1);
        // but did advance from the start
        assert!(trace.endpos[2] > start[2]);
    }

    #[test]
    fn test_trace_zero_length_segment() {
        let world = World::parse("#", 1.0);
        let pos: Vec3 = [0.5, 0.5, 0.5];
        let trace = trace_move(&world, &pos, &pos, 0.1);
        assert!(!trace.hit);
        assert_eq!(trace.fraction, 1.0);
        assert!(crate::shared::vector_compare(&trace.endpos, &pos));
    }

    #[test]
    fn test_trace_axis_parallel_miss() {
        // segment slides past the cell outside its inflated x slab;
        // the zero z-direction component must not poison the result
        let world = World::parse("#..\n", 1.0);
        let start: Vec3 = [1.5, 0.5, 0.2];
        let end: Vec3 = [2.5, 0.5, 0.2];

        let trace = trace_move(&world, &start, &end, 0.1);
        assert!(!trace.hit);
        assert!(crate::shared::vector_compare(&trace.endpos, &end));
    }

    #[test]
    fn test_trace_axis_parallel_hit() {
        let world = World::parse("#", 1.0);
        let start: Vec3 = [-1.0, 0.5, 0.5];
        let end: Vec3 = [2.0, 0.5, 0.5];

        let trace = trace_move(&world, &start, &end, 0.1);
        assert!(trace.hit);
        assert!(trace.endpos[0] < -0.1);
    }

    #[test]
    fn test_trace_open_world_full_move() {
        let world = World::parse("...\n...\n...\n", 1.0);
        let start: Vec3 = [0.5, 0.0, 0.5];
        let end: Vec3 = [2.5, 0.0, 2.5];

        let trace = trace_move(&world, &start, &end, 0.1);
        assert!(!trace.hit);
        assert_eq!(trace.fraction, 1.0);
        assert!(crate::shared::vector_compare(&trace.endpos, &end));
    }
}
