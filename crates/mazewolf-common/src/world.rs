// world.rs — cell-grid world: map parsing and point-in-solid queries

use crate::common::com_printf;
use crate::crc::crc_block;

/// Built-in map used when no map file is present on disk.
pub const DEFAULT_MAP: &str = "\
########################
#......................#
#.....11.......22.....#
#.....1............2..#
#......11..........2..#
#.......1.............#
#.......1.............#
#.......1.............#
#.......11............#
#.........33..........#
#.....................#
#.....................#
#.........3...........#
#.........3...........#
#.........3...........#
#.........3...........#
#..........33.........#
#.....................#
#.....................#
########################
";

/// The occupancy grid the whole simulation collides against.
///
/// Cell `(col, row)` occupies world space
/// `[col*cell_size, (col+1)*cell_size) x [row*cell_size, (row+1)*cell_size)`
/// on the X/Z plane. Renderers that place wall meshes at cell centers must
/// apply the `+0.5 * cell_size` translation themselves; the grid stores
/// corner-anchored cells only.
///
/// Built once at load time, immutable afterwards. Every coordinate outside
/// the grid is solid, so the degenerate 0x0 grid (failed load) blocks all
/// movement instead of producing undefined behavior.
pub struct World {
    cells: Vec<bool>,
    materials: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub cell_size: f32,
    /// CRC of the source text, for reload detection.
    pub checksum: u16,
}

impl World {
    /// The degenerate empty world: no cells, every query out of bounds.
    pub fn empty(cell_size: f32) -> Self {
        Self {
            cells: Vec::new(),
            materials: Vec::new(),
            width: 0,
            height: 0,
            cell_size,
            checksum: 0,
        }
    }

    /// Parse map text into a grid. One line per row, one character per cell:
    /// `#` is a wall, digits 1-9 are walls carrying that material id, `.` or
    /// anything else is empty floor. Rows shorter than the widest line are
    /// padded with empty cells. Never fails.
    pub fn parse(text: &str, cell_size: f32) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let height = lines.len();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut cells = vec![false; width * height];
        let mut materials = vec![0u8; width * height];

        for (row, line) in lines.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                let idx = row * width + col;
                match c {
                    '#' => {
                        cells[idx] = true;
                    }
                    '1'..='9' => {
                        cells[idx] = true;
                        materials[idx] = c as u8 - b'0';
                    }
                    _ => {} // empty, material 0
                }
            }
        }

        Self {
            cells,
            materials,
            width,
            height,
            cell_size,
            checksum: crc_block(text.as_bytes()),
        }
    }

    /// Load a map file from disk. An unreadable file degrades to the empty
    /// world, which reports solid everywhere.
    pub fn load(path: &str, cell_size: f32) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let world = Self::parse(&text, cell_size);
                com_printf(&format!(
                    "loaded {} ({}x{}, crc {:04x})\n",
                    path, world.width, world.height, world.checksum
                ));
                world
            }
            Err(err) => {
                com_printf(&format!("couldn't load {}: {}\n", path, err));
                Self::empty(cell_size)
            }
        }
    }

    /// The built-in fallback map.
    pub fn default_map(cell_size: f32) -> Self {
        Self::parse(DEFAULT_MAP, cell_size)
    }

    /// Cell-index occupancy query. Out of bounds is solid.
    pub fn solid(&self, col: usize, row: usize) -> bool {
        if col >= self.width || row >= self.height {
            return true;
        }
        self.cells[row * self.width + col]
    }

    /// World-coordinate occupancy query on the X/Z plane.
    /// Out of bounds (including any negative coordinate) is solid.
    pub fn is_solid_at(&self, x: f32, z: f32) -> bool {
        // guard the sign before truncating, so -0.4 doesn't land in cell 0
        if x < 0.0 || z < 0.0 {
            return true;
        }
        let col = (x / self.cell_size) as usize;
        let row = (z / self.cell_size) as usize;
        self.solid(col, row)
    }

    /// Material id of a cell; 0 for empty or out-of-bounds cells.
    pub fn material_at(&self, col: usize, row: usize) -> u8 {
        if col >= self.width || row >= self.height {
            return 0;
        }
        self.materials[row * self.width + col]
    }

    /// Iterate `(col, row, material)` over every solid cell, row-major.
    /// This is the geometry feed for the renderer.
    pub fn solid_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).filter_map(move |col| {
                if self.cells[row * self.width + col] {
                    Some((col, row, self.materials[row * self.width + col]))
                } else {
                    None
                }
            })
        })
    }

    /// Overall world-space extent `(width, depth)` for floor/ceiling sizing.
    pub fn extent(&self) -> (f32, f32) {
        (
            self.width as f32 * self.cell_size,
            self.height as f32 * self.cell_size,
        )
    }

    /// Write the occupancy back out as map text. Material ids collapse to
    /// `#`; re-parsing the result reproduces the same occupancy.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                out.push(if self.cells[row * self.width + col] { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_rows() {
        let world = World::parse("##\n..\n", 1.0);
        assert_eq!(world.width, 2);
        assert_eq!(world.height, 2);
        assert!(world.is_solid_at(0.5, 0.5));
        assert!(world.is_solid_at(1.5, 0.5));
        assert!(!world.is_solid_at(0.5, 1.5));
        assert!(!world.is_solid_at(1.5, 1.5));
    }

    #[test]
    fn test_out_of_bounds_is_solid() {
        let world = World::parse("..\n..\n", 1.0);
        assert!(world.is_solid_at(-0.1, 0.5));
        assert!(world.is_solid_at(0.5, -0.1));
        assert!(world.is_solid_at(2.0, 0.5));
        assert!(world.is_solid_at(0.5, 2.0));
        assert!(world.is_solid_at(100.0, 100.0));
        // interior still empty
        assert!(!world.is_solid_at(1.0, 1.0));
    }

    #[test]
    fn test_negative_near_zero_is_solid() {
        // truncation alone would map -0.4 into column 0
        let world = World::parse("..\n", 1.0);
        assert!(world.is_solid_at(-0.4, 0.5));
        assert!(world.is_solid_at(0.5, -0.4));
    }

    #[test]
    fn test_ragged_rows_padded() {
        let world = World::parse("####\n#\n####\n", 1.0);
        assert_eq!(world.width, 4);
        assert_eq!(world.height, 3);
        assert!(world.solid(0, 1));
        // beyond the short row's text: empty, not a crash
        assert!(!world.solid(1, 1));
        assert!(!world.solid(3, 1));
    }

    #[test]
    fn test_materials() {
        let world = World::parse("#12\n...\n", 1.0);
        assert_eq!(world.material_at(0, 0), 0); // '#' is material 0
        assert_eq!(world.material_at(1, 0), 1);
        assert_eq!(world.material_at(2, 0), 2);
        assert_eq!(world.material_at(0, 1), 0); // empty
        assert_eq!(world.material_at(9, 9), 0); // out of bounds
        // digits are still solid
        assert!(world.solid(1, 0));
        assert!(world.solid(2, 0));
    }

    #[test]
    fn test_unknown_chars_are_empty() {
        let world = World::parse("#x #\n", 1.0);
        assert!(world.solid(0, 0));
        assert!(!world.solid(1, 0));
        assert!(!world.solid(2, 0));
        assert!(world.solid(3, 0));
    }

    #[test]
    fn test_empty_world_blocks_everything() {
        let world = World::empty(1.0);
        assert_eq!(world.width, 0);
        assert_eq!(world.height, 0);
        assert!(world.is_solid_at(0.0, 0.0));
        assert!(world.is_solid_at(5.0, 5.0));
        assert_eq!(world.extent(), (0.0, 0.0));
    }

    #[test]
    fn test_load_missing_file_degrades() {
        let world = World::load("does/not/exist.txt", 1.0);
        assert_eq!(world.width, 0);
        assert!(world.is_solid_at(1.0, 1.0));
    }

    #[test]
    fn test_cell_size_scales_queries() {
        let world = World::parse("#.\n", 2.0);
        assert!(world.is_solid_at(1.9, 0.1));
        assert!(!world.is_solid_at(2.1, 0.1));
        assert_eq!(world.extent(), (4.0, 2.0));
    }

    #[test]
    fn test_solid_cells_iterator() {
        let world = World::parse("#.2\n...\n", 1.0);
        let cells: Vec<_> = world.solid_cells().collect();
        assert_eq!(cells, vec![(0, 0, 0), (2, 0, 2)]);
    }

    #[test]
    fn test_serialize_round_trip() {
        let world = World::parse("#12\n.#.\n##\n", 1.0);
        let text = world.serialize();
        let reparsed = World::parse(&text, 1.0);
        assert_eq!(reparsed.width, world.width);
        assert_eq!(reparsed.height, world.height);
        for row in 0..world.height {
            for col in 0..world.width {
                assert_eq!(reparsed.solid(col, row), world.solid(col, row));
            }
        }
    }

    #[test]
    fn test_checksum_differs() {
        let a = World::parse("##\n", 1.0);
        let b = World::parse("#.\n", 1.0);
        assert_ne!(a.checksum, b.checksum);
        let c = World::parse("##\n", 1.0);
        assert_eq!(a.checksum, c.checksum);
    }

    #[test]
    fn test_default_map_is_enclosed() {
        let world = World::default_map(1.0);
        assert!(world.width >= 20 && world.height == 20);
        // full top and bottom walls
        for col in 0..world.width {
            assert!(world.solid(col, 0));
            assert!(world.solid(col, world.height - 1));
        }
        // open interior near spawn
        assert!(!world.solid(2, 2));
    }
}
