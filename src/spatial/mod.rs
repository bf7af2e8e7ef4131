use glam::Vec2;

/// Integer grid cell coordinate.
pub type Cell = (i32, i32);

/// Frozen per-tick view of one boid.
/// Stored alongside the spatial hash to avoid ECS lookups in the hot path.
#[derive(Debug, Clone, Copy)]
pub struct BoidSnapshot {
    pub entity: hecs::Entity,
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// What other boids perceive this tick: state `delay` ticks ago.
    /// `None` when the history is too short for the current delay.
    pub perceived: Option<Perceived>,
}

/// Position and velocity as read from history at the perception delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perceived {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Spatial hash grid for 3x3 block neighbor queries.
///
/// Cell size should match the visual range so any boid in range lies within
/// the surrounding block. Buckets are keyed by a multiplicative hash of the
/// cell; every entry remembers its exact cell so hash collisions never leak
/// boids from outside the queried block.
pub struct SpatialHash {
    cell_size: f32,
    table_size: usize,
    /// Each bucket holds (cell, snapshot index). Pre-allocated, cleared each tick.
    buckets: Vec<Vec<(Cell, u32)>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32, table_size: usize) -> Self {
        let table_size = table_size.max(1);
        let mut buckets = Vec::with_capacity(table_size);
        for _ in 0..table_size {
            // Pre-allocate each bucket to avoid allocs during rebuild.
            buckets.push(Vec::with_capacity(8));
        }
        Self {
            cell_size,
            table_size,
            buckets,
        }
    }

    /// Clear all buckets. Call at start of each rebuild.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear(); // Keeps allocation.
        }
    }

    /// Clear, then insert every position with its slice index.
    pub fn build(&mut self, positions: impl IntoIterator<Item = Vec2>) {
        self.clear();
        for (idx, pos) in positions.into_iter().enumerate() {
            self.insert(pos, idx as u32);
        }
    }

    /// Insert an entity index at the given position.
    pub fn insert(&mut self, pos: Vec2, index: u32) {
        let cell = self.cell_of(pos);
        let hash = self.hash_cell(cell.0, cell.1);
        self.buckets[hash].push((cell, index));
    }

    /// Visit every index whose cell lies in the 3x3 block centred on `(cx, cy)`.
    /// Order: block rows top to bottom, cells left to right, insertion order
    /// within a cell.
    pub fn candidates(&self, cx: i32, cy: i32, mut callback: impl FnMut(u32)) {
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let cell = (cx.wrapping_add(dx), cy.wrapping_add(dy));
                let hash = self.hash_cell(cell.0, cell.1);
                for &(entry_cell, index) in &self.buckets[hash] {
                    if entry_cell == cell {
                        callback(index);
                    }
                }
            }
        }
    }

    /// Query all entities in the same cell as `pos` and the 8 surrounding cells.
    pub fn query_neighbors(&self, pos: Vec2, callback: impl FnMut(u32)) {
        let (cx, cy) = self.cell_of(pos);
        self.candidates(cx, cy, callback);
    }

    /// Floor division, so negative coordinates bucket consistently.
    pub fn cell_of(&self, pos: Vec2) -> Cell {
        let cx = (pos.x / self.cell_size).floor() as i32;
        let cy = (pos.y / self.cell_size).floor() as i32;
        (cx, cy)
    }

    fn hash_cell(&self, cx: i32, cy: i32) -> usize {
        // Multiplicative spatial hash — good distribution for grid data.
        let h = (cx as u32).wrapping_mul(73856093) ^ (cy as u32).wrapping_mul(19349663);
        (h as usize) % self.table_size
    }
}
