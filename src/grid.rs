use crate::tile::TileType;

/// Which of a cell's four orthogonal neighbours are floor.
///
/// "Left"/"right" run along -x/+x, "down"/"up" along -y/+y in grid space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloorNeighbors {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl FloorNeighbors {
    pub fn count(&self) -> usize {
        [self.left, self.right, self.up, self.down]
            .iter()
            .filter(|&&floor| floor)
            .count()
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Dense tile classification for one generation pass
pub struct Grid {
    pub width: usize,
    pub height: usize,
    tiles: Vec<TileType>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileType::Empty; width * height],
        }
    }

    /// Drop all classification and resize. Used between generation passes.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.tiles.clear();
        self.tiles.resize(width * height, TileType::Empty);
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TileType> {
        self.index(x, y).map(|idx| self.tiles[idx])
    }

    /// Set a tile. Out-of-bounds writes are ignored and return false.
    pub fn set(&mut self, x: i32, y: i32, tile_type: TileType) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.tiles[idx] = tile_type;
                true
            }
            None => false,
        }
    }

    pub fn is_floor(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|t| t.is_floor())
    }

    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(TileType::Empty)
    }

    pub fn floor_neighbors(&self, x: i32, y: i32) -> FloorNeighbors {
        FloorNeighbors {
            left: self.is_floor(x - 1, y),
            right: self.is_floor(x + 1, y),
            up: self.is_floor(x, y + 1),
            down: self.is_floor(x, y - 1),
        }
    }

    /// Coordinates of every tile of the given type, column by column
    /// (x outer, y inner). Spawn lists and geometry follow this order.
    pub fn positions_of(&self, tile_type: TileType) -> Vec<(i32, i32)> {
        let mut positions = Vec::new();
        for x in 0..self.width as i32 {
            for y in 0..self.height as i32 {
                if self.tiles[y as usize * self.width + x as usize] == tile_type {
                    positions.push((x, y));
                }
            }
        }
        positions
    }

    pub fn count(&self, tile_type: TileType) -> usize {
        self.tiles.iter().filter(|&&t| t == tile_type).count()
    }

    /// Render rows top-down (highest y first) so "up" reads as up.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                out.push(self.tiles[y * self.width + x].glyph());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(8, 5);
        assert_eq!(grid.count(TileType::Empty), 40);
        assert_eq!(grid.get(7, 4), Some(TileType::Empty));
        assert_eq!(grid.get(8, 0), None);
        assert_eq!(grid.get(0, -1), None);
    }

    #[test]
    fn test_out_of_bounds_set_is_ignored() {
        let mut grid = Grid::new(4, 4);
        assert!(!grid.set(4, 0, TileType::Floor));
        assert!(!grid.set(-1, 2, TileType::Floor));
        assert_eq!(grid.count(TileType::Floor), 0);
    }

    #[test]
    fn test_floor_neighbors() {
        let mut grid = Grid::new(5, 5);
        grid.set(1, 2, TileType::Floor);
        grid.set(2, 3, TileType::Floor);
        let n = grid.floor_neighbors(2, 2);
        assert!(n.left && n.up);
        assert!(!n.right && !n.down);
        assert_eq!(n.count(), 2);
    }

    #[test]
    fn test_positions_are_column_major() {
        let mut grid = Grid::new(3, 3);
        grid.set(2, 0, TileType::Floor);
        grid.set(0, 2, TileType::Floor);
        grid.set(0, 1, TileType::Floor);
        assert_eq!(grid.positions_of(TileType::Floor), vec![(0, 1), (0, 2), (2, 0)]);
    }

    #[test]
    fn test_reset_clears_and_resizes() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, TileType::Wall);
        grid.reset(4, 2);
        assert_eq!(grid.width, 4);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.count(TileType::Empty), 8);
    }

    #[test]
    fn test_ascii_puts_high_y_first() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 1, TileType::Wall);
        grid.set(1, 0, TileType::Floor);
        assert_eq!(grid.to_ascii(), "# \n .\n");
    }
}
