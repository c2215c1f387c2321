use serde::Serialize;

/// Classification of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TileType {
    #[default]
    Empty,
    Floor,
    Wall,
}

impl TileType {
    pub fn is_floor(&self) -> bool {
        matches!(self, TileType::Floor)
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, TileType::Wall)
    }

    /// Character used by the ASCII dump
    pub fn glyph(&self) -> char {
        match self {
            TileType::Empty => ' ',
            TileType::Floor => '.',
            TileType::Wall => '#',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert_eq!(TileType::default(), TileType::Empty);
    }

    #[test]
    fn test_floor_and_wall_predicates() {
        assert!(TileType::Floor.is_floor());
        assert!(!TileType::Wall.is_floor());
        assert!(TileType::Wall.is_wall());
        assert!(!TileType::Empty.is_wall());
    }
}
