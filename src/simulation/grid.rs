use rand::Rng;

use crate::config::FOOD_CELL;
use crate::error::InitError;

/// Host-side cell grid, built once to seed the first GPU buffer.
///
/// Cell encoding: 0 = empty, 1..=length = snake body aged head-to-tail
/// (1 is the head, `length` the tail), `FOOD_CELL` = food marker. After
/// seeding, the buffers are owned by the simulation kernel and the host
/// never writes cell state again.
pub struct Grid {
    pub width: u32,
    pub height: u32,
    pub length: u32,
    pub cells: Vec<u32>,
}

impl Grid {
    /// Lay a snake of `length` cells along row 0 with the tail at cell 0,
    /// facing right. Cell `k` holds rank `length - k`, so the head (rank 1)
    /// sits at the highest seeded index.
    pub fn new(width: u32, height: u32, length: u32) -> Result<Self, InitError> {
        let cell_count = width as usize * height as usize;
        if cell_count == 0 {
            return Err(InitError::Configuration(format!(
                "grid must have at least one cell, got {}x{}",
                width, height
            )));
        }
        if length == 0 {
            return Err(InitError::Configuration(
                "initial snake length must be at least 1".into(),
            ));
        }
        if length > width {
            return Err(InitError::Configuration(format!(
                "initial snake of length {} does not fit in a row of {} cells",
                length, width
            )));
        }

        let mut cells = vec![0u32; cell_count];
        for k in 0..length {
            cells[k as usize] = length - k;
        }

        Ok(Self {
            width,
            height,
            length,
            cells,
        })
    }

    /// Drop one food marker on a random empty cell. A grid with no free
    /// cell gets no food.
    pub fn place_food<R: Rng>(&mut self, rng: &mut R) {
        let empty: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| i)
            .collect();
        if empty.is_empty() {
            return;
        }
        let idx = empty[rng.gen_range(0..empty.len())];
        self.cells[idx] = FOOD_CELL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_layout() {
        let grid = Grid::new(32, 32, 4).unwrap();
        assert_eq!(grid.cells.len(), 1024);
        assert_eq!(&grid.cells[0..4], &[4, 3, 2, 1]);
        assert!(grid.cells[4..].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_zero_sized_grid_rejected() {
        assert!(matches!(
            Grid::new(0, 32, 4),
            Err(InitError::Configuration(_))
        ));
        assert!(matches!(
            Grid::new(32, 0, 4),
            Err(InitError::Configuration(_))
        ));
    }

    #[test]
    fn test_oversized_seed_rejected() {
        assert!(matches!(
            Grid::new(8, 8, 9),
            Err(InitError::Configuration(_))
        ));
        assert!(matches!(
            Grid::new(8, 8, 0),
            Err(InitError::Configuration(_))
        ));
    }

    #[test]
    fn test_food_lands_on_empty_cell() {
        let mut grid = Grid::new(8, 8, 4).unwrap();
        grid.place_food(&mut rand::thread_rng());
        let food: Vec<usize> = grid
            .cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == FOOD_CELL)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(food.len(), 1);
        // never on the snake
        assert!(food[0] >= 4);
    }

    #[test]
    fn test_full_grid_gets_no_food() {
        let mut grid = Grid::new(4, 1, 4).unwrap();
        grid.place_food(&mut rand::thread_rng());
        assert!(grid.cells.iter().all(|&v| v != FOOD_CELL));
    }
}
