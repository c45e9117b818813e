//! The cell-update rule executed by the simulation kernel, stated as a
//! pure host-side step function. `shaders/simulation.wgsl` implements the
//! same rule invocation-for-invocation; this module is the normative
//! reference the tests run against.
//!
//! Rule, per tick:
//! - Body cells carry their age since passing under the head: 1 is the
//!   head, `length` the tail. Every body cell ages by one; a cell aging
//!   past the (possibly grown) length becomes empty.
//! - The head's neighbour in the travel direction becomes the new head.
//!   The grid is toroidal, so movement wraps at every edge.
//! - Moving onto a body cell freezes the board (the state is copied
//!   through unchanged), except onto the tail, which vacates in the same
//!   tick.
//! - Moving onto food grows the snake by one (no cell dies that tick) and
//!   respawns food at the first empty cell of a deterministic probe
//!   sequence. With every probe occupied, no food spawns that tick.

use crate::config::{FOOD_CELL, FOOD_SPAWN_PROBES};
use crate::simulation::Direction;

/// Cell buffer and length register as the kernel leaves them after one tick
pub struct Step {
    pub cells: Vec<u32>,
    pub length: u32,
}

/// Advance the grid by one tick.
#[allow(dead_code)]
pub fn step(cells: &[u32], width: u32, height: u32, length: u32, direction: Direction) -> Step {
    let n = cells.len();
    debug_assert_eq!(n, (width * height) as usize);

    // A board with no head is inert
    let Some(head) = cells.iter().position(|&v| v == 1) else {
        return Step {
            cells: cells.to_vec(),
            length,
        };
    };

    let (dx, dy) = direction.delta();
    let hx = head as u32 % width;
    let hy = head as u32 / width;
    let x = (hx as i32 + dx).rem_euclid(width as i32) as u32;
    let y = (hy as i32 + dy).rem_euclid(height as i32) as u32;
    let dst = (y * width + x) as usize;

    let target = cells[dst];
    // Body hit; the vacating tail does not count
    if target != 0 && target != FOOD_CELL && target != length {
        return Step {
            cells: cells.to_vec(),
            length,
        };
    }

    let ate = target == FOOD_CELL;
    let new_length = if ate { length + 1 } else { length };
    let food_at = if ate {
        food_spawn_target(cells, dst, new_length)
    } else {
        None
    };

    let mut out = vec![0u32; n];
    for i in 0..n {
        let v = cells[i];
        out[i] = if i == dst {
            1
        } else if v == FOOD_CELL {
            FOOD_CELL
        } else if v > 0 {
            let aged = v + 1;
            if aged > new_length {
                0
            } else {
                aged
            }
        } else if food_at == Some(i) {
            FOOD_CELL
        } else {
            0
        };
    }

    Step {
        cells: out,
        length: new_length,
    }
}

/// First empty cell along the probe sequence seeded by the grown length
/// and the meal position. Host and kernel must agree bit-for-bit, so the
/// WGSL carries the same arithmetic.
fn food_spawn_target(cells: &[u32], dst: usize, new_length: u32) -> Option<usize> {
    let n = cells.len() as u32;
    for k in 0..FOOD_SPAWN_PROBES {
        let probe = pcg_hash(new_length ^ pcg_hash(dst as u32) ^ k.wrapping_mul(0x9E37_79B9));
        let idx = (probe % n) as usize;
        if cells[idx] == 0 && idx != dst {
            return Some(idx);
        }
    }
    None
}

/// PCG hash, the same permutation the kernel runs
fn pcg_hash(input: u32) -> u32 {
    let state = input.wrapping_mul(747796405).wrapping_add(2891336453);
    let word = ((state >> ((state >> 28).wrapping_add(4))) ^ state).wrapping_mul(277803737);
    (word >> 22) ^ word
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Indices of body cells (rank 1..=length), sorted by rank
    fn body_by_rank(cells: &[u32], length: u32) -> Vec<usize> {
        let mut body: Vec<(u32, usize)> = cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v >= 1 && v <= length)
            .map(|(i, &v)| (v, i))
            .collect();
        body.sort();
        body.iter().map(|&(_, i)| i).collect()
    }

    fn food_cells(cells: &[u32]) -> Vec<usize> {
        cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == FOOD_CELL)
            .map(|(i, _)| i)
            .collect()
    }

    fn seeded(width: u32, height: u32, length: u32) -> Vec<u32> {
        let mut cells = vec![0u32; (width * height) as usize];
        for k in 0..length {
            cells[k as usize] = length - k;
        }
        cells
    }

    #[test]
    fn test_straight_move_shifts_body_one_cell_right() {
        // Reference scenario: 32x32 grid, cells [0]=4 [1]=3 [2]=2 [3]=1,
        // direction right. One tick shifts the occupied run by one in +x,
        // preserving order and count.
        let cells = seeded(32, 32, 4);
        let out = step(&cells, 32, 32, 4, Direction::Right);
        assert_eq!(out.length, 4);
        assert_eq!(&out.cells[0..6], &[0, 4, 3, 2, 1, 0]);
        assert_eq!(out.cells.iter().filter(|&&v| v != 0).count(), 4);
    }

    #[test]
    fn test_write_completeness_and_no_overlap() {
        // Every rank 1..=length appears exactly once after a normal tick
        let cells = seeded(32, 32, 4);
        let out = step(&cells, 32, 32, 4, Direction::Right);
        for rank in 1..=4u32 {
            assert_eq!(
                out.cells.iter().filter(|&&v| v == rank).count(),
                1,
                "rank {} must occupy exactly one cell",
                rank
            );
        }
    }

    #[test]
    fn test_turn_up_moves_head_one_row() {
        let cells = seeded(32, 32, 4);
        let out = step(&cells, 32, 32, 4, Direction::Up);
        // head was at index 3; up is +y, one full row ahead
        assert_eq!(out.cells[3 + 32], 1);
        assert_eq!(out.cells[3], 2);
        assert_eq!(out.cells.iter().filter(|&&v| v != 0).count(), 4);
    }

    #[test]
    fn test_movement_wraps_at_the_edge() {
        // Head on the last column of row 0, moving right, reappears at
        // column 0 of the same row
        let mut cells = vec![0u32; 8];
        cells[4] = 4;
        cells[5] = 3;
        cells[6] = 2;
        cells[7] = 1;
        let out = step(&cells, 8, 1, 4, Direction::Right);
        assert_eq!(out.cells[0], 1);
        assert_eq!(out.cells[7], 2);
        assert_eq!(out.cells[4], 0);
    }

    #[test]
    fn test_growth_keeps_tail_and_respawns_food() {
        let mut cells = seeded(32, 32, 4);
        cells[4] = FOOD_CELL; // directly ahead of the head
        let out = step(&cells, 32, 32, 4, Direction::Right);
        assert_eq!(out.length, 5);
        // no cell died: all five ranks present, old tail still at index 0
        assert_eq!(body_by_rank(&out.cells, 5).len(), 5);
        assert_eq!(out.cells[0], 5);
        assert_eq!(out.cells[4], 1);
        // replacement food on some other, previously empty cell
        let food = food_cells(&out.cells);
        assert_eq!(food.len(), 1);
        assert_ne!(food[0], 4);
        assert_eq!(cells[food[0]], 0);
    }

    #[test]
    fn test_food_respawn_is_deterministic() {
        let mut cells = seeded(32, 32, 4);
        cells[4] = FOOD_CELL;
        let a = step(&cells, 32, 32, 4, Direction::Right);
        let b = step(&cells, 32, 32, 4, Direction::Right);
        assert_eq!(a.cells, b.cells);
        assert_eq!(a.length, b.length);
    }

    #[test]
    fn test_uneaten_food_persists() {
        let mut cells = seeded(32, 32, 4);
        cells[100] = FOOD_CELL;
        let out = step(&cells, 32, 32, 4, Direction::Right);
        assert_eq!(out.cells[100], FOOD_CELL);
        assert_eq!(out.length, 4);
    }

    #[test]
    fn test_body_collision_freezes_the_board() {
        // 4x4 grid, head at (0,0) facing its own neck at (1,0)
        let mut cells = vec![0u32; 16];
        cells[0] = 1; // head
        cells[1] = 2;
        cells[5] = 3;
        cells[4] = 4;
        let out = step(&cells, 4, 4, 4, Direction::Right);
        assert_eq!(out.cells, cells);
        assert_eq!(out.length, 4);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_legal() {
        // Snake cycling a 2x2 block: the head may enter the tail cell
        // because the tail leaves it in the same tick
        let mut cells = vec![0u32; 16];
        cells[0] = 1; // head (0,0)
        cells[4] = 2; // (0,1)
        cells[5] = 3; // (1,1)
        cells[1] = 4; // tail (1,0)
        let out = step(&cells, 4, 4, 4, Direction::Right);
        assert_eq!(out.cells[1], 1);
        assert_eq!(out.cells[0], 2);
        assert_eq!(out.cells[4], 3);
        assert_eq!(out.cells[5], 4);
        assert_eq!(out.length, 4);
    }

    #[test]
    fn test_headless_board_is_inert() {
        let cells = vec![0u32; 16];
        let out = step(&cells, 4, 4, 0, Direction::Right);
        assert_eq!(out.cells, cells);
        assert_eq!(out.length, 0);
    }
}
