//! Conway's Game of Life on a wrapped grid, rendered into a caller-owned
//! ARGB pixel buffer with a fading trail behind dead cells.

pub mod patterns;
pub mod torus;

use crate::error::{Error, Result};
use patterns::Pattern;
use rand::prelude::*;
use std::time::{SystemTime, UNIX_EPOCH};
use torus::Torus;
use tracing::debug;

/// Color written for a cell that is alive after the step
pub const ALIVE_COLOR: u32 = 0xfff0_1020;
/// Color written for a cell that just died
pub const DEAD_COLOR: u32 = 0xffcc_8000;

/// RNG draws discarded after seeding
const WARMUP_DRAWS: usize = 10_000;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Conway's B3/S23 transition
    #[inline]
    pub fn next(self, neighbors: u8) -> Cell {
        match (self, neighbors) {
            (Cell::Alive, 2) | (Cell::Alive, 3) | (Cell::Dead, 3) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// Halve the alpha channel, keep RGB
#[inline]
pub fn fade(pixel: u32) -> u32 {
    ((pixel >> 1) & 0xff00_0000) | (pixel & 0x00ff_ffff)
}

/// Pixel value for one cell given its state before and after a step
#[inline]
fn shade(before: Cell, after: Cell, pixel: u32) -> u32 {
    match (before, after) {
        (_, Cell::Alive) => ALIVE_COLOR,
        (Cell::Alive, Cell::Dead) => DEAD_COLOR,
        (Cell::Dead, Cell::Dead) => fade(pixel),
    }
}

/// The automaton: two generation planes and a private RNG
///
/// `planes[front]` is the latest completed generation; the other plane is
/// scratch and gets fully overwritten by [`Life::step`].
pub struct Life {
    torus: Torus,
    planes: [Vec<Cell>; 2],
    front: usize,
    generation: u64,
    rng: StdRng,
}

impl Life {
    /// Create an all-dead grid seeded from the system clock
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_seed(width, height, clock_seed())
    }

    /// Create an all-dead grid with a fixed RNG seed
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let len = width
            .checked_mul(height)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or_else(|| {
                Error::InvalidArgument(format!("grid of {}x{} cells is too large", width, height))
            })?;

        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..WARMUP_DRAWS {
            rng.next_u32();
        }

        debug!(width, height, seed, "life engine created");

        Ok(Self {
            torus: Torus::new(width, height),
            planes: [vec![Cell::Dead; len], vec![Cell::Dead; len]],
            front: 0,
            generation: 0,
            rng,
        })
    }

    pub fn width(&self) -> usize {
        self.torus.width()
    }

    pub fn height(&self) -> usize {
        self.torus.height()
    }

    /// Generations stepped since the last `populate` or `clear`
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current generation, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.planes[self.front]
    }

    pub fn population(&self) -> usize {
        self.cells().iter().filter(|c| c.is_alive()).count()
    }

    /// Column and row of a flat index into [`Life::cells`]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        self.torus.coords(index)
    }

    /// State at a wrapped coordinate
    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.cells()[self.torus.index_of(x.into(), y.into())]
    }

    /// Randomize every cell with even odds
    pub fn populate(&mut self) {
        let front = self.front;
        for cell in self.planes[front].iter_mut() {
            *cell = Cell::from(self.rng.gen_bool(0.5));
        }
        self.generation = 0;
        debug!(population = self.population(), "populated");
    }

    /// Kill every cell in both planes
    pub fn clear(&mut self) {
        for plane in self.planes.iter_mut() {
            plane.fill(Cell::Dead);
        }
        self.generation = 0;
        debug!("cleared");
    }

    /// Write one cell; coordinates wrap in both axes
    pub fn set(&mut self, x: i32, y: i32, state: Cell) {
        self.put(x.into(), y.into(), state);
    }

    // Offsets are added in i64 so coordinates near the i32 limits still wrap
    // modulo the grid size
    fn put(&mut self, x: i64, y: i64, state: Cell) {
        let index = self.torus.index_of(x, y);
        self.planes[self.front][index] = state;
    }

    /// Stamp a catalog pattern with its top-left corner at (x, y)
    pub fn stamp(&mut self, x: i32, y: i32, name: &str) -> Result<()> {
        let pattern = patterns::find(name)?;
        self.stamp_pattern(x, y, pattern);
        Ok(())
    }

    /// Stamp an already resolved pattern; wraps across the edges
    pub fn stamp_pattern(&mut self, x: i32, y: i32, pattern: &Pattern) {
        let (x, y) = (i64::from(x), i64::from(y));
        for (col, row, state) in pattern.cells() {
            self.put(x + i64::from(col), y + i64::from(row), state);
        }
        debug!(pattern = pattern.name, x, y, "stamped");
    }

    /// Randomize the 3x3 block centered on (x, y)
    pub fn perturb(&mut self, x: i32, y: i32) {
        let (x, y) = (i64::from(x), i64::from(y));
        for dy in -1..=1 {
            for dx in -1..=1 {
                let state = Cell::from(self.rng.gen_bool(0.5));
                self.put(x + dx, y + dy, state);
            }
        }
    }

    /// Advance one generation and paint it into `pixels`
    ///
    /// `pixels` must hold exactly `width * height` ARGB values. On error
    /// neither the grid nor the buffer is touched.
    pub fn step(&mut self, pixels: &mut [u32]) -> Result<()> {
        if pixels.len() != self.torus.area() {
            return Err(Error::InvalidArgument(format!(
                "pixel buffer holds {} values, grid needs {}",
                pixels.len(),
                self.torus.area()
            )));
        }

        let torus = &self.torus;
        let (current, next) = split_planes(&mut self.planes, self.front);
        for (i, (slot, pixel)) in next.iter_mut().zip(pixels.iter_mut()).enumerate() {
            let alive = torus.neighbors(i).map(|j| current[j] as u8).sum::<u8>();
            let before = current[i];
            let after = before.next(alive);
            *slot = after;
            *pixel = shade(before, after, *pixel);
        }

        self.front ^= 1;
        self.generation += 1;
        Ok(())
    }
}

/// Borrow the front plane for reading and the back plane for writing
fn split_planes(planes: &mut [Vec<Cell>; 2], front: usize) -> (&[Cell], &mut [Cell]) {
    let [a, b] = planes;
    if front == 0 {
        (a.as_slice(), b.as_mut_slice())
    } else {
        (b.as_slice(), a.as_mut_slice())
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()).rotate_left(32))
        .unwrap_or(0) // Fallback seed for misconfigured system clocks
}
