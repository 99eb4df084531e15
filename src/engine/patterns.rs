//! Named pattern catalog and the plaintext pattern decoder
//!
//! Patterns are written one row per line. `.` is a dead cell, a newline
//! starts the next row, and any other character is a live cell. Rows may
//! have different lengths; missing trailing cells are simply not written.

use super::Cell;
use crate::error::{Error, Result};
use std::str::Chars;

/// Symbol for a dead cell
pub const EMPTY: char = '.';
/// Symbol that ends a row
pub const ROW_BREAK: char = '\n';

/// Rough family a pattern belongs to (shown by `automata patterns`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    StillLife,
    Oscillator,
    Spaceship,
    Gun,
    Methuselah,
    Growth,
}

impl Family {
    pub fn label(&self) -> &'static str {
        match self {
            Family::StillLife => "still life",
            Family::Oscillator => "oscillator",
            Family::Spaceship => "spaceship",
            Family::Gun => "gun",
            Family::Methuselah => "methuselah",
            Family::Growth => "infinite growth",
        }
    }
}

pub struct Pattern {
    pub name: &'static str,
    pub family: Family,
    pub text: &'static str,
}

impl Pattern {
    /// Decoded `(column, row, state)` triples
    pub fn cells(&self) -> Decode<'static> {
        decode(self.text)
    }

    /// Bounding box as (columns, rows)
    pub fn size(&self) -> (usize, usize) {
        self.cells().fold((0, 0), |(w, h), (col, row, _)| {
            (w.max(col as usize + 1), h.max(row as usize + 1))
        })
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        family: Family::StillLife,
        text: concat!("OO\n", "OO"),
    },
    Pattern {
        name: "blinker",
        family: Family::Oscillator,
        text: "OOO",
    },
    Pattern {
        name: "beacon",
        family: Family::Oscillator,
        text: concat!("OO..\n", "OO..\n", "..OO\n", "..OO"),
    },
    Pattern {
        name: "glider",
        family: Family::Spaceship,
        text: concat!(".O.\n", "..O\n", "OOO"),
    },
    Pattern {
        name: "lwss",
        family: Family::Spaceship,
        text: concat!(".O..O\n", "O....\n", "O...O\n", "OOOO."),
    },
    Pattern {
        name: "schick-engine",
        family: Family::Spaceship,
        text: concat!(
            ".O..O...............\n",
            "O...................\n",
            "O...O...............\n",
            "OOOO.........OO.....\n",
            "......OOO.....OO....\n",
            "......OO.OO......OOO\n",
            "......OOO.....OO....\n",
            "OOOO.........OO.....\n",
            "O...O...............\n",
            "O...................\n",
            ".O..O...............",
        ),
    },
    Pattern {
        name: "gosper-gun",
        family: Family::Gun,
        text: concat!(
            "........................O...........\n",
            "......................O.O...........\n",
            "............OO......OO............OO\n",
            "...........O...O....OO............OO\n",
            "OO........O.....O...OO..............\n",
            "OO........O...O.OO....O.O...........\n",
            "..........O.....O.......O...........\n",
            "...........O...O....................\n",
            "............OO......................",
        ),
    },
    Pattern {
        name: "gosper-gun-mirrored",
        family: Family::Gun,
        text: concat!(
            "...........O........................\n",
            "...........O.O......................\n",
            "OO............OO......OO............\n",
            "OO............OO....O...O...........\n",
            "..............OO...O.....O........OO\n",
            "...........O.O....OO.O...O........OO\n",
            "...........O.......O.....O..........\n",
            "....................O...O...........\n",
            "......................OO............",
        ),
    },
    Pattern {
        name: "r-pentomino",
        family: Family::Methuselah,
        text: concat!(".OO\n", "OO.\n", ".O."),
    },
    Pattern {
        name: "acorn",
        family: Family::Methuselah,
        text: concat!(".O.....\n", "...O...\n", "OO..OOO"),
    },
    Pattern {
        name: "infinite-growth",
        family: Family::Growth,
        text: concat!("OOO.O\n", "O....\n", "...OO\n", ".OO.O\n", "O.O.O"),
    },
];

/// Look up a catalog pattern by name, ignoring ASCII case
pub fn find(name: &str) -> Result<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::NotFound(format!("pattern '{}'", name)))
}

pub fn names() -> impl Iterator<Item = &'static str> {
    PATTERNS.iter().map(|p| p.name)
}

/// Decode plaintext into `(column, row, state)` triples. Never fails.
pub fn decode(text: &str) -> Decode<'_> {
    Decode {
        chars: text.chars(),
        col: 0,
        row: 0,
    }
}

/// Iterator returned by [`decode`]
pub struct Decode<'a> {
    chars: Chars<'a>,
    col: i32,
    row: i32,
}

impl Iterator for Decode<'_> {
    type Item = (i32, i32, Cell);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ch = self.chars.next()?;
            if ch == ROW_BREAK {
                self.col = 0;
                self.row += 1;
                continue;
            }
            let state = if ch == EMPTY { Cell::Dead } else { Cell::Alive };
            let item = (self.col, self.row, state);
            self.col += 1;
            return Some(item);
        }
    }
}
