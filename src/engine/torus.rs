//! Flat index arithmetic on a wrapped (toroidal) grid

/// Index helper for a `width` x `height` grid stored row-major
///
/// Neighbor offsets wrap over the flat index space rather than per axis: the
/// west neighbor of a cell in column 0 is the last cell of the previous row,
/// and the west neighbor of (0,0) is (width-1, height-1).
///
/// Grids narrower or shorter than 3 cells make several neighbor offsets land
/// on the same cell, so those cells are counted more than once. Callers that
/// care must pick dimensions of at least 3x3.
#[derive(Debug, Clone)]
pub struct Torus {
    width: usize,
    height: usize,
    len: usize,
    offsets: [isize; 8],
}

impl Torus {
    /// Both dimensions must already be validated as positive and
    /// `width * height` must fit in `isize`.
    pub fn new(width: usize, height: usize) -> Self {
        let w = width as isize;
        // Moore neighborhood, clockwise from the top-left
        let offsets = [-1 - w, -w, 1 - w, 1, 1 + w, w, w - 1, -1];
        Self {
            width,
            height,
            len: width * height,
            offsets,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub fn area(&self) -> usize {
        self.len
    }

    /// Apply a signed offset to a flat index, wrapping across the whole plane
    #[inline]
    pub fn wrap(&self, index: usize, offset: isize) -> usize {
        (index as isize + offset).rem_euclid(self.len as isize) as usize
    }

    /// The eight wrapped neighbor indices of `index`
    #[inline]
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.offsets.iter().map(move |&offset| self.wrap(index, offset))
    }

    /// Flat index for any integer coordinate pair
    #[inline]
    pub fn index_of(&self, x: i64, y: i64) -> usize {
        let col = x.rem_euclid(self.width as i64) as usize;
        let row = y.rem_euclid(self.height as i64) as usize;
        row * self.width + col
    }

    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }
}
