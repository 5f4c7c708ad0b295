use crate::core::bounds::BoundsOriginRoot;
use crate::core::Position;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedGrid<T> {
    bounds: BoundsOriginRoot,
    cells: Vec<T>,
}

impl<T> BoundedGrid<T> {
    pub fn new(bounds: BoundsOriginRoot, default: T) -> Self
    where
        T: Clone,
    {
        let cells = vec![default; bounds.area() as usize];
        BoundedGrid {
            bounds,
            cells,
        }
    }

    pub fn size(&self) -> BoundsOriginRoot {
        self.bounds
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.bounds.contains(pos)
    }

    pub fn get(&self, pos: &Position) -> Option<&T> {
        if !self.bounds.contains(pos) {
            return None;
        }
        Some(&self[pos])
    }

    /// Swaps the contents of two cells. Both must be in bounds.
    pub fn swap(&mut self, a: &Position, b: &Position) {
        let ia = self.offset(a);
        let ib = self.offset(b);
        self.cells.swap(ia, ib);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.bounds.positions().zip(self.cells.iter())
    }

    fn offset(&self, pos: &Position) -> usize {
        (pos.y * self.bounds.extent.x + pos.x) as usize
    }
}

impl<T> std::ops::Index<&Position> for BoundedGrid<T> {
    type Output = T;

    fn index(&self, index: &Position) -> &Self::Output {
        &self.cells[self.offset(index)]
    }
}

impl<T> std::ops::IndexMut<&Position> for BoundedGrid<T> {
    fn index_mut(&mut self, index: &Position) -> &mut Self::Output {
        let offset = self.offset(index);
        &mut self.cells[offset]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn get_outside_bounds_is_none() {
        let grid = BoundedGrid::new(BoundsOriginRoot::new(3, 2), 0u8);

        assert_eq!(grid.get(&Position::new(2, 1)), Some(&0));
        assert_eq!(grid.get(&Position::new(3, 0)), None);
        assert_eq!(grid.get(&Position::new(0, 2)), None);
        assert_eq!(grid.get(&Position::new(-1, 0)), None);
    }

    #[test]
    fn swap_exchanges_cells() {
        let mut grid = BoundedGrid::new(BoundsOriginRoot::new(3, 2), 'x');
        grid[&Position::new(0, 0)] = 'a';
        grid[&Position::new(2, 1)] = 'b';

        grid.swap(&Position::new(0, 0), &Position::new(2, 1));

        assert_eq!(grid[&Position::new(0, 0)], 'b');
        assert_eq!(grid[&Position::new(2, 1)], 'a');
    }

    #[test]
    fn iter_walks_rows_in_order() {
        let mut grid = BoundedGrid::new(BoundsOriginRoot::new(2, 2), 0);
        grid[&Position::new(1, 0)] = 1;
        grid[&Position::new(0, 1)] = 2;

        let cells: Vec<(Position, i32)> = grid.iter().map(|(p, &v)| (p, v)).collect();
        assert_eq!(
            cells,
            vec![
                (Position::new(0, 0), 0),
                (Position::new(1, 0), 1),
                (Position::new(0, 1), 2),
                (Position::new(1, 1), 0),
            ]
        );
    }
}
