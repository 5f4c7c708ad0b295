use crate::core::Position;

/// A bounding box with one corner fixed at 0,0 and a non-negative extent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsOriginRoot {
    pub extent: Position,
}

impl BoundsOriginRoot {
    pub fn new(width: i32, height: i32) -> BoundsOriginRoot {
        BoundsOriginRoot {
            extent: Position { x: width.max(0), y: height.max(0) },
        }
    }

    pub fn width(&self) -> i32 {
        self.extent.x
    }

    pub fn height(&self) -> i32 {
        self.extent.y
    }

    pub fn contains(&self, pos: &Position) -> bool {
        pos.x >= 0 && pos.x < self.extent.x && pos.y >= 0 && pos.y < self.extent.y
    }

    pub fn area(&self) -> i32 {
        self.extent.x * self.extent.y
    }

    /// Every position inside the bounds, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let Position { x: width, y: height } = self.extent;
        (0..height).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }
}
