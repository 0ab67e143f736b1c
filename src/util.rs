/// Which child slot of a node an item belongs under.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    /// Items strictly less than the node's item.
    Left,
    /// Items greater than or equal to the node's item.
    Right,
}

impl Side {
    /// Picks the side of `data` that `item` descends into. Ties go right.
    pub(crate) fn of<T: Ord>(item: &T, data: &T) -> Self {
        if item < data {
            Self::Left
        } else {
            Self::Right
        }
    }
}
