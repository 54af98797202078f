//! Typed handles to named grids

use std::fmt;
use std::marker::PhantomData;

use super::kind::VoxelValue;

/// Name of a grid together with the element type it was created with.
///
/// Generators return handles and accept them as inputs, so a dependency such as
/// "the classification labels" is passed explicitly instead of being looked up
/// by a conventional name. A handle does not keep the grid alive: removing or
/// replacing the grid makes later lookups fail with `GridNotFound` or
/// `KindMismatch`.
pub struct GridRef<T: VoxelValue> {
    name: String,
    _kind: PhantomData<fn() -> T>,
}

impl<T: VoxelValue> GridRef<T> {
    /// Handle for `name` without checking the store; see `VoxelGrid::grid_ref`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), _kind: PhantomData }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: VoxelValue> Clone for GridRef<T> {
    fn clone(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl<T: VoxelValue> PartialEq for GridRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T: VoxelValue> Eq for GridRef<T> {}

impl<T: VoxelValue> fmt::Debug for GridRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridRef")
            .field("name", &self.name)
            .field("kind", &T::KIND)
            .finish()
    }
}

impl<T: VoxelValue> AsRef<str> for GridRef<T> {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
