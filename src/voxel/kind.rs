//! Element kinds and the tagged storage behind each named grid

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Kind of value stored in every cell of a named grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Boolean,
    Integer,
    Float,
    Vector3,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Boolean => "bool",
            ElementKind::Integer => "int",
            ElementKind::Float => "float",
            ElementKind::Vector3 => "vector3",
        };
        f.write_str(name)
    }
}

/// Dense buffer of one named grid, z-fastest order
#[derive(Clone, Debug, PartialEq)]
pub enum GridData {
    Boolean(Vec<bool>),
    Integer(Vec<i32>),
    Float(Vec<f32>),
    Vector3(Vec<Vec3>),
}

impl GridData {
    /// Zero-initialized buffer of `len` cells
    pub fn zeroed(kind: ElementKind, len: usize) -> Self {
        match kind {
            ElementKind::Boolean => GridData::Boolean(vec![false; len]),
            ElementKind::Integer => GridData::Integer(vec![0; len]),
            ElementKind::Float => GridData::Float(vec![0.0; len]),
            ElementKind::Vector3 => GridData::Vector3(vec![Vec3::ZERO; len]),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            GridData::Boolean(_) => ElementKind::Boolean,
            GridData::Integer(_) => ElementKind::Integer,
            GridData::Float(_) => ElementKind::Float,
            GridData::Vector3(_) => ElementKind::Vector3,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GridData::Boolean(v) => v.len(),
            GridData::Integer(v) => v.len(),
            GridData::Float(v) => v.len(),
            GridData::Vector3(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait for values that can be stored in a named grid.
///
/// Each implementation is tied to exactly one [`ElementKind`]; typed access to a
/// grid of a different kind yields `None` here and `KindMismatch` at the store.
pub trait VoxelValue: Copy + Default + PartialEq + Send + Sync + 'static {
    const KIND: ElementKind;

    fn slice(data: &GridData) -> Option<&[Self]>;

    fn slice_mut(data: &mut GridData) -> Option<&mut [Self]>;

    fn into_data(values: Vec<Self>) -> GridData;
}

macro_rules! impl_voxel_value {
    ($ty:ty, $variant:ident) => {
        impl VoxelValue for $ty {
            const KIND: ElementKind = ElementKind::$variant;

            fn slice(data: &GridData) -> Option<&[Self]> {
                match data {
                    GridData::$variant(v) => Some(v.as_slice()),
                    _ => None,
                }
            }

            fn slice_mut(data: &mut GridData) -> Option<&mut [Self]> {
                match data {
                    GridData::$variant(v) => Some(v.as_mut_slice()),
                    _ => None,
                }
            }

            fn into_data(values: Vec<Self>) -> GridData {
                GridData::$variant(values)
            }
        }
    };
}

impl_voxel_value!(bool, Boolean);
impl_voxel_value!(i32, Integer);
impl_voxel_value!(f32, Float);
impl_voxel_value!(Vec3, Vector3);
