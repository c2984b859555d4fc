// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};
use std::{ffi::c_void, fmt};

use super::context::DataType;

/// Numeric element kind of a typed array.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    #[default]
    F32,
    F64,
}

impl ElementKind {
    pub fn byte_size(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// GPU component type used when uploading pixels of this kind.
    ///
    /// Double precision has no pixel transfer type.
    pub fn texture_data_type(self) -> Option<DataType> {
        match self {
            Self::I8 => Some(DataType::Byte),
            Self::U8 => Some(DataType::UnsignedByte),
            Self::I16 => Some(DataType::Short),
            Self::U16 => Some(DataType::UnsignedShort),
            Self::I32 => Some(DataType::Int),
            Self::U32 => Some(DataType::UnsignedInt),
            Self::F32 => Some(DataType::Float),
            Self::F64 => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        })
    }
}

/// Borrowed typed array handed to buffer and texture uploads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ArrayData<'a> {
    I8(&'a [i8]),
    U8(&'a [u8]),
    I16(&'a [i16]),
    U16(&'a [u16]),
    I32(&'a [i32]),
    U32(&'a [u32]),
    F32(&'a [f32]),
    F64(&'a [f64]),
}

macro_rules! dispatch {
    ($data:expr, $slice:ident => $body:expr) => {
        match $data {
            ArrayData::I8($slice) => $body,
            ArrayData::U8($slice) => $body,
            ArrayData::I16($slice) => $body,
            ArrayData::U16($slice) => $body,
            ArrayData::I32($slice) => $body,
            ArrayData::U32($slice) => $body,
            ArrayData::F32($slice) => $body,
            ArrayData::F64($slice) => $body,
        }
    };
}

impl ArrayData<'_> {
    pub fn element_kind(&self) -> ElementKind {
        match self {
            Self::I8(_) => ElementKind::I8,
            Self::U8(_) => ElementKind::U8,
            Self::I16(_) => ElementKind::I16,
            Self::U16(_) => ElementKind::U16,
            Self::I32(_) => ElementKind::I32,
            Self::U32(_) => ElementKind::U32,
            Self::F32(_) => ElementKind::F32,
            Self::F64(_) => ElementKind::F64,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        dispatch!(self, slice => slice.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn byte_len(&self) -> usize {
        dispatch!(self, slice => std::mem::size_of_val(*slice))
    }

    /// Raw pointer to the first element, for passing to GL entry points.
    pub fn as_ptr(&self) -> *const c_void {
        dispatch!(self, slice => slice.as_ptr() as *const c_void)
    }
}

macro_rules! impl_from_slice {
    ($($elem:ty => $variant:ident),+ $(,)?) => {
        $(
            impl<'a> From<&'a [$elem]> for ArrayData<'a> {
                fn from(slice: &'a [$elem]) -> Self {
                    ArrayData::$variant(slice)
                }
            }

            impl<'a> From<&'a Vec<$elem>> for ArrayData<'a> {
                fn from(vec: &'a Vec<$elem>) -> Self {
                    ArrayData::$variant(vec.as_slice())
                }
            }

            impl<'a, const N: usize> From<&'a [$elem; N]> for ArrayData<'a> {
                fn from(array: &'a [$elem; N]) -> Self {
                    ArrayData::$variant(array.as_slice())
                }
            }
        )+
    };
}

impl_from_slice!(
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    f32 => F32,
    f64 => F64,
);
