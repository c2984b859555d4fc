// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-dimensional extent with components clamped to be non-negative.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "(T, T)", into = "(T, T)")]
pub struct GenericSize<T>
where
    T: Copy + PartialOrd + Zero,
{
    width: T,
    height: T,
}

impl<T> GenericSize<T>
where
    T: Copy + PartialOrd + Zero,
{
    pub fn new(width: T, height: T) -> Self {
        Self {
            width: Self::clamp(width),
            height: Self::clamp(height),
        }
    }

    pub fn width(&self) -> T {
        self.width
    }

    pub fn height(&self) -> T {
        self.height
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == T::zero() || self.height == T::zero()
    }

    fn clamp(value: T) -> T {
        if value < T::zero() {
            T::zero()
        } else {
            value
        }
    }
}

impl<T> From<(T, T)> for GenericSize<T>
where
    T: Copy + PartialOrd + Zero,
{
    fn from((width, height): (T, T)) -> Self {
        Self::new(width, height)
    }
}

impl<T> From<GenericSize<T>> for (T, T)
where
    T: Copy + PartialOrd + Zero,
{
    fn from(size: GenericSize<T>) -> Self {
        (size.width, size.height)
    }
}

impl<T> Default for GenericSize<T>
where
    T: Copy + PartialOrd + Zero,
{
    fn default() -> Self {
        Self::new(T::zero(), T::zero())
    }
}

impl<T> fmt::Debug for GenericSize<T>
where
    T: Copy + PartialOrd + Zero + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Size")
            .field("w", &self.width())
            .field("h", &self.height())
            .finish()
    }
}

impl<T> fmt::Display for GenericSize<T>
where
    T: Copy + PartialOrd + Zero + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
