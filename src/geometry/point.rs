// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "(T, T)", into = "(T, T)")]
pub struct GenericPoint<T>
where
    T: Copy,
{
    x: T,
    y: T,
}

impl<T> GenericPoint<T>
where
    T: Copy,
{
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> T {
        self.x
    }

    pub fn y(&self) -> T {
        self.y
    }
}

impl<T> From<(T, T)> for GenericPoint<T>
where
    T: Copy,
{
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

impl<T> From<GenericPoint<T>> for (T, T)
where
    T: Copy,
{
    fn from(point: GenericPoint<T>) -> Self {
        (point.x, point.y)
    }
}

impl<T> fmt::Debug for GenericPoint<T>
where
    T: Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Point")
            .field("x", &self.x())
            .field("y", &self.y())
            .finish()
    }
}

impl<T> fmt::Display for GenericPoint<T>
where
    T: Copy + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
