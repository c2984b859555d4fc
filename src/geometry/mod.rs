// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

#[cfg(test)]
mod tests {
    mod point;
    mod size;
}
mod point;
mod size;

pub use point::GenericPoint;
pub use size::GenericSize;

/// Pixel offset inside a texture.
pub type Point = GenericPoint<i32>;

/// Texture or upload extent in pixels.
pub type Size = GenericSize<u32>;
