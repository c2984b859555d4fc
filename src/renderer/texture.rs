// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

use std::rc::Rc;
use thiserror::Error;

use crate::geometry::{Point, Size};

use super::{
    array_data::{ArrayData, ElementKind},
    context::*,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TextureError {
    #[error("Type {0} not allowed for texture")]
    UnsupportedElementKind(ElementKind),
    #[error("Texture data set before the texture was sized")]
    Unsized,
    #[error("Texture data has {found} bytes but the upload needs {expected}")]
    DataTooShort { expected: usize, found: usize },
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Row alignments in order of preference. The GL default (4) comes
/// first so the pixel-store state is only touched when required.
const ALIGNMENTS: [u32; 4] = [4, 8, 2, 1];

/// Unpack alignment assumed by GL when nothing overrides it.
const DEFAULT_ALIGNMENT: u32 = 4;

/// Row alignment for uploads `width` pixels wide: the first of
/// 4, 8, 2 and 1 that divides the width.
///
/// See <https://www.khronos.org/opengl/wiki/Common_Mistakes#Texture_upload_and_pixel_reads>.
pub fn get_alignment(width: u32) -> u32 {
    ALIGNMENTS
        .into_iter()
        .find(|alignment| width % alignment == 0)
        .unwrap_or_else(|| unreachable!("1 divides every width"))
}

/// Bytes read by an upload of `shape` pixels with rows padded to
/// `alignment` bytes. The last row is not padded.
fn required_bytes(
    shape: Size,
    format: PixelFormat,
    data_type: DataType,
    alignment: u32,
) -> usize {
    if shape.is_empty() {
        return 0;
    }
    let row_bytes = (shape.width() as usize)
        .saturating_mul(format.components())
        .saturating_mul(data_type.byte_size());
    let stride = row_bytes.next_multiple_of(alignment as usize);
    (shape.height() as usize - 1)
        .saturating_mul(stride)
        .saturating_add(row_bytes)
}

/// 2D texture that remembers its allocated shape and format.
///
/// The handle is released by [`Texture2D::delete`] or, failing that,
/// when the value is dropped.
pub struct Texture2D<C: GraphicsContext> {
    context: Rc<C>,
    handle: C::Texture,
    shape_format: Option<(Size, PixelFormat)>,
}

impl<C: GraphicsContext> Texture2D<C> {
    pub const TARGET: TextureTarget = TextureTarget::Texture2D;

    pub fn new(context: &Rc<C>) -> Result<Self, TextureError> {
        let handle = context.create_texture()?;
        Ok(Self {
            context: Rc::clone(context),
            handle,
            shape_format: None,
        })
    }

    pub fn handle(&self) -> &C::Texture {
        &self.handle
    }

    pub fn target(&self) -> TextureTarget {
        Self::TARGET
    }

    /// Size and format of the current allocation, if any.
    pub fn shape_format(&self) -> Option<(Size, PixelFormat)> {
        self.shape_format
    }

    pub fn activate(&self) {
        self.context.bind_texture(Self::TARGET, Some(&self.handle));
    }

    pub fn deactivate(&self) {
        self.context.bind_texture(Self::TARGET, None);
    }

    pub fn set_wrapping(&self, wrap_s: WrapMode, wrap_t: WrapMode) {
        self.activate();
        self.context
            .tex_parameter(Self::TARGET, TextureParameter::WrapS(wrap_s));
        self.context
            .tex_parameter(Self::TARGET, TextureParameter::WrapT(wrap_t));
    }

    pub fn set_interpolation(&self, min_filter: FilterMode, mag_filter: FilterMode) {
        self.activate();
        self.context
            .tex_parameter(Self::TARGET, TextureParameter::MinFilter(min_filter));
        self.context
            .tex_parameter(Self::TARGET, TextureParameter::MagFilter(mag_filter));
    }

    /// Allocates storage of `size` pixels in `format` unless the texture
    /// already has exactly that shape and format. Contents are undefined
    /// until [`Texture2D::set_data`] is called.
    pub fn set_size(&mut self, size: impl Into<Size>, format: PixelFormat) {
        let size = size.into();
        if self.shape_format != Some((size, format)) {
            self.shape_format = Some((size, format));
            self.activate();
            self.context.tex_image_2d(Self::TARGET, size, format);
            log::debug!("Reallocated texture {:?} as {size} {format}", self.handle);
        }
    }

    /// Uploads a `shape` sized block of pixels at `offset`, in the
    /// format given to the last [`Texture2D::set_size`]. Fails with
    /// [`TextureError::DataTooShort`] when `data` cannot cover `shape`.
    pub fn set_data<'a>(
        &self,
        offset: impl Into<Point>,
        shape: impl Into<Size>,
        data: impl Into<ArrayData<'a>>,
    ) -> Result<(), TextureError> {
        let (offset, shape, data) = (offset.into(), shape.into(), data.into());

        self.activate();
        let (_, format) = self.shape_format.ok_or(TextureError::Unsized)?;
        let data_type = data
            .element_kind()
            .texture_data_type()
            .ok_or(TextureError::UnsupportedElementKind(data.element_kind()))?;

        let alignment = get_alignment(shape.width());
        let expected = required_bytes(shape, format, data_type, alignment);
        if data.byte_len() < expected {
            return Err(TextureError::DataTooShort {
                expected,
                found: data.byte_len(),
            });
        }

        if alignment != DEFAULT_ALIGNMENT {
            self.context.pixel_store_unpack_alignment(alignment);
        }
        self.context
            .tex_sub_image_2d(Self::TARGET, offset, shape, format, data_type, data);
        if alignment != DEFAULT_ALIGNMENT {
            self.context.pixel_store_unpack_alignment(DEFAULT_ALIGNMENT);
        }
        Ok(())
    }

    /// Releases the GPU texture.
    pub fn delete(self) {
        drop(self);
    }
}

impl<C: GraphicsContext> Drop for Texture2D<C> {
    fn drop(&mut self) {
        log::trace!("Deleting texture {:?}", self.handle);
        self.context.delete_texture(&self.handle);
    }
}
