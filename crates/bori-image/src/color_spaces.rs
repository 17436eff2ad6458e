use crate::{
    error::ImageError,
    image::{Image, ImageSize},
};
use std::ops::{Deref, DerefMut};

/// Macro to define a color space wrapper type with explicit bit depth
macro_rules! define_color_space {
    ($name:ident, $type:ty, $channels:expr, $doc:expr) => {
        #[doc = $doc]
        ///
        /// This is a zero-cost wrapper that provides compile-time type safety.
        #[repr(transparent)]
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name(pub Image<$type, $channels>);

        impl $name {
            #[doc = concat!("Create ", stringify!($name), " image from size and data")]
            pub fn from_size_vec(size: ImageSize, data: Vec<$type>) -> Result<Self, ImageError> {
                Ok(Self(Image::new(size, data)?))
            }

            #[doc = concat!("Create ", stringify!($name), " image from size with default value")]
            pub fn from_size_val(size: ImageSize, val: $type) -> Result<Self, ImageError> {
                Ok(Self(Image::from_size_val(size, val)?))
            }

            /// Unwrap into the underlying Image
            pub fn into_inner(self) -> Image<$type, $channels> {
                self.0
            }

            /// Get a reference to the underlying Image
            pub fn as_image(&self) -> &Image<$type, $channels> {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = Image<$type, $channels>;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl AsRef<Image<$type, $channels>> for $name {
            fn as_ref(&self) -> &Image<$type, $channels> {
                &self.0
            }
        }

        impl From<Image<$type, $channels>> for $name {
            fn from(image: Image<$type, $channels>) -> Self {
                Self(image)
            }
        }
    };
}

define_color_space!(
    Rgba8,
    u8,
    4,
    "RGBA color space with 8-bit unsigned integer channels, stored as `[r, g, b, a]`"
);

/// Fully opaque alpha value.
pub const OPAQUE: u8 = 255;

/// Pack an `[r, g, b, a]` pixel into a `0xAARRGGBB` word.
#[inline]
pub fn pack_argb(px: [u8; 4]) -> u32 {
    (u32::from(px[3]) << 24) | (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2])
}

/// Unpack a `0xAARRGGBB` word into an `[r, g, b, a]` pixel.
#[inline]
pub fn unpack_argb(word: u32) -> [u8; 4] {
    [
        ((word >> 16) & 0xFF) as u8,
        ((word >> 8) & 0xFF) as u8,
        (word & 0xFF) as u8,
        ((word >> 24) & 0xFF) as u8,
    ]
}

impl Rgba8 {
    /// Build an image from packed `0xAARRGGBB` pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// use bori_image::color_spaces::Rgba8;
    ///
    /// let image = Rgba8::from_packed_argb([2, 1].into(), &[0xFF102030, 0x80FFFFFF]).unwrap();
    /// assert_eq!(image.as_slice(), &[0x10, 0x20, 0x30, 0xFF, 0xFF, 0xFF, 0xFF, 0x80]);
    /// ```
    pub fn from_packed_argb(size: ImageSize, pixels: &[u32]) -> Result<Self, ImageError> {
        let area = Image::<u8, 1>::data_len(size)?;
        if pixels.len() != area {
            return Err(ImageError::InvalidChannelShape(pixels.len(), area));
        }
        let data = pixels.iter().flat_map(|&w| unpack_argb(w)).collect();
        Self::from_size_vec(size, data)
    }

    /// Export the pixels as packed `0xAARRGGBB` words.
    pub fn to_packed_argb(&self) -> Vec<u32> {
        self.as_slice()
            .chunks_exact(4)
            .map(|px| pack_argb([px[0], px[1], px[2], px[3]]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_roundtrip_single_word() {
        assert_eq!(pack_argb([0x12, 0x34, 0x56, 0x78]), 0x78123456);
        assert_eq!(unpack_argb(0x78123456), [0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn packed_length_mismatch() {
        let res = Rgba8::from_packed_argb([2, 2].into(), &[0; 3]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(3, 4)));
    }
}
