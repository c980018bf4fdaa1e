use geoaug_image::{DenseImage, Image, ImageDtype, ImageError, ImageSize};
use ndarray::s;

use crate::crop::{clamp_window, copy_window, CropOffset};
use crate::padding::{spatial_padding, Padding2D};
use crate::resize;

/// Spatial capabilities shared by the image representations.
///
/// Both the dense array image ([`DenseImage`]) and the object image ([`Image`])
/// can be measured, cropped and padded with the same semantics. Resampling is
/// optional: representations that do not provide it report
/// [`ImageError::UnsupportedType`].
pub trait SpatialImage: Sized {
    /// The pixel element type.
    type Pixel: ImageDtype;

    /// Get the size of the image in pixels.
    fn size(&self) -> ImageSize;

    /// Get the number of channels.
    fn num_channels(&self) -> usize;

    /// Extract the window of `crop_size` at `offset`, clamped to the image.
    fn crop(&self, crop_size: ImageSize, offset: CropOffset) -> Result<Self, ImageError>;

    /// Grow the canvas by `padding`, filling the border with `pad_value`.
    fn pad(&self, padding: &Padding2D, pad_value: Self::Pixel) -> Result<Self, ImageError>;

    /// Resample the image by `scale_factor` with anti-aliasing.
    fn rescale(&self, scale_factor: f64) -> Result<Self, ImageError> {
        let _ = scale_factor;
        Err(ImageError::UnsupportedType(
            std::any::type_name::<Self>().to_string(),
        ))
    }
}

impl<T: ImageDtype> SpatialImage for DenseImage<T> {
    type Pixel = T;

    fn size(&self) -> ImageSize {
        DenseImage::size(self)
    }

    fn num_channels(&self) -> usize {
        DenseImage::num_channels(self)
    }

    fn crop(&self, crop_size: ImageSize, offset: CropOffset) -> Result<Self, ImageError> {
        let (offset, window) = clamp_window(DenseImage::size(self), crop_size, offset);
        let (y0, x0) = (offset.h_offset, offset.w_offset);

        let data = self
            .view()
            .slice(s![y0..y0 + window.height, x0..x0 + window.width, ..])
            .to_owned();

        DenseImage::with_layout(data, self.has_channel_axis())
    }

    fn pad(&self, padding: &Padding2D, pad_value: T) -> Result<Self, ImageError> {
        let size = DenseImage::size(self);
        let mut dst = self.filled_like(padding.padded_size(size), pad_value);

        dst.view_mut()
            .slice_mut(s![
                padding.top..padding.top + size.height,
                padding.left..padding.left + size.width,
                ..
            ])
            .assign(&self.view());

        Ok(dst)
    }

    fn rescale(&self, scale_factor: f64) -> Result<Self, ImageError> {
        resize::rescale(self, scale_factor)
    }
}

impl<T: ImageDtype, const C: usize> SpatialImage for Image<T, C> {
    type Pixel = T;

    fn size(&self) -> ImageSize {
        Image::size(self)
    }

    fn num_channels(&self) -> usize {
        C
    }

    fn crop(&self, crop_size: ImageSize, offset: CropOffset) -> Result<Self, ImageError> {
        let (offset, window) = clamp_window(Image::size(self), crop_size, offset);
        let mut dst = Image::from_size_val(window, T::default())?;
        copy_window(self, &mut dst, offset.w_offset, offset.h_offset)?;
        Ok(dst)
    }

    fn pad(&self, padding: &Padding2D, pad_value: T) -> Result<Self, ImageError> {
        let mut dst = Image::from_size_val(padding.padded_size(Image::size(self)), pad_value)?;
        spatial_padding(self, &mut dst, padding, [pad_value; C])?;
        Ok(dst)
    }
}
