use ndarray::{Array2, Array3, ArrayD, ArrayView3, ArrayViewMut3, Axis, Ix2, Ix3};

use crate::error::ImageError;
use crate::image::{Image, ImageSize};

/// A dense array image of shape (H, W) or (H, W, C).
///
/// The pixels are always held as a (H, W, C) array; a two dimensional input is
/// stored with a single channel and gets its original rank back from
/// [`DenseImage::into_array`].
///
/// # Examples
///
/// ```
/// use geoaug_image::DenseImage;
/// use ndarray::Array2;
///
/// let gray = DenseImage::from_gray(Array2::<f32>::zeros((4, 6)));
///
/// assert_eq!(gray.size().width, 6);
/// assert_eq!(gray.size().height, 4);
/// assert_eq!(gray.shape(), vec![4, 6]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DenseImage<T> {
    data: Array3<T>,
    channel_axis: bool,
}

impl<T> DenseImage<T> {
    /// Create a dense image from an array of rank 2 (H, W) or rank 3 (H, W, C).
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDimension`] for any other rank.
    pub fn new(array: ArrayD<T>) -> Result<Self, ImageError> {
        match array.ndim() {
            2 => Ok(Self::from_gray(array.into_dimensionality::<Ix2>()?)),
            3 => Ok(Self::from_array3(array.into_dimensionality::<Ix3>()?)),
            rank => Err(ImageError::InvalidDimension(rank)),
        }
    }

    /// Create a dense image without a channel axis.
    pub fn from_gray(array: Array2<T>) -> Self {
        Self {
            data: array.insert_axis(Axis(2)),
            channel_axis: false,
        }
    }

    /// Create a dense image with a channel axis.
    pub fn from_array3(array: Array3<T>) -> Self {
        Self {
            data: array,
            channel_axis: true,
        }
    }

    /// Create a dense image from its (H, W, C) storage and the rank to report.
    ///
    /// # Errors
    ///
    /// An image without a channel axis must hold exactly one channel.
    pub fn with_layout(data: Array3<T>, channel_axis: bool) -> Result<Self, ImageError> {
        let channels = data.dim().2;
        if !channel_axis && channels != 1 {
            return Err(ImageError::InvalidChannelShape(channels, 1));
        }
        Ok(Self { data, channel_axis })
    }

    /// Create a dense image filled with `val`, following the layout of `self`.
    pub fn filled_like(&self, size: ImageSize, val: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: Array3::from_elem((size.height, size.width, self.num_channels()), val),
            channel_axis: self.channel_axis,
        }
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        let (height, width, _) = self.data.dim();
        ImageSize { width, height }
    }

    /// Get the number of channels, 1 for images without a channel axis.
    pub fn num_channels(&self) -> usize {
        self.data.dim().2
    }

    /// Whether the image was built with a channel axis.
    pub fn has_channel_axis(&self) -> bool {
        self.channel_axis
    }

    /// The shape as the caller sees it: `[H, W]` or `[H, W, C]`.
    pub fn shape(&self) -> Vec<usize> {
        let (height, width, channels) = self.data.dim();
        if self.channel_axis {
            vec![height, width, channels]
        } else {
            vec![height, width]
        }
    }

    /// A (H, W, C) view of the pixels.
    pub fn view(&self) -> ArrayView3<'_, T> {
        self.data.view()
    }

    /// A mutable (H, W, C) view of the pixels.
    pub fn view_mut(&mut self) -> ArrayViewMut3<'_, T> {
        self.data.view_mut()
    }

    /// The (H, W, C) storage.
    pub fn as_array3(&self) -> &Array3<T> {
        &self.data
    }

    /// Consume the image and return the array with its original rank.
    pub fn into_array(self) -> ArrayD<T> {
        if self.channel_axis {
            self.data.into_dyn()
        } else {
            self.data.index_axis_move(Axis(2), 0).into_dyn()
        }
    }
}

impl<T> TryFrom<ArrayD<T>> for DenseImage<T> {
    type Error = ImageError;

    fn try_from(array: ArrayD<T>) -> Result<Self, Self::Error> {
        Self::new(array)
    }
}

impl<T, const C: usize> TryFrom<Image<T, C>> for DenseImage<T> {
    type Error = ImageError;

    fn try_from(image: Image<T, C>) -> Result<Self, Self::Error> {
        let size = image.size();
        let data = Array3::from_shape_vec((size.height, size.width, C), image.into_vec())?;
        Ok(Self::from_array3(data))
    }
}

impl<T: Clone, const C: usize> TryFrom<DenseImage<T>> for Image<T, C> {
    type Error = ImageError;

    fn try_from(image: DenseImage<T>) -> Result<Self, Self::Error> {
        if image.num_channels() != C {
            return Err(ImageError::InvalidChannelShape(image.num_channels(), C));
        }
        let size = image.size();
        // logical iteration order is (H, W, C) regardless of the memory layout
        let data = image.data.iter().cloned().collect();
        Image::new(size, data)
    }
}

#[cfg(test)]
mod tests {
    use super::DenseImage;
    use crate::{Image, ImageError, ImageSize};
    use ndarray::{Array2, Array3, ArrayD, IxDyn};

    #[test]
    fn dense_from_rank2() -> Result<(), ImageError> {
        let image = DenseImage::new(ArrayD::<f32>::zeros(IxDyn(&[3, 5])))?;
        assert!(!image.has_channel_axis());
        assert_eq!(image.num_channels(), 1);
        assert_eq!(image.shape(), vec![3, 5]);
        assert_eq!(image.into_array().shape(), &[3, 5]);
        Ok(())
    }

    #[test]
    fn dense_from_rank3() -> Result<(), ImageError> {
        let image = DenseImage::new(ArrayD::<u8>::zeros(IxDyn(&[3, 5, 4])))?;
        assert!(image.has_channel_axis());
        assert_eq!(
            image.size(),
            ImageSize {
                width: 5,
                height: 3
            }
        );
        assert_eq!(image.into_array().shape(), &[3, 5, 4]);
        Ok(())
    }

    #[test]
    fn dense_invalid_rank() {
        for shape in [&[4][..], &[2, 2, 2, 2][..]] {
            let res = DenseImage::new(ArrayD::<f32>::zeros(IxDyn(shape)));
            assert!(matches!(res, Err(ImageError::InvalidDimension(n)) if n == shape.len()));
        }
    }

    #[test]
    fn dense_layout_check() {
        let res = DenseImage::with_layout(Array3::<f32>::zeros((2, 2, 3)), false);
        assert!(matches!(res, Err(ImageError::InvalidChannelShape(3, 1))));
    }

    #[test]
    fn dense_image_conversion() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1, 2, 3, 4],
        )?;

        let dense = DenseImage::try_from(image.clone())?;
        assert_eq!(dense.view()[[0, 1, 0]], 3);
        assert_eq!(dense.view()[[0, 1, 1]], 4);

        let back: Image<u8, 2> = dense.clone().try_into()?;
        assert_eq!(back, image);

        let wrong: Result<Image<u8, 3>, _> = dense.try_into();
        assert!(wrong.is_err());
        Ok(())
    }

    #[test]
    fn dense_filled_like() {
        let gray = DenseImage::from_gray(Array2::from_elem((2, 2), 1.0f64));
        let filled = gray.filled_like(
            ImageSize {
                width: 3,
                height: 4,
            },
            0.5,
        );
        assert_eq!(filled.shape(), vec![4, 3]);
        assert!(filled.view().iter().all(|&v| v == 0.5));
    }
}
