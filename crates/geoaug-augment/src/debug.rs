//! Inspection hooks for the intermediate images of [`crate::scale_crop`].

use geoaug_imgproc::SpatialImage;

/// A stage of the scale-crop pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleCropStage {
    /// The image as given by the caller.
    Input,
    /// After the rescale.
    Scaled,
    /// After the crop.
    Cropped,
    /// After padding to the crop size.
    Padded,
}

impl ScaleCropStage {
    /// All the stages, in pipeline order.
    pub const ALL: [ScaleCropStage; 4] = [
        ScaleCropStage::Input,
        ScaleCropStage::Scaled,
        ScaleCropStage::Cropped,
        ScaleCropStage::Padded,
    ];

    /// File name used when dumping the stage to disk.
    pub fn file_name(&self) -> &'static str {
        match self {
            ScaleCropStage::Input => "0_input.png",
            ScaleCropStage::Scaled => "1_scaled.png",
            ScaleCropStage::Cropped => "2_cropped.png",
            ScaleCropStage::Padded => "3_padded.png",
        }
    }
}

/// Receives the intermediate images of an augmentation.
///
/// Sinks are fire and forget: they cannot fail the augmentation.
pub trait DebugSink<I> {
    /// Record the image produced at `stage`.
    fn record(&mut self, stage: ScaleCropStage, image: &I);
}

/// A sink that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl<I> DebugSink<I> for NoopSink {
    fn record(&mut self, _stage: ScaleCropStage, _image: &I) {}
}

/// A sink that logs the size of every stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl<I: SpatialImage> DebugSink<I> for LogSink {
    fn record(&mut self, stage: ScaleCropStage, image: &I) {
        log::debug!(
            "{:?}: {} with {} channels",
            stage,
            image.size(),
            image.num_channels()
        );
    }
}

#[cfg(feature = "debug-dump")]
pub use png::PngDumpSink;

#[cfg(feature = "debug-dump")]
mod png {
    use std::path::{Path, PathBuf};

    use geoaug_image::{DenseImage, ImageDtype};
    use image::{GrayImage, RgbImage, RgbaImage};

    use super::{DebugSink, ScaleCropStage};

    /// A sink writing every stage as a png file into a directory.
    ///
    /// Pixel values are written as `255 * v` clamped to `u8`, which suits float
    /// images in `[0, 1]`. Images with 1, 3 or 4 channels are supported; write
    /// errors are logged and otherwise ignored.
    #[derive(Clone, Debug)]
    pub struct PngDumpSink {
        root: PathBuf,
    }

    impl PngDumpSink {
        /// Create a sink writing into `root`, which must exist.
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        /// The directory the stages are written to.
        pub fn root(&self) -> &Path {
            &self.root
        }

        /// The path a stage is written to.
        pub fn stage_path(&self, stage: ScaleCropStage) -> PathBuf {
            self.root.join(stage.file_name())
        }
    }

    impl<T: ImageDtype> DebugSink<DenseImage<T>> for PngDumpSink {
        fn record(&mut self, stage: ScaleCropStage, image: &DenseImage<T>) {
            let path = self.stage_path(stage);
            let size = image.size();
            let (width, height) = (size.width as u32, size.height as u32);

            let data = image
                .view()
                .iter()
                .map(|&v| u8::from_f64(255.0 * Into::<f64>::into(v)))
                .collect::<Vec<_>>();

            let res = match image.num_channels() {
                1 => GrayImage::from_raw(width, height, data).map(|img| img.save(&path)),
                3 => RgbImage::from_raw(width, height, data).map(|img| img.save(&path)),
                4 => RgbaImage::from_raw(width, height, data).map(|img| img.save(&path)),
                channels => {
                    log::warn!(
                        "Cannot dump {:?} with {} channels to {}",
                        stage,
                        channels,
                        path.display()
                    );
                    return;
                }
            };

            match res {
                Some(Ok(())) => log::debug!("Wrote {:?} to {}", stage, path.display()),
                Some(Err(e)) => log::warn!("Failed to write {}: {}", path.display(), e),
                None => log::warn!("Invalid buffer for {:?} of size {}", stage, size),
            }
        }
    }
}
