use glam::{DMat3, DVec2, DVec3};

use geoaug_imgproc::crop::CropOffset;
use geoaug_imgproc::padding::Padding2D;

/// A 3x3 pinhole camera matrix.
///
/// ```text
/// | fx  s  cx |
/// |  0 fy  cy |
/// |  0  0   1 |
/// ```
///
/// The matrix maps camera-space points to homogeneous pixel coordinates, so any
/// affine change of the pixel grid is applied by left-multiplying it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntrinsicMatrix(DMat3);

impl IntrinsicMatrix {
    /// Create a matrix from the focal lengths and the principal point.
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self::from_rows([[fx, 0.0, cx], [0.0, fy, cy], [0.0, 0.0, 1.0]])
    }

    /// Create a matrix from its rows.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        // glam is column major
        Self(DMat3::from_cols_array_2d(&rows).transpose())
    }

    /// Export the matrix as rows.
    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        self.0.transpose().to_cols_array_2d()
    }

    /// Wrap a glam matrix.
    pub fn from_mat3(matrix: DMat3) -> Self {
        Self(matrix)
    }

    /// Get the underlying glam matrix.
    pub fn as_mat3(&self) -> &DMat3 {
        &self.0
    }

    /// Focal length along x.
    pub fn fx(&self) -> f64 {
        self.0.x_axis.x
    }

    /// Focal length along y.
    pub fn fy(&self) -> f64 {
        self.0.y_axis.y
    }

    /// Principal point x coordinate.
    pub fn cx(&self) -> f64 {
        self.0.z_axis.x
    }

    /// Principal point y coordinate.
    pub fn cy(&self) -> f64 {
        self.0.z_axis.y
    }

    /// Project a camera-space point to pixel coordinates.
    pub fn project(&self, point: DVec3) -> DVec2 {
        let p = self.0 * point;
        DVec2::new(p.x / p.z, p.y / p.z)
    }

    /// Apply a pixel grid transform, returning `transform * K`.
    pub fn transformed(&self, transform: &DMat3) -> Self {
        Self(*transform * self.0)
    }
}

impl From<[[f64; 3]; 3]> for IntrinsicMatrix {
    fn from(rows: [[f64; 3]; 3]) -> Self {
        Self::from_rows(rows)
    }
}

/// Transform of the pixel grid for an isotropic rescale.
pub fn scale_transform(scale_factor: f64) -> DMat3 {
    DMat3::from_diagonal(DVec3::new(scale_factor, scale_factor, 1.0))
}

/// Transform of the pixel grid when cropping at `offset`.
pub fn crop_transform(offset: CropOffset) -> DMat3 {
    DMat3::from_translation(DVec2::new(
        -(offset.w_offset as f64),
        -(offset.h_offset as f64),
    ))
}

/// Transform of the pixel grid when padding, only the top and left sides move pixels.
pub fn pad_transform(padding: &Padding2D) -> DMat3 {
    DMat3::from_translation(DVec2::new(padding.left as f64, padding.top as f64))
}

/// Update the intrinsics for a rescale, followed by a crop, followed by a padding.
///
/// Computes `K' = P * C * S * K` where `S` scales by `scale_factor`, `C` translates
/// by the negated crop offset and `P` translates by the top-left padding.
///
/// # Example
///
/// ```
/// use geoaug_augment::intrinsics::{scale_crop_intrinsics, IntrinsicMatrix};
/// use geoaug_imgproc::crop::CropOffset;
/// use geoaug_imgproc::padding::Padding2D;
///
/// let k = IntrinsicMatrix::new(500.0, 500.0, 320.0, 240.0);
/// let k = scale_crop_intrinsics(&k, 0.5, CropOffset::new(10, 20), &Padding2D::default());
///
/// assert_eq!(k.fx(), 250.0);
/// assert_eq!((k.cx(), k.cy()), (140.0, 110.0));
/// ```
pub fn scale_crop_intrinsics(
    k: &IntrinsicMatrix,
    scale_factor: f64,
    offset: CropOffset,
    padding: &Padding2D,
) -> IntrinsicMatrix {
    let transform = pad_transform(padding) * crop_transform(offset) * scale_transform(scale_factor);
    k.transformed(&transform)
}
