use approx::assert_relative_eq;
use geoaug_augment::{
    intrinsics::IntrinsicMatrix,
    sampling::{get_random_crop_offsets, get_subset_views, DEFAULT_MINIMUM_VIEWS},
    scale_crop, AugmentError, RandomScaleCrop, RandomScaleCropParams,
};
use geoaug_image::{DenseImage, Image, ImageError, ImageSize};
use geoaug_imgproc::{
    crop::{crop_image, CropOffset},
    padding::{pad_to_size_with_offsets, Padding2D},
};
use ndarray::{s, Array2, Array3};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn intrinsics_after_half_scale_and_crop() -> Result<(), ImageError> {
    let image = DenseImage::from_array3(Array3::<f32>::zeros((480, 640, 3)));
    let k = IntrinsicMatrix::from_rows([[500.0, 0.0, 320.0], [0.0, 500.0, 240.0], [0.0, 0.0, 1.0]]);

    let out = scale_crop(&image, 128usize, CropOffset::new(10, 20), 0.5, Some(&k))?;
    let rows = out.intrinsics.expect("intrinsics were given").to_rows();

    assert_relative_eq!(rows[0][0], 250.0);
    assert_relative_eq!(rows[1][1], 250.0);
    assert_relative_eq!(rows[0][2], 140.0);
    assert_relative_eq!(rows[1][2], 110.0);
    assert_eq!(rows[2], [0.0, 0.0, 1.0]);

    Ok(())
}

#[test]
fn unit_scale_crop_matches_slice() -> Result<(), ImageError> {
    let data = Array3::from_shape_fn((300, 300, 3), |(y, x, c)| {
        ((y * 300 + x) * 3 + c) as f64 / (300.0 * 300.0 * 3.0)
    });
    let image = DenseImage::from_array3(data.clone());

    let out = scale_crop(&image, 128usize, CropOffset::new(50, 50), 1.0, None)?;

    assert_eq!(out.image.view(), data.slice(s![50..178, 50..178, ..]));
    assert_eq!(out.padding, Padding2D::default());

    Ok(())
}

#[test]
fn small_image_gets_centred() -> Result<(), ImageError> {
    let image = DenseImage::from_array3(Array3::from_elem((100, 100, 3), 200u8));

    let out = scale_crop(&image, 128usize, CropOffset::default(), 1.0, None)?;

    assert_eq!(out.image.shape(), vec![128, 128, 3]);
    assert_eq!((out.padding.top, out.padding.left), (14, 14));

    let view = out.image.view();
    for ((y, x, _), v) in view.indexed_iter() {
        let inside = (14..114).contains(&y) && (14..114).contains(&x);
        assert_eq!(*v, if inside { 200 } else { 0 }, "pixel ({y}, {x})");
    }

    Ok(())
}

#[test]
fn pad_then_crop_recovers_the_image() -> Result<(), ImageError> {
    let data = Array2::from_shape_fn((37, 51), |(y, x)| (y * 51 + x) as u16);
    let image = DenseImage::from_gray(data);
    let target = ImageSize {
        width: 64,
        height: 64,
    };

    let (padded, padding) = pad_to_size_with_offsets(&image, target, 0)?;
    assert!(padding.validate_size(image.size(), padded.size()));

    let recovered = crop_image(
        &padded,
        image.size(),
        CropOffset::new(padding.top, padding.left),
    )?;
    assert_eq!(recovered, image);

    Ok(())
}

#[test]
fn both_representations_crop_alike() -> Result<(), ImageError> {
    let size = ImageSize {
        width: 20,
        height: 12,
    };
    let data = (0..size.width * size.height * 3)
        .map(|v| (v % 256) as u8)
        .collect::<Vec<_>>();
    let object = Image::<u8, 3>::new(size, data)?;
    let dense = DenseImage::try_from(object.clone())?;

    for offset in [CropOffset::new(0, 0), CropOffset::new(5, 9), CropOffset::new(10, 18)] {
        let from_object = crop_image(&object, (6usize, 8usize), offset)?;
        let from_dense = crop_image(&dense, (6usize, 8usize), offset)?;
        assert_eq!(DenseImage::try_from(from_object)?, from_dense);
    }

    Ok(())
}

#[test]
fn sampled_windows_need_no_padding() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(2024);
    let image = DenseImage::from_gray(Array2::<f32>::zeros((240, 320)));

    for _ in 0..50 {
        let offset = get_random_crop_offsets(96usize, 240, 320, &mut rng);
        let out = scale_crop(&image, 96usize, offset, 1.0, None)?;
        assert!(out.padding.is_zero());
        assert_eq!(out.image.shape(), vec![96, 96]);
    }

    Ok(())
}

#[test]
fn view_subsets() {
    let mut rng = StdRng::seed_from_u64(9);

    assert_eq!(get_subset_views(2, DEFAULT_MINIMUM_VIEWS, &mut rng), vec![0, 1]);
    assert!(get_subset_views(0, DEFAULT_MINIMUM_VIEWS, &mut rng).is_empty());

    for _ in 0..100 {
        let mut views = get_subset_views(9, DEFAULT_MINIMUM_VIEWS, &mut rng);
        assert!(views.len() >= DEFAULT_MINIMUM_VIEWS && views.len() <= 9);
        views.sort_unstable();
        views.dedup();
        assert!(views.len() >= DEFAULT_MINIMUM_VIEWS);
        assert!(views.iter().all(|&v| v < 9));
    }
}

#[test]
fn random_scale_crop_keeps_intrinsics_consistent() -> Result<(), AugmentError> {
    let mut augment = RandomScaleCrop::new(RandomScaleCropParams {
        crop_size: (96usize, 128usize).into(),
        scale_range: (0.4, 1.6),
        random_seed: Some(5),
    })?;

    let image = DenseImage::from_array3(Array3::<f32>::zeros((180, 240, 3)));
    let k = IntrinsicMatrix::new(200.0, 210.0, 120.0, 90.0);

    for _ in 0..10 {
        let out = augment.apply(&image, Some(&k))?;
        assert_eq!(out.image.shape(), vec![96, 128, 3]);

        // fx / fy keeps the aspect ratio of the pixels
        let new_k = out.intrinsics.expect("intrinsics were given");
        assert_relative_eq!(new_k.fx() / new_k.fy(), 200.0 / 210.0, epsilon = 1e-12);
        assert!(new_k.fx() >= 0.4 * 200.0 - 1e-9 && new_k.fx() <= 1.6 * 200.0 + 1e-9);
    }

    Ok(())
}
