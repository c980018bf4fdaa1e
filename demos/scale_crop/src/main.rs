use argh::FromArgs;
use std::path::PathBuf;

use geoaug::augment::{
    debug::{LogSink, PngDumpSink},
    IntrinsicMatrix, RandomScaleCrop, RandomScaleCropParams,
};
use geoaug::image::{ops::cast_and_scale, DenseImage, Image, ImageSize};

#[derive(FromArgs)]
/// Apply a random scale-crop to a png image and print the updated intrinsics
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to write the augmented image to
    #[argh(option, short = 'o', default = "PathBuf::from(\"augmented.png\")")]
    output_path: PathBuf,

    /// side of the square output in pixels
    #[argh(option, default = "256")]
    crop_size: usize,

    /// smallest scale factor
    #[argh(option, default = "0.5")]
    min_scale: f64,

    /// largest scale factor
    #[argh(option, default = "1.5")]
    max_scale: f64,

    /// focal length in pixels, the principal point is the image centre
    #[argh(option, default = "500.0")]
    focal: f64,

    /// seed of the random generator
    #[argh(option)]
    seed: Option<u64>,

    /// directory to dump the intermediate images to
    #[argh(option)]
    debug_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the image
    let rgb = image::open(&args.image_path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    let size = ImageSize {
        width: width as usize,
        height: height as usize,
    };
    let rgb = Image::<u8, 3>::new(size, rgb.into_raw())?;

    // normalize the image between 0 and 1, only dense images can be rescaled
    let mut rgb_f32 = Image::<f32, 3>::from_size_val(size, 0.0)?;
    cast_and_scale(&rgb, &mut rgb_f32, 1.0 / 255.0)?;
    let dense = DenseImage::try_from(rgb_f32)?;

    let k = IntrinsicMatrix::new(
        args.focal,
        args.focal,
        width as f64 / 2.0,
        height as f64 / 2.0,
    );

    let mut augment = RandomScaleCrop::new(RandomScaleCropParams {
        crop_size: args.crop_size.into(),
        scale_range: (args.min_scale, args.max_scale),
        random_seed: args.seed,
    })?;

    let out = match &args.debug_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            augment.apply_with_sink(&dense, Some(&k), &mut PngDumpSink::new(dir))?
        }
        None => augment.apply_with_sink(&dense, Some(&k), &mut LogSink)?,
    };

    log::info!("Padding of the output: {:?}", out.padding);

    // write the augmented image back as u8
    let size = out.image.size();
    let pixels = out
        .image
        .view()
        .iter()
        .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
        .collect::<Vec<_>>();
    let augmented = image::RgbImage::from_raw(size.width as u32, size.height as u32, pixels)
        .ok_or("invalid output buffer")?;
    augmented.save(&args.output_path)?;

    println!("Wrote {}", args.output_path.display());
    if let Some(k) = out.intrinsics {
        println!("Updated intrinsics:");
        for row in k.to_rows() {
            println!("  [{:10.3} {:10.3} {:10.3}]", row[0], row[1], row[2]);
        }
    }

    Ok(())
}
