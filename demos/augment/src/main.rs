use argh::FromArgs;
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;

use segaug_augment::{AugmentConfig, Sample, Transform};
use segaug_image::{Image, ImageSize};

#[derive(FromArgs)]
/// Run the training augmentation pipeline on a synthetic sample
struct Args {
    /// width of the synthetic image
    #[argh(option, default = "320")]
    width: usize,

    /// height of the synthetic image
    #[argh(option, default = "240")]
    height: usize,

    /// seed of the random generator
    #[argh(option, short = 's', default = "0")]
    seed: u64,

    /// number of augmented samples to draw
    #[argh(option, short = 'n', default = "4")]
    num_samples: usize,

    /// path to a JSON pipeline configuration
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,
}

/// A gradient image with a filled disc as mask and its rim as contour.
fn synthetic_sample(size: ImageSize) -> Result<Sample, Box<dyn std::error::Error>> {
    let (cx, cy) = (size.width as f32 / 2.0, size.height as f32 / 2.0);
    let radius = size.width.min(size.height) as f32 / 3.0;

    let mut image = Image::<u8, 3>::from_size_val(size, 0)?;
    let mut mask = Image::<u8, 1>::from_size_val(size, 0)?;
    let mut contour = Image::<u8, 1>::from_size_val(size, 0)?;

    for y in 0..size.height {
        for x in 0..size.width {
            let idx = y * size.width + x;
            let pixel = &mut image.as_slice_mut()[idx * 3..idx * 3 + 3];
            pixel[0] = (255 * x / size.width.max(1)) as u8;
            pixel[1] = (255 * y / size.height.max(1)) as u8;
            pixel[2] = 128;

            let dist = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
            if dist <= radius {
                mask.as_slice_mut()[idx] = 255;
            }
            if (dist - radius).abs() <= 1.0 {
                contour.as_slice_mut()[idx] = 255;
            }
        }
    }

    Ok(Sample::new(image).with_mask(mask).with_contour(contour))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    // read the pipeline configuration
    let config = match &args.config {
        Some(path) => AugmentConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => AugmentConfig::default(),
    };
    let pipeline = config.build()?;

    let size = ImageSize {
        width: args.width,
        height: args.height,
    };
    let sample = synthetic_sample(size)?;
    sample.validate()?;

    let mut rng = StdRng::seed_from_u64(args.seed);

    for i in 0..args.num_samples {
        let out = pipeline.apply(sample.clone(), &mut rng)?;

        let foreground = out
            .mask
            .as_ref()
            .map(|mask| mask.iter().filter(|&&v| v > 0.5).count() as f32 / mask.len() as f32)
            .unwrap_or_default();

        log::info!(
            "sample {i}: image {:?}, mask {:?}, foreground {:.3}",
            out.image.shape(),
            out.mask.as_ref().map(|mask| mask.shape().to_vec()),
            foreground
        );
    }

    Ok(())
}
