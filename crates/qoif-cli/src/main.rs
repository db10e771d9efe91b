//! qoif - Encode images to the QOI format
//!
//! A command-line tool that loads an image (PNG, JPEG, GIF, WebP) and writes it
//! out as a `.qoi` file.

use clap::Parser;
use env_logger::Env;
use image::DynamicImage;
use qoif::{qoi_encode, EncodeOptions, QoiError, RawImage};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "qoif")]
#[command(version)]
#[command(about = "Encode an image to the QOI format", long_about = None)]
struct Cli {
    /// Input image file (PNG, JPEG, GIF, WebP)
    input: PathBuf,

    /// Output QOI file (default: input with .qoi extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append the 8 byte QOI end-of-stream marker
    #[arg(long)]
    end_marker: bool,
}

/// Interleaved pixel bytes of `img` and its channel count: 4 when the source
/// has an alpha channel, 3 otherwise.
fn pixel_bytes(img: DynamicImage) -> (Vec<u8>, u8) {
    if img.color().has_alpha() {
        (img.into_rgba8().into_raw(), 4)
    } else {
        (img.into_rgb8().into_raw(), 3)
    }
}

fn output_path(input: &Path, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| input.with_extension("qoi"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let img = image::open(&cli.input).map_err(|e| {
        QoiError::SourceUnavailable(format!("failed to open '{}': {}", cli.input.display(), e))
    })?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    let (pixels, channels) = pixel_bytes(img);

    log::info!(
        "Encoding '{}' ({}x{}, {} channels)",
        cli.input.display(),
        width,
        height,
        channels
    );

    let opts = EncodeOptions {
        end_marker: cli.end_marker,
    };
    let source = RawImage::new(&pixels, width, height, channels)?;
    let qoi = qoi_encode(&source, &opts)?;

    let path = output_path(&cli.input, cli.output);
    fs::write(&path, &qoi).map_err(QoiError::from)?;
    log::info!("Written {} bytes to '{}'", qoi.len(), path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_default_output_replaces_extension() {
        assert_eq!(
            output_path(Path::new("photos/cat.png"), None),
            PathBuf::from("photos/cat.qoi")
        );
        assert_eq!(
            output_path(Path::new("archive.tar.png"), None),
            PathBuf::from("archive.tar.qoi")
        );
        assert_eq!(output_path(Path::new("noext"), None), PathBuf::from("noext.qoi"));
    }

    #[test]
    fn test_explicit_output_wins() {
        assert_eq!(
            output_path(Path::new("cat.png"), Some(PathBuf::from("out/x.bin"))),
            PathBuf::from("out/x.bin")
        );
    }

    #[test]
    fn test_channels_follow_alpha() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 1, Rgb([1, 2, 3])));
        assert_eq!(pixel_bytes(rgb), (vec![1, 2, 3, 1, 2, 3], 3));

        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 4])));
        assert_eq!(pixel_bytes(rgba), (vec![1, 2, 3, 4], 4));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["qoif", "in.png", "-o", "out.qoi", "--end-marker"]);
        assert_eq!(cli.input, PathBuf::from("in.png"));
        assert_eq!(cli.output, Some(PathBuf::from("out.qoi")));
        assert!(cli.end_marker);

        let cli = Cli::parse_from(["qoif", "in.png"]);
        assert!(cli.output.is_none());
        assert!(!cli.end_marker);
    }
}
