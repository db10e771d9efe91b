#![no_main]

use libfuzzer_sys::fuzz_target;
use qoif::{encoded_size_limit, qoi_encode, EncodeOptions, RawImage};
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    alpha: bool,
    end_marker: bool,
    pixels: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let width = input.width as usize;
    let height = input.height as usize;
    let channels: u8 = if input.alpha { 4 } else { 3 };

    // Ensure we have enough pixels
    let expected_size = width * height * channels as usize;
    if input.pixels.len() < expected_size {
        return;
    }

    let image = match RawImage::new(&input.pixels[..expected_size], width, height, channels) {
        Ok(image) => image,
        Err(_) => return,
    };
    let opts = EncodeOptions {
        end_marker: input.end_marker,
    };

    // The encoder should never panic
    let qoi = qoi_encode(&image, &opts).expect("valid source must encode");

    assert_eq!(&qoi[..4], b"qoif");
    assert_eq!(&qoi[4..8], &(width as u32).to_be_bytes());
    assert_eq!(&qoi[8..12], &(height as u32).to_be_bytes());
    assert_eq!(qoi[12], channels);
    assert!(qoi.len() <= encoded_size_limit(width as u32, height as u32, &opts).unwrap());
});
