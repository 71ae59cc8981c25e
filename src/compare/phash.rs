//! Perceptual hashing for page images.
//!
//! A 64-bit frequency-domain fingerprint: the image is reduced to 32x32
//! grayscale, transformed with a 2D DCT-II, and the 8x8 low-frequency
//! block (minus the DC term) is thresholded against its median. Two
//! fingerprints are compared by Hamming distance; small distances mean
//! the pages look alike even when exact pixel diffs are noisy.

use image::{imageops, imageops::FilterType, RgbImage};

const HASH_SIZE: u32 = 8;
const DCT_SIZE: usize = 32;

/// Compute the 64-bit perceptual hash of an image.
pub fn phash(img: &RgbImage) -> u64 {
    let gray = imageops::grayscale(img);
    let small = imageops::resize(&gray, DCT_SIZE as u32, DCT_SIZE as u32, FilterType::Triangle);

    let mut pixels = [[0.0f64; DCT_SIZE]; DCT_SIZE];
    for y in 0..DCT_SIZE {
        for x in 0..DCT_SIZE {
            pixels[y][x] = small.get_pixel(x as u32, y as u32).0[0] as f64;
        }
    }
    let coeffs = dct_2d(&pixels);

    // Low-frequency 8x8 block, skipping the DC coefficient
    let mut block = Vec::with_capacity((HASH_SIZE * HASH_SIZE) as usize - 1);
    for (y, row) in coeffs.iter().take(HASH_SIZE as usize).enumerate() {
        for (x, &c) in row.iter().take(HASH_SIZE as usize).enumerate() {
            if x == 0 && y == 0 {
                continue;
            }
            block.push(c);
        }
    }

    let median = median_of(&block);
    let mut hash = 0u64;
    for (bit, &c) in block.iter().enumerate() {
        if c > median {
            hash |= 1 << bit;
        }
    }
    hash
}

/// Hamming distance between two hashes.
pub fn hamming(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Separable 2D DCT-II: rows first, then columns.
fn dct_2d(input: &[[f64; DCT_SIZE]; DCT_SIZE]) -> [[f64; DCT_SIZE]; DCT_SIZE] {
    let mut rows = [[0.0f64; DCT_SIZE]; DCT_SIZE];
    for (y, row) in input.iter().enumerate() {
        rows[y] = dct_1d(row);
    }

    let mut out = [[0.0f64; DCT_SIZE]; DCT_SIZE];
    for x in 0..DCT_SIZE {
        let mut col = [0.0f64; DCT_SIZE];
        for y in 0..DCT_SIZE {
            col[y] = rows[y][x];
        }
        let transformed = dct_1d(&col);
        for y in 0..DCT_SIZE {
            out[y][x] = transformed[y];
        }
    }
    out
}

fn dct_1d(input: &[f64; DCT_SIZE]) -> [f64; DCT_SIZE] {
    let n = DCT_SIZE as f64;
    let mut out = [0.0f64; DCT_SIZE];
    for (k, slot) in out.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (i, &v) in input.iter().enumerate() {
            sum += v * (std::f64::consts::PI / n * (i as f64 + 0.5) * k as f64).cos();
        }
        *slot = sum;
    }
    out
}

fn median_of(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
