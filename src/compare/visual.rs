//! Visual page comparison.
//!
//! Quantifies pixel-level and perceptual differences between rendered
//! page pairs and produces the highlighted-overlay artifact used for
//! human review. Page pairs are independent, so they are compared in
//! parallel unless the options say otherwise.

use image::{imageops, imageops::FilterType, GrayImage, Luma, RgbImage, Rgba, RgbaImage};
use rayon::prelude::*;

use crate::compare::options::CompareOptions;
use crate::compare::phash::{hamming, phash};
use crate::model::{ImageDiff, ImageDiffKind, PageArtifacts};

/// Alpha of the red highlight composited onto changed regions.
const OVERLAY_ALPHA: u16 = 120;

/// Compares rendered page images between two documents.
///
/// Both documents must have been rasterized at the same DPI; if a page
/// pair still differs in pixel dimensions, the target is resized to the
/// source's dimensions with nearest-neighbor resampling before comparison
/// (lossy, and a source of measurement noise the caller accepts).
#[derive(Debug, Clone)]
pub struct VisualComparer {
    pixel_threshold: u8,
    parallel: bool,
    keep_artifacts: bool,
}

impl VisualComparer {
    /// Create a visual comparer with default settings.
    pub fn new() -> Self {
        Self::from_options(&CompareOptions::default())
    }

    /// Create a visual comparer from comparison options.
    pub fn from_options(options: &CompareOptions) -> Self {
        Self {
            pixel_threshold: options.pixel_threshold,
            parallel: options.parallel,
            keep_artifacts: options.keep_artifacts,
        }
    }

    /// Compare two page image sequences, producing one record per page
    /// index up to the longer document.
    ///
    /// A page missing on one side yields an inserted/deleted record with
    /// no metrics; it is never an error. Records come back ordered by
    /// page number.
    pub fn compare(&self, src_images: &[RgbImage], trg_images: &[RgbImage]) -> Vec<ImageDiff> {
        let max_pages = src_images.len().max(trg_images.len());

        let compare_one = |idx: usize| {
            let page = (idx + 1) as u32;
            match (src_images.get(idx), trg_images.get(idx)) {
                (None, Some(_)) => ImageDiff {
                    page,
                    kind: ImageDiffKind::PageInserted,
                    phash_distance: None,
                    changed_pixels: None,
                    artifacts: None,
                },
                (Some(_), None) => ImageDiff {
                    page,
                    kind: ImageDiffKind::PageDeleted,
                    phash_distance: None,
                    changed_pixels: None,
                    artifacts: None,
                },
                (Some(s), Some(t)) => self.compare_page(page, s, t),
                (None, None) => unreachable!(),
            }
        };

        let diffs: Vec<ImageDiff> = if self.parallel {
            (0..max_pages).into_par_iter().map(compare_one).collect()
        } else {
            (0..max_pages).map(compare_one).collect()
        };

        log::debug!(
            "visual comparison: {} pages vs {} pages, threshold {}",
            src_images.len(),
            trg_images.len(),
            self.pixel_threshold
        );
        diffs
    }

    /// Compare one aligned page pair.
    pub fn compare_page(&self, page: u32, source: &RgbImage, target: &RgbImage) -> ImageDiff {
        let phash_distance = hamming(phash(source), phash(target));

        let target = size_matched(source, target);
        let diff = intensity_diff(source, &target);
        let mask = binarize(&diff, self.pixel_threshold);
        let changed_pixels = mask.pixels().filter(|p| p.0[0] != 0).count() as u64;

        let artifacts = self.keep_artifacts.then(|| PageArtifacts {
            overlay: overlay_changes(&target, &mask),
            source: source.clone(),
            target: target.into_owned(),
            diff: mask,
        });

        ImageDiff {
            page,
            kind: ImageDiffKind::PageCompared,
            phash_distance: Some(phash_distance),
            changed_pixels: Some(changed_pixels),
            artifacts,
        }
    }
}

impl Default for VisualComparer {
    fn default() -> Self {
        Self::new()
    }
}

/// Resize `target` to `source`'s dimensions if they differ.
fn size_matched<'a>(
    source: &RgbImage,
    target: &'a RgbImage,
) -> std::borrow::Cow<'a, RgbImage> {
    if source.dimensions() == target.dimensions() {
        std::borrow::Cow::Borrowed(target)
    } else {
        log::warn!(
            "page images differ in size ({}x{} vs {}x{}), resizing target",
            source.width(),
            source.height(),
            target.width(),
            target.height()
        );
        std::borrow::Cow::Owned(imageops::resize(
            target,
            source.width(),
            source.height(),
            FilterType::Nearest,
        ))
    }
}

/// Per-channel absolute difference collapsed to single-channel intensity.
fn intensity_diff(a: &RgbImage, b: &RgbImage) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        let pa = a.get_pixel(x, y).0;
        let pb = b.get_pixel(x, y).0;
        let dr = pa[0].abs_diff(pb[0]) as u32;
        let dg = pa[1].abs_diff(pb[1]) as u32;
        let db = pa[2].abs_diff(pb[2]) as u32;
        // ITU-R BT.601 luma weights
        let luma = (299 * dr + 587 * dg + 114 * db) / 1000;
        Luma([luma as u8])
    })
}

/// Binarize an intensity image into a change mask.
fn binarize(diff: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(diff.width(), diff.height(), |x, y| {
        if diff.get_pixel(x, y).0[0] > threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Composite a semi-transparent red layer onto the target wherever the
/// change mask is set.
fn overlay_changes(target: &RgbImage, mask: &GrayImage) -> RgbaImage {
    let alpha = OVERLAY_ALPHA;
    RgbaImage::from_fn(target.width(), target.height(), |x, y| {
        let p = target.get_pixel(x, y).0;
        if mask.get_pixel(x, y).0[0] != 0 {
            let r = ((p[0] as u16 * (255 - alpha) + 255 * alpha) / 255) as u8;
            let g = ((p[1] as u16 * (255 - alpha)) / 255) as u8;
            let b = ((p[2] as u16 * (255 - alpha)) / 255) as u8;
            Rgba([r, g, b, 255])
        } else {
            Rgba([p[0], p[1], p[2], 255])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    #[test]
    fn test_identical_pages_no_change() {
        let img = solid(100, 100, [180, 180, 180]);
        let comparer = VisualComparer::new();
        let diff = comparer.compare_page(1, &img, &img.clone());

        assert_eq!(diff.kind, ImageDiffKind::PageCompared);
        assert_eq!(diff.phash_distance, Some(0));
        assert_eq!(diff.changed_pixels, Some(0));
    }

    #[test]
    fn test_changed_block_detected() {
        let src = solid(100, 100, [255, 255, 255]);
        let mut trg = src.clone();
        for y in 10..20 {
            for x in 10..20 {
                trg.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }

        let comparer = VisualComparer::new();
        let diff = comparer.compare_page(1, &src, &trg);
        assert_eq!(diff.changed_pixels, Some(100));

        // Mask region matches the changed block exactly
        let artifacts = diff.artifacts.expect("artifacts kept by default");
        assert_eq!(artifacts.diff.get_pixel(15, 15).0[0], 255);
        assert_eq!(artifacts.diff.get_pixel(50, 50).0[0], 0);
        // Overlay is reddened inside the block, untouched outside
        assert!(artifacts.overlay.get_pixel(15, 15).0[0] > 0);
        assert_eq!(artifacts.overlay.get_pixel(50, 50).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_sub_threshold_change_ignored() {
        let src = solid(50, 50, [100, 100, 100]);
        let trg = solid(50, 50, [110, 110, 110]);

        let comparer = VisualComparer::from_options(&CompareOptions::new().with_pixel_threshold(30));
        let diff = comparer.compare_page(1, &src, &trg);
        assert_eq!(diff.changed_pixels, Some(0));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let src = solid(50, 50, [100, 100, 100]);
        let trg = solid(50, 50, [110, 110, 110]);

        let comparer = VisualComparer::from_options(&CompareOptions::new().with_pixel_threshold(5));
        let diff = comparer.compare_page(1, &src, &trg);
        assert_eq!(diff.changed_pixels, Some(50 * 50));
    }

    #[test]
    fn test_size_mismatch_resizes_target() {
        let src = solid(100, 100, [0, 0, 0]);
        let trg = solid(50, 50, [0, 0, 0]);

        let comparer = VisualComparer::new();
        let diff = comparer.compare_page(1, &src, &trg);
        assert_eq!(diff.changed_pixels, Some(0));
        let artifacts = diff.artifacts.unwrap();
        assert_eq!(artifacts.target.dimensions(), (100, 100));
    }

    #[test]
    fn test_page_count_degradation() {
        let src = vec![solid(10, 10, [0, 0, 0]); 2];
        let trg = vec![solid(10, 10, [0, 0, 0]); 5];

        let comparer = VisualComparer::new();
        let diffs = comparer.compare(&src, &trg);
        assert_eq!(diffs.len(), 5);

        let inserted: Vec<_> = diffs
            .iter()
            .filter(|d| d.kind == ImageDiffKind::PageInserted)
            .collect();
        assert_eq!(inserted.len(), 3);
        assert_eq!(inserted[0].page, 3);
        assert!(inserted.iter().all(|d| d.phash_distance.is_none()));
    }

    #[test]
    fn test_records_ordered_by_page() {
        let src = vec![solid(10, 10, [0, 0, 0]); 4];
        let trg = vec![solid(10, 10, [0, 0, 0]); 4];

        let comparer = VisualComparer::new();
        let diffs = comparer.compare(&src, &trg);
        let pages: Vec<u32> = diffs.iter().map(|d| d.page).collect();
        assert_eq!(pages, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_artifacts_can_be_dropped() {
        let img = solid(10, 10, [0, 0, 0]);
        let comparer = VisualComparer::from_options(&CompareOptions::new().with_artifacts(false));
        let diff = comparer.compare_page(1, &img, &img.clone());
        assert!(diff.artifacts.is_none());
        assert_eq!(diff.changed_pixels, Some(0));
    }
}
