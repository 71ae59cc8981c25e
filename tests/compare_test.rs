//! Integration tests for the comparison engine.

use docdiff::{
    compare_extractions, CompareOptions, ExtractedTable, Extraction, ImageDiffKind, TableComparer,
    TableDiffKind, TextComparer, TextDiff, TextOp,
};
use image::{Rgb, RgbImage};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// Rebuild the target page from the source page and the diff records.
fn reconstruct(src: &[String], diffs: &[TextDiff]) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = 0usize;
    for d in diffs {
        out.extend_from_slice(&src[cursor..d.src_range.0]);
        out.extend_from_slice(&d.trg_lines);
        cursor = d.src_range.1;
    }
    out.extend_from_slice(&src[cursor..]);
    out
}

#[test]
fn test_text_round_trip_property() {
    let cases = [
        (lines(&["a", "b", "c"]), lines(&["a", "x", "c"])),
        (lines(&["a", "b", "c"]), lines(&["a", "b", "c", "d"])),
        (lines(&["a", "b", "c"]), lines(&["b"])),
        (lines(&["p", "q", "r", "s"]), lines(&["q", "x", "s", "t"])),
        (lines(&[]), lines(&["only", "target"])),
        (lines(&["only", "source"]), lines(&[])),
    ];

    let comparer = TextComparer::new();
    for (src, trg) in cases {
        let diffs = comparer.compare(&[src.clone()], &[trg.clone()]);
        assert_eq!(
            reconstruct(&src, &diffs),
            trg,
            "round-trip failed for {:?} -> {:?}",
            src,
            trg
        );
    }
}

#[test]
fn test_text_single_line_replace() {
    let comparer = TextComparer::new();
    let diffs = comparer.compare(&[lines(&["a", "b", "c"])], &[lines(&["a", "x", "c"])]);

    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].page, 1);
    assert_eq!(diffs[0].op, TextOp::Replace);
    assert_eq!(diffs[0].src_range, (1, 2));
    assert_eq!(diffs[0].trg_range, (1, 2));
    assert_eq!(diffs[0].src_lines, lines(&["b"]));
    assert_eq!(diffs[0].trg_lines, lines(&["x"]));
}

#[test]
fn test_table_multiset_mirror_property() {
    let comparer = TableComparer::new();
    let r1 = Extraction {
        tables: vec![ExtractedTable::new(
            1,
            vec![lines(&["a", "1"]), lines(&["a", "1"]), lines(&["b", "2"])],
        )],
        ..Default::default()
    };
    let r2 = Extraction {
        tables: vec![ExtractedTable::new(
            1,
            vec![lines(&["a", "1"]), lines(&["c", "3"])],
        )],
        ..Default::default()
    };

    let fwd = comparer.compare_multiset(&r1, &r2);
    let rev = comparer.compare_multiset(&r2, &r1);

    assert_eq!(fwd.missing_in_target, rev.missing_in_source);
    assert_eq!(fwd.missing_in_source, rev.missing_in_target);
    assert_eq!(fwd.equal, fwd.missing_in_target.is_empty() && fwd.missing_in_source.is_empty());
}

#[test]
fn test_table_reordering_invariance_property() {
    let comparer = TableComparer::new();
    let rows = vec![lines(&["a", "1"]), lines(&["b", "2"]), lines(&["c", "3"])];
    let base = Extraction {
        tables: vec![ExtractedTable::new(1, rows.clone())],
        ..Default::default()
    };

    // Rows split across tables and pages in a different order
    let permuted = Extraction {
        tables: vec![
            ExtractedTable::new(2, vec![rows[2].clone()]),
            ExtractedTable::new(1, vec![rows[0].clone(), rows[1].clone()]),
        ],
        ..Default::default()
    };
    let other = Extraction {
        tables: vec![ExtractedTable::new(1, vec![lines(&["a", "1"])])],
        ..Default::default()
    };

    assert!(comparer.compare_multiset(&base, &permuted).equal);
    assert_eq!(
        comparer.compare_multiset(&base, &other),
        comparer.compare_multiset(&permuted, &other)
    );
}

#[test]
fn test_aligned_table_single_cell_change() {
    let comparer = TableComparer::new();
    let src = Extraction {
        tables: vec![ExtractedTable::new(
            1,
            vec![lines(&["h1", "h2"]), lines(&["v1", "v2"])],
        )],
        ..Default::default()
    };
    let trg = Extraction {
        tables: vec![ExtractedTable::new(
            1,
            vec![lines(&["h1", "h2"]), lines(&["v1", "CHANGED"])],
        )],
        ..Default::default()
    };

    let diffs = comparer.compare_aligned(&src, &trg);
    assert_eq!(diffs.len(), 1);
    match &diffs[0].kind {
        TableDiffKind::TableModified { cells } => {
            assert_eq!(cells.len(), 1);
            assert_eq!((cells[0].row, cells[0].col), (1, 1));
            assert_eq!(cells[0].a, "v2");
            assert_eq!(cells[0].b, "CHANGED");
        }
        other => panic!("expected table_modified, got {:?}", other),
    }
}

#[test]
fn test_page_count_degradation_property() {
    // n pages vs n + k pages yields exactly k page_inserted records
    let n = 2;
    let k = 3;
    let src = Extraction {
        page_images: vec![solid(20, 20, [255, 255, 255]); n],
        ..Default::default()
    };
    let trg = Extraction {
        page_images: vec![solid(20, 20, [255, 255, 255]); n + k],
        ..Default::default()
    };

    let report = compare_extractions(&src, &trg, &CompareOptions::default());
    let inserted = report
        .image_diffs
        .iter()
        .filter(|d| d.kind == ImageDiffKind::PageInserted)
        .count();
    assert_eq!(inserted, k);
    assert_eq!(report.summary.pages_inserted, k);

    let report = compare_extractions(&trg, &src, &CompareOptions::default());
    assert_eq!(report.summary.pages_deleted, k);
}

#[test]
fn test_visual_identity_property() {
    let img = solid(100, 100, [60, 120, 200]);
    let ex = Extraction {
        page_images: vec![img],
        ..Default::default()
    };

    let report = compare_extractions(&ex, &ex.clone(), &CompareOptions::default());
    assert_eq!(report.image_diffs.len(), 1);
    assert_eq!(report.image_diffs[0].phash_distance, Some(0));
    assert_eq!(report.image_diffs[0].changed_pixels, Some(0));
    assert!(!report.has_differences());
}

#[test]
fn test_visual_changed_block_scenario() {
    let src = solid(100, 100, [255, 255, 255]);
    let mut trg = src.clone();
    for y in 40..60 {
        for x in 40..60 {
            trg.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }

    let report = compare_extractions(
        &Extraction {
            page_images: vec![src],
            ..Default::default()
        },
        &Extraction {
            page_images: vec![trg],
            ..Default::default()
        },
        &CompareOptions::default(),
    );

    let diff = &report.image_diffs[0];
    assert_eq!(diff.changed_pixels, Some(400));

    let artifacts = diff.artifacts.as_ref().expect("artifacts kept");
    assert_eq!(artifacts.diff.get_pixel(50, 50).0[0], 255);
    assert_eq!(artifacts.diff.get_pixel(10, 10).0[0], 0);
    // Overlay reddened inside the changed block
    let overlaid = artifacts.overlay.get_pixel(50, 50).0;
    assert!(overlaid[0] > overlaid[1]);
}

#[test]
fn test_sequential_and_parallel_agree() {
    let mut page2 = solid(40, 40, [200, 200, 200]);
    page2.put_pixel(5, 5, Rgb([0, 0, 0]));
    let src = Extraction {
        page_images: vec![solid(40, 40, [200, 200, 200]); 3],
        ..Default::default()
    };
    let trg = Extraction {
        page_images: vec![
            solid(40, 40, [200, 200, 200]),
            page2,
            solid(40, 40, [200, 200, 200]),
        ],
        ..Default::default()
    };

    let parallel = compare_extractions(&src, &trg, &CompareOptions::default());
    let sequential = compare_extractions(&src, &trg, &CompareOptions::default().sequential());

    let metrics = |r: &docdiff::ComparisonReport| {
        r.image_diffs
            .iter()
            .map(|d| (d.page, d.phash_distance, d.changed_pixels))
            .collect::<Vec<_>>()
    };
    assert_eq!(metrics(&parallel), metrics(&sequential));
}

#[test]
fn test_comparers_do_not_mutate_extractions() {
    let src = Extraction {
        pages_text: vec![lines(&["a", "b"])],
        tables: vec![ExtractedTable::new(1, vec![lines(&["x", "y"])])],
        page_images: vec![solid(10, 10, [1, 2, 3])],
    };
    let trg = Extraction {
        pages_text: vec![lines(&["a", "c"])],
        tables: vec![ExtractedTable::new(1, vec![lines(&["x", "z"])])],
        page_images: vec![solid(10, 10, [3, 2, 1])],
    };
    let src_before = src.clone();
    let trg_before = trg.clone();

    let first = compare_extractions(&src, &trg, &CompareOptions::default());
    let second = compare_extractions(&src, &trg, &CompareOptions::default());

    assert_eq!(src.pages_text, src_before.pages_text);
    assert_eq!(trg.pages_text, trg_before.pages_text);
    assert_eq!(first.summary, second.summary);
}
