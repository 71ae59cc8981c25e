//! Integration tests for report output and asset persistence.

use std::path::Path;

use docdiff::{
    compare_extractions, write_report, CompareOptions, ExtractedTable, Extraction, JsonFormat,
    OcrEngine, ReportOptions, Result,
};
use image::{Rgb, RgbImage};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sample_extraction(line: &str, color: [u8; 3]) -> Extraction {
    Extraction {
        pages_text: vec![lines(&["header", line])],
        tables: vec![ExtractedTable::new(1, vec![lines(&["k", "v"])])],
        page_images: vec![RgbImage::from_pixel(50, 50, Rgb(color))],
    }
}

struct MockOcr;

impl OcrEngine for MockOcr {
    fn recognize(&self, image: &RgbImage) -> Result<String> {
        Ok(format!("ocr {}x{}", image.width(), image.height()))
    }
}

struct FailingOcr;

impl OcrEngine for FailingOcr {
    fn recognize(&self, _image: &RgbImage) -> Result<String> {
        Err(docdiff::Error::Ocr("engine unavailable".into()))
    }
}

#[test]
fn test_write_report_produces_all_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let src = sample_extraction("same", [255, 255, 255]);
    let trg = sample_extraction("changed", [0, 0, 0]);

    let report = compare_extractions(&src, &trg, &CompareOptions::default());
    let paths = write_report(&report, dir.path(), &ReportOptions::default(), None).unwrap();

    let json_path = paths.json.expect("json written");
    let html_path = paths.html.expect("html written");
    let assets_dir = paths.assets_dir.expect("assets written");

    let json = std::fs::read_to_string(&json_path).unwrap();
    assert!(json.contains("\"summary\""));
    assert!(json.contains("\"text_diffs\""));
    assert!(json.contains("changed"));

    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("p1_overlay.png"));
    assert!(html.contains("Comparison") || html.contains("Compare Report"));

    for name in ["p1_src.png", "p1_trg.png", "p1_diff.png", "p1_overlay.png"] {
        assert!(assets_dir.join(name).exists(), "missing asset {}", name);
    }
}

#[test]
fn test_written_assets_decode_back() {
    let dir = tempfile::tempdir().unwrap();
    let src = sample_extraction("a", [200, 200, 200]);
    let trg = sample_extraction("a", [200, 200, 200]);

    let report = compare_extractions(&src, &trg, &CompareOptions::default());
    let paths = write_report(&report, dir.path(), &ReportOptions::default(), None).unwrap();

    let assets_dir = paths.assets_dir.unwrap();
    let overlay = image::open(assets_dir.join("p1_overlay.png")).unwrap();
    assert_eq!(overlay.width(), 50);
    assert_eq!(overlay.height(), 50);
}

#[test]
fn test_report_without_assets() {
    let dir = tempfile::tempdir().unwrap();
    let src = sample_extraction("a", [255, 255, 255]);
    let trg = sample_extraction("b", [255, 255, 255]);

    let report = compare_extractions(&src, &trg, &CompareOptions::default());
    let options = ReportOptions::new()
        .with_assets(false)
        .with_html(false)
        .with_json_format(JsonFormat::Compact);
    let paths = write_report(&report, dir.path(), &options, None).unwrap();

    assert!(paths.json.is_some());
    assert!(paths.html.is_none());
    assert!(paths.assets_dir.is_none());
    assert!(!dir.path().join("report.html").exists());
}

#[test]
fn test_report_embeds_ocr_text() {
    let dir = tempfile::tempdir().unwrap();
    let src = sample_extraction("a", [255, 255, 255]);
    let trg = sample_extraction("a", [255, 255, 255]);

    let report = compare_extractions(&src, &trg, &CompareOptions::default());
    let paths = write_report(&report, dir.path(), &ReportOptions::default(), Some(&MockOcr)).unwrap();

    let json = std::fs::read_to_string(paths.json.unwrap()).unwrap();
    assert!(json.contains("ocr 50x50"));
}

#[test]
fn test_ocr_failure_degrades_without_aborting() {
    let dir = tempfile::tempdir().unwrap();
    let src = sample_extraction("a", [255, 255, 255]);
    let trg = sample_extraction("a", [255, 255, 255]);

    let report = compare_extractions(&src, &trg, &CompareOptions::default());
    let paths =
        write_report(&report, dir.path(), &ReportOptions::default(), Some(&FailingOcr)).unwrap();

    let json = std::fs::read_to_string(paths.json.unwrap()).unwrap();
    assert!(json.contains("\"ocr_source\": null") || json.contains("\"ocr_source\":null"));
}

#[test]
fn test_report_into_nested_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("deep").join("nested");
    let src = sample_extraction("a", [255, 255, 255]);

    let report = compare_extractions(&src, &src.clone(), &CompareOptions::default());
    write_report(&report, &out, &ReportOptions::default(), None).unwrap();
    assert!(Path::new(&out).join("report.json").exists());
}
