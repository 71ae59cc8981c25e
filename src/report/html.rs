//! HTML report rendering.
//!
//! Produces a single self-contained page: summary counts, text diff
//! blocks, table diff blocks, and per-page image panels referencing the
//! persisted assets. No templating engine; the document is small enough
//! to build directly.

use crate::model::{ImageDiffKind, TableDiffKind};
use crate::report::{ImagePageView, ReportView};

/// Render a report view to a complete HTML document.
pub fn to_html(view: &ReportView) -> String {
    let mut r = HtmlRenderer::new();
    r.header();
    r.summary(view);
    r.text_section(view);
    r.table_section(view);
    r.image_section(view);
    r.footer();
    r.finish()
}

struct HtmlRenderer {
    out: String,
}

impl HtmlRenderer {
    fn new() -> Self {
        Self {
            out: String::with_capacity(8 * 1024),
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn header(&mut self) {
        self.push(
            "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n\
             <title>Document Compare Report</title>\n<style>\n\
             body { font-family: Arial, sans-serif; margin: 24px; }\n\
             h1,h2 { color: #003366; }\n\
             .summary { border: 1px solid #ddd; padding: 12px; background:#f7f9fb }\n\
             .diff-block { border: 1px solid #eee; padding: 12px; margin: 12px 0; }\n\
             pre { background:#fff; padding: 8px; overflow:auto }\n\
             .images { display:flex; gap:12px; flex-wrap:wrap; align-items:flex-start; }\n\
             .image-item { width:300px; border:1px solid #ddd; padding:8px; background:#fff }\n\
             table { border-collapse: collapse; }\n\
             td, th { border: 1px solid #ddd; padding: 6px; }\n\
             </style>\n</head>\n<body>\n<h1>Document Compare Report</h1>\n",
        );
    }

    fn footer(&mut self) {
        self.push("</body>\n</html>\n");
    }

    fn summary(&mut self, view: &ReportView) {
        let s = &view.summary;
        self.push("<div class=\"summary\">\n");
        self.push(&format!(
            "<b>Source pages:</b> {} &nbsp; <b>Target pages:</b> {} &nbsp; \
             <b>Text diffs:</b> {} &nbsp; <b>Table diffs:</b> {} &nbsp; \
             <b>Image diffs:</b> {} &nbsp; <b>Tables equal:</b> {}\n",
            s.pages_source, s.pages_target, s.text_diffs, s.table_diffs, s.image_diffs,
            s.tables_equal
        ));
        self.push("</div>\n");
    }

    fn text_section(&mut self, view: &ReportView) {
        self.push("<h2>Text differences</h2>\n");
        if view.text_diffs.is_empty() {
            self.push("<p>No text differences found.</p>\n");
            return;
        }
        for d in &view.text_diffs {
            self.push("<div class=\"diff-block\">\n");
            self.push(&format!(
                "<b>Page {} - {}</b><br/>\n<table>\n<tr><th>Source lines ({}:{})</th>\
                 <th>Target lines ({}:{})</th></tr>\n<tr><td><pre>{}</pre></td>\
                 <td><pre>{}</pre></td></tr>\n</table>\n",
                d.page,
                d.op.as_str(),
                d.src_range.0,
                d.src_range.1,
                d.trg_range.0,
                d.trg_range.1,
                escape(&d.src_lines.join("\n")),
                escape(&d.trg_lines.join("\n")),
            ));
            self.push("</div>\n");
        }
    }

    fn table_section(&mut self, view: &ReportView) {
        self.push("<h2>Table differences</h2>\n");
        if view.table_diffs.is_empty() {
            self.push("<p>No table differences found.</p>\n");
            return;
        }
        for t in &view.table_diffs {
            self.push("<div class=\"diff-block\">\n");
            let page = t
                .page
                .map(|p| format!("Page {}", p))
                .unwrap_or_else(|| "Document".to_string());
            self.push(&format!("<b>{} - {}</b><br/>\n", page, t.kind.as_str()));
            match &t.kind {
                TableDiffKind::TableModified { cells } => {
                    self.push(&format!("<b>Cells changed:</b> {}<br/>\n", cells.len()));
                    self.push("<table>\n<tr><th>row</th><th>col</th><th>src</th><th>trg</th></tr>\n");
                    for c in cells {
                        self.push(&format!(
                            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                            c.row,
                            c.col,
                            escape(&c.a),
                            escape(&c.b)
                        ));
                    }
                    self.push("</table>\n");
                }
                TableDiffKind::RowMissingInTarget { row, count }
                | TableDiffKind::RowMissingInSource { row, count } => {
                    self.push(&format!(
                        "<pre>{} (x{})</pre>\n",
                        escape(&row.join(" | ")),
                        count
                    ));
                }
                TableDiffKind::TableAdded | TableDiffKind::TableDeleted => {}
            }
            self.push("</div>\n");
        }
    }

    fn image_section(&mut self, view: &ReportView) {
        self.push("<h2>Page visual differences</h2>\n");
        if view.image_pages.is_empty() {
            self.push("<p>No page images were compared.</p>\n");
            return;
        }
        for page in &view.image_pages {
            self.image_panel(page);
        }
    }

    fn image_panel(&mut self, page: &ImagePageView) {
        self.push("<div class=\"diff-block\">\n");
        self.push(&format!("<b>Page {}</b>\n", page.page));
        match page.kind {
            ImageDiffKind::PageInserted => {
                self.push("<p>Page exists only in the target document.</p>\n");
            }
            ImageDiffKind::PageDeleted => {
                self.push("<p>Page exists only in the source document.</p>\n");
            }
            ImageDiffKind::PageCompared => {
                if let Some(assets) = &page.assets {
                    self.push("<div class=\"images\">\n");
                    for (label, file) in [
                        ("Source", &assets.source),
                        ("Target", &assets.target),
                        ("Change mask", &assets.diff),
                        ("Overlay (differences highlighted)", &assets.overlay),
                    ] {
                        self.push(&format!(
                            "<div class=\"image-item\"><div><b>{}</b></div>\
                             <img src=\"./assets/{}\" style=\"width:100%;\"/></div>\n",
                            label, file
                        ));
                    }
                    self.push("</div>\n");
                }
                self.push(&format!(
                    "<div><b>phash distance:</b> {} &nbsp; <b>changed pixels:</b> {}</div>\n",
                    page.phash_distance.unwrap_or(0),
                    page.changed_pixels.unwrap_or(0)
                ));
                if page.ocr_source.is_some() || page.ocr_target.is_some() {
                    self.push("<details><summary>OCR text from page images</summary>\n");
                    if let Some(text) = &page.ocr_source {
                        self.push(&format!("<h4>Source OCR</h4><pre>{}</pre>\n", escape(text)));
                    }
                    if let Some(text) = &page.ocr_target {
                        self.push(&format!("<h4>Target OCR</h4><pre>{}</pre>\n", escape(text)));
                    }
                    self.push("</details>\n");
                }
            }
        }
        self.push("</div>\n");
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
