//! Page/line text comparison.
//!
//! Documents are compared page by page; each page pair is aligned with a
//! longest-common-subsequence opcode sequence over its line lists, the
//! same opcode vocabulary as classic sequence matchers: `equal`,
//! `replace`, `insert`, `delete`.

use crate::model::{TextDiff, TextOp};

/// Finds textual differences between two documents at page/line
/// granularity, preserving order.
///
/// Line content must already be whitespace-normalized by the extraction
/// layer; this comparer aligns lines, it does not clean them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextComparer;

impl TextComparer {
    /// Create a new text comparer.
    pub fn new() -> Self {
        Self
    }

    /// Compare two per-page line lists, producing one record per
    /// non-equal opcode.
    ///
    /// Pages are paired by index up to the longer document; a page index
    /// past one side's length is treated as an empty page, so a missing
    /// page degrades into plain insert/delete line diffs.
    pub fn compare(&self, src_pages: &[Vec<String>], trg_pages: &[Vec<String>]) -> Vec<TextDiff> {
        let max_pages = src_pages.len().max(trg_pages.len());
        let mut diffs = Vec::new();

        for page_idx in 0..max_pages {
            let src_lines = src_pages.get(page_idx).map(|v| v.as_slice()).unwrap_or(&[]);
            let trg_lines = trg_pages.get(page_idx).map(|v| v.as_slice()).unwrap_or(&[]);

            for op in align_lines(src_lines, trg_lines) {
                let text_op = match op.tag {
                    OpTag::Equal => continue,
                    OpTag::Replace => TextOp::Replace,
                    OpTag::Insert => TextOp::Insert,
                    OpTag::Delete => TextOp::Delete,
                };
                diffs.push(TextDiff {
                    page: (page_idx + 1) as u32,
                    op: text_op,
                    src_range: op.src,
                    trg_range: op.trg,
                    src_lines: src_lines[op.src.0..op.src.1].to_vec(),
                    trg_lines: trg_lines[op.trg.0..op.trg.1].to_vec(),
                });
            }
        }

        log::debug!(
            "text comparison: {} pages vs {} pages, {} diffs",
            src_pages.len(),
            trg_pages.len(),
            diffs.len()
        );
        diffs
    }
}

/// One alignment operation over two line lists, with half-open index
/// ranges into each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// Operation tag
    pub tag: OpTag,
    /// Half-open range into the source list
    pub src: (usize, usize),
    /// Half-open range into the target list
    pub trg: (usize, usize),
}

/// Alignment operation tags, including `equal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    /// Ranges hold identical lines
    Equal,
    /// Source range replaced by target range
    Replace,
    /// Target range inserted
    Insert,
    /// Source range deleted
    Delete,
}

/// Align two line lists into an opcode sequence.
///
/// The opcodes partition both lists exactly: every index on each side
/// appears in exactly one opcode, in order. Applying the opcodes to `a`
/// reconstructs `b`.
pub fn align_lines(a: &[String], b: &[String]) -> Vec<Opcode> {
    let matches = lcs_pairs(a, b);
    let mut ops = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    let mut k = 0usize;

    while k < matches.len() {
        let (mi, mj) = matches[k];
        push_gap(&mut ops, i, mi, j, mj);

        // Extend the equal run over consecutive match pairs
        let mut end = k + 1;
        while end < matches.len()
            && matches[end] == (matches[end - 1].0 + 1, matches[end - 1].1 + 1)
        {
            end += 1;
        }
        let run = end - k;
        ops.push(Opcode {
            tag: OpTag::Equal,
            src: (mi, mi + run),
            trg: (mj, mj + run),
        });
        i = mi + run;
        j = mj + run;
        k = end;
    }

    push_gap(&mut ops, i, a.len(), j, b.len());
    ops
}

fn push_gap(ops: &mut Vec<Opcode>, i: usize, mi: usize, j: usize, mj: usize) {
    let tag = if i < mi && j < mj {
        OpTag::Replace
    } else if i < mi {
        OpTag::Delete
    } else if j < mj {
        OpTag::Insert
    } else {
        return;
    };
    ops.push(Opcode {
        tag,
        src: (i, mi),
        trg: (j, mj),
    });
}

/// Matched index pairs of a longest common subsequence, in increasing
/// order on both sides.
fn lcs_pairs(a: &[String], b: &[String]) -> Vec<(usize, usize)> {
    let n = a.len();
    let m = b.len();
    if n == 0 || m == 0 {
        return Vec::new();
    }

    // dp[i][j] = LCS length of a[i..] and b[j..]
    let idx = |i: usize, j: usize| i * (m + 1) + j;
    let mut dp = vec![0u32; (n + 1) * (m + 1)];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[idx(i, j)] = if a[i] == b[j] {
                dp[idx(i + 1, j + 1)] + 1
            } else {
                dp[idx(i + 1, j)].max(dp[idx(i, j + 1)])
            };
        }
    }

    let mut pairs = Vec::with_capacity(dp[0] as usize);
    let (mut i, mut j) = (0usize, 0usize);
    while i < n && j < m {
        if a[i] == b[j] {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if dp[idx(i + 1, j)] >= dp[idx(i, j + 1)] {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}
