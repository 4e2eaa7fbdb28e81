//! Line diff via longest common subsequence.

use serde::{Deserialize, Serialize};

use crate::tools::{ToolError, lenient};

/// Upper bound on the LCS table (differing lines of each side multiplied),
/// 16 MB of `u32` cells.
pub const MAX_CELLS: usize = 4_000_000;

#[derive(Debug, Deserialize)]
pub struct DiffRequest {
    pub original: String,
    pub modified: String,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub ignore_whitespace: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub ignore_case: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Equal,
    Added,
    Removed,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: Kind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DiffResponse {
    pub identical: bool,
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub lines: Vec<DiffLine>,
    pub unified: String,
}

pub fn diff(req: DiffRequest) -> Result<DiffResponse, ToolError> {
    let old: Vec<&str> = req.original.lines().collect();
    let new: Vec<&str> = req.modified.lines().collect();

    let ignore_whitespace = req.ignore_whitespace.unwrap_or(false);
    let ignore_case = req.ignore_case.unwrap_or(false);
    let normalize = |line: &str| {
        let line = if ignore_whitespace { line.split_whitespace().collect::<Vec<_>>().join(" ") } else { line.to_owned() };
        if ignore_case { line.to_lowercase() } else { line }
    };
    let old_keys: Vec<String> = old.iter().map(|l| normalize(l)).collect();
    let new_keys: Vec<String> = new.iter().map(|l| normalize(l)).collect();

    let ops = lcs_ops(&old_keys, &new_keys)?;

    let mut lines = Vec::with_capacity(ops.len());
    let (mut i, mut j) = (0, 0);
    for kind in ops {
        let line = match kind {
            Kind::Equal => {
                i += 1;
                j += 1;
                DiffLine { kind, text: new[j - 1].to_owned(), old_line: Some(i), new_line: Some(j) }
            }
            Kind::Removed => {
                i += 1;
                DiffLine { kind, text: old[i - 1].to_owned(), old_line: Some(i), new_line: None }
            }
            Kind::Added => {
                j += 1;
                DiffLine { kind, text: new[j - 1].to_owned(), old_line: None, new_line: Some(j) }
            }
        };
        lines.push(line);
    }

    let count = |k: Kind| lines.iter().filter(|l| l.kind == k).count();
    let (added, removed, unchanged) = (count(Kind::Added), count(Kind::Removed), count(Kind::Equal));
    Ok(DiffResponse { identical: added == 0 && removed == 0, added, removed, unchanged, unified: unified(&lines), lines })
}

/// Edit script turning `old` into `new`. Removals come before additions
/// within a changed run.
pub fn lcs_ops<T: PartialEq>(old: &[T], new: &[T]) -> Result<Vec<Kind>, ToolError> {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..].iter().rev().zip(new[prefix..].iter().rev()).take_while(|(a, b)| a == b).count();
    let a = &old[prefix..old.len() - suffix];
    let b = &new[prefix..new.len() - suffix];

    let (n, m) = (a.len(), b.len());
    if n.saturating_mul(m) > MAX_CELLS {
        return Err(ToolError::invalid("modified", "texts differ in too many lines to compare"));
    }

    // table[i][j] = LCS length of a[i..] and b[j..], flattened.
    let width = m + 1;
    let mut table = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if a[i] == b[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let mut ops = vec![Kind::Equal; prefix];
    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        if i < n && j < m && a[i] == b[j] {
            ops.push(Kind::Equal);
            i += 1;
            j += 1;
        } else if i < n && (j == m || table[(i + 1) * width + j] >= table[i * width + j + 1]) {
            ops.push(Kind::Removed);
            i += 1;
        } else {
            ops.push(Kind::Added);
            j += 1;
        }
    }
    ops.extend(std::iter::repeat_n(Kind::Equal, suffix));
    Ok(ops)
}

fn unified(lines: &[DiffLine]) -> String {
    let mut out = String::from("--- original\n+++ modified");
    for line in lines {
        let marker = match line.kind {
            Kind::Equal => ' ',
            Kind::Added => '+',
            Kind::Removed => '-',
        };
        out.push('\n');
        out.push(marker);
        out.push_str(&line.text);
    }
    out
}

#[cfg(test)]
#[path = "diff_test.rs"]
mod tests;
