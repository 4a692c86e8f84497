//! Diff row building
//!
//! Turns the text of a full structural diff into side-by-side display rows.
//! Runs of removed and added lines between two context lines are paired
//! index for index: row `i` of the removals sits next to row `i` of the
//! additions regardless of how similar the two lines are. No similarity
//! alignment is attempted, so a removal is never moved past another one.

use super::types::{DiffLine, DisplayRow, LineKind};

/// Parse raw diff text into lines
pub fn parse_lines(diff_text: &str) -> Vec<DiffLine> {
    diff_text.lines().map(DiffLine::parse).collect()
}

/// Build display rows from raw diff text (parse, repair, pair)
pub fn build_rows(diff_text: &str) -> Vec<DisplayRow> {
    pair_lines(&repair_brackets(parse_lines(diff_text)))
}

/// Repair bracket artifacts of single-element array diffs.
///
/// Applied until nothing changes, so repairing twice equals repairing once.
pub fn repair_brackets(mut lines: Vec<DiffLine>) -> Vec<DiffLine> {
    loop {
        let (merged, merge_changed) = merge_empty_arrays(lines);
        let (hoisted, hoist_changed) = hoist_shared_brackets(merged);
        lines = hoisted;

        if !merge_changed && !hoist_changed {
            return lines;
        }
    }
}

/// Merge an array opener directly followed by a lone `]` of the same kind
/// into a single `[]` line
fn merge_empty_arrays(lines: Vec<DiffLine>) -> (Vec<DiffLine>, bool) {
    let mut result: Vec<DiffLine> = Vec::with_capacity(lines.len());
    let mut changed = false;

    for line in lines {
        if line.closes_array() {
            if let Some(previous) = result.last_mut() {
                if previous.kind == line.kind && previous.opens_array() {
                    previous.text = format!("{}]", previous.text.trim_end());
                    changed = true;
                    continue;
                }
            }
        }
        result.push(line);
    }

    (result, changed)
}

/// Turn array brackets shared by both sides of a change run into context.
///
/// A run that removes `[ a ]` and adds `[ b ]` under the same opener becomes
/// context `[`, removed `a`, added `b`, context `]`.
fn hoist_shared_brackets(lines: Vec<DiffLine>) -> (Vec<DiffLine>, bool) {
    let mut result = Vec::with_capacity(lines.len());
    let mut run: Vec<DiffLine> = Vec::new();
    let mut changed = false;

    for line in lines {
        if line.kind == LineKind::Context {
            changed |= hoist_run(&mut run, &mut result);
            result.push(line);
        } else {
            run.push(line);
        }
    }
    changed |= hoist_run(&mut run, &mut result);

    (result, changed)
}

fn hoist_run(run: &mut Vec<DiffLine>, out: &mut Vec<DiffLine>) -> bool {
    let removed: Vec<&DiffLine> = run
        .iter()
        .filter(|line| line.kind == LineKind::Removed)
        .collect();
    let added: Vec<&DiffLine> = run
        .iter()
        .filter(|line| line.kind == LineKind::Added)
        .collect();

    let hoisted = match (removed.as_slice(), added.as_slice()) {
        ([removed_open, removed_inner @ .., removed_close], [added_open, added_inner @ .., added_close])
            if removed_open.opens_array()
                && removed_open.text == added_open.text
                && removed_close.closes_array()
                && removed_close.text == added_close.text =>
        {
            let mut lines = Vec::with_capacity(run.len());
            lines.push(DiffLine::context(&removed_open.text));
            lines.extend(removed_inner.iter().map(|line| (*line).clone()));
            lines.extend(added_inner.iter().map(|line| (*line).clone()));
            lines.push(DiffLine::context(&removed_close.text));
            Some(lines)
        }
        _ => None,
    };

    match hoisted {
        Some(lines) => {
            run.clear();
            out.extend(lines);
            true
        }
        None => {
            out.append(run);
            false
        }
    }
}

/// Pair removal and addition runs into display rows.
///
/// Each context line flushes the buffered run, then is emitted as a
/// context row. A trailing run is flushed at the end of input.
pub fn pair_lines(lines: &[DiffLine]) -> Vec<DisplayRow> {
    let mut rows = Vec::new();
    let mut removal_buffer: Vec<&str> = Vec::new();
    let mut addition_buffer: Vec<&str> = Vec::new();

    for line in lines {
        match line.kind {
            LineKind::Removed => removal_buffer.push(&line.text),
            LineKind::Added => addition_buffer.push(&line.text),
            LineKind::Context => {
                flush(&mut removal_buffer, &mut addition_buffer, &mut rows);
                rows.push(DisplayRow::Context(line.text.clone()));
            }
        }
    }

    flush(&mut removal_buffer, &mut addition_buffer, &mut rows);

    rows
}

fn flush(removals: &mut Vec<&str>, additions: &mut Vec<&str>, rows: &mut Vec<DisplayRow>) {
    let total = removals.len().max(additions.len());

    for i in 0..total {
        rows.push(DisplayRow::paired(
            removals.get(i).copied(),
            additions.get(i).copied(),
        ));
    }

    removals.clear();
    additions.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<DiffLine> {
        raw.iter().map(|l| DiffLine::parse(l)).collect()
    }

    fn count_sides(rows: &[DisplayRow]) -> (usize, usize) {
        rows.iter().fold((0, 0), |(b, a), row| match row {
            DisplayRow::Paired { before, after } => {
                (b + before.is_some() as usize, a + after.is_some() as usize)
            }
            _ => (b, a),
        })
    }

    #[test]
    fn test_single_member_change() {
        let rows = build_rows(" {\n-  \"a\": 1\n+  \"a\": 2\n }");

        assert_eq!(
            rows,
            vec![
                DisplayRow::Context("{".to_string()),
                DisplayRow::paired(Some("  \"a\": 1"), Some("  \"a\": 2")),
                DisplayRow::Context("}".to_string()),
            ]
        );
    }

    #[test]
    fn test_unequal_runs_are_padded() {
        let rows = build_rows(" {\n-  \"a\": 1\n-  \"b\": 2\n-  \"c\": 3\n+  \"d\": 4\n }");

        assert_eq!(
            rows,
            vec![
                DisplayRow::Context("{".to_string()),
                DisplayRow::paired(Some("  \"a\": 1"), Some("  \"d\": 4")),
                DisplayRow::paired(Some("  \"b\": 2"), None),
                DisplayRow::paired(Some("  \"c\": 3"), None),
                DisplayRow::Context("}".to_string()),
            ]
        );
    }

    #[test]
    fn test_addition_only_run() {
        let rows = build_rows(" {\n   \"a\": 1\n+  \"b\": 2\n }");

        assert_eq!(rows[2], DisplayRow::paired(None, Some("  \"b\": 2")));
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_pairing_is_index_for_index() {
        // The matching line "x" is not realigned
        let rows = build_rows("-x\n-y\n+y\n+x");

        assert_eq!(
            rows,
            vec![
                DisplayRow::paired(Some("x"), Some("y")),
                DisplayRow::paired(Some("y"), Some("x")),
            ]
        );
    }

    #[test]
    fn test_flush_on_end() {
        let rows = build_rows(" [\n   1\n-  2\n+  3\n+  4");

        assert_eq!(
            rows,
            vec![
                DisplayRow::Context("[".to_string()),
                DisplayRow::Context("  1".to_string()),
                DisplayRow::paired(Some("  2"), Some("  3")),
                DisplayRow::paired(None, Some("  4")),
            ]
        );
    }

    #[test]
    fn test_buffers_do_not_cross_context() {
        let rows = build_rows("-a\n c\n+b");

        assert_eq!(
            rows,
            vec![
                DisplayRow::paired(Some("a"), None),
                DisplayRow::Context("c".to_string()),
                DisplayRow::paired(None, Some("b")),
            ]
        );
    }

    #[test]
    fn test_single_element_array_artifact() {
        let rows = build_rows("-[\n-1\n-]\n+[\n+2\n+]");

        assert_eq!(
            rows,
            vec![
                DisplayRow::Context("[".to_string()),
                DisplayRow::paired(Some("1"), Some("2")),
                DisplayRow::Context("]".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_array_artifact_keeps_key() {
        let rows = build_rows(
            " {\n-  \"ports\": [\n-    80\n-  ]\n+  \"ports\": [\n+    443\n+  ]\n }",
        );

        assert_eq!(
            rows,
            vec![
                DisplayRow::Context("{".to_string()),
                DisplayRow::Context("  \"ports\": [".to_string()),
                DisplayRow::paired(Some("    80"), Some("    443")),
                DisplayRow::Context("  ]".to_string()),
                DisplayRow::Context("}".to_string()),
            ]
        );
    }

    #[test]
    fn test_different_openers_are_not_hoisted() {
        let rows = build_rows("-  \"a\": [\n-    1\n-  ]\n+  \"b\": [\n+    1\n+  ]");

        assert_eq!(count_sides(&rows), (3, 3));
        assert!(rows.iter().all(|r| matches!(r, DisplayRow::Paired { .. })));
    }

    #[test]
    fn test_split_empty_array_is_merged() {
        let repaired = repair_brackets(lines(&["-  \"tags\": [", "-  ]", "+  \"tags\": [\"a\"]"]));

        assert_eq!(
            repaired,
            vec![
                DiffLine::removed("  \"tags\": []"),
                DiffLine::added("  \"tags\": [\"a\"]"),
            ]
        );
    }

    #[test]
    fn test_merge_requires_same_kind() {
        let input = lines(&["-[", "+]"]);
        assert_eq!(repair_brackets(input.clone()), input);
    }

    #[test]
    fn test_merge_then_hoist() {
        // After merging the inner empty array the outer brackets are shared
        let repaired = repair_brackets(lines(&["-[", "-  [", "-  ]", "-]", "+[", "+  1", "+]"]));

        assert_eq!(
            repaired,
            vec![
                DiffLine::context("["),
                DiffLine::removed("  []"),
                DiffLine::added("  1"),
                DiffLine::context("]"),
            ]
        );
    }

    #[test]
    fn test_repair_is_idempotent() {
        let inputs: Vec<Vec<DiffLine>> = vec![
            lines(&["-[", "-1", "-]", "+[", "+2", "+]"]),
            lines(&[" {", "-  \"a\": [", "-  ]", "+  \"a\": [", "+    1", "+  ]", " }"]),
            lines(&["-[", "-  [", "-  ]", "-]", "+[", "+  1", "+]"]),
            lines(&[" [", "   [", "   ]", " ]"]),
            lines(&["-x", "+y", " z"]),
        ];

        for input in inputs {
            let once = repair_brackets(input);
            let twice = repair_brackets(once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_pairing_conserves_change_lines() {
        let texts = [
            " {\n-  \"a\": 1\n-  \"b\": 2\n+  \"c\": 3\n   \"d\": 4\n+  \"e\": 5\n }",
            "-a\n-b\n-c",
            "+a\n+b",
            "-[\n-1\n-]\n+[\n+2\n+]",
            "garbage without markers\n-x\n+y\n+z",
        ];

        for text in texts {
            let repaired = repair_brackets(parse_lines(text));
            let removed = repaired.iter().filter(|l| l.kind == LineKind::Removed).count();
            let added = repaired.iter().filter(|l| l.kind == LineKind::Added).count();

            let rows = pair_lines(&repaired);
            assert_eq!(count_sides(&rows), (removed, added), "for input {:?}", text);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(build_rows("").is_empty());
    }
}
