//! Structural JSON line diff
//!
//! Produces a full, line-oriented diff of two JSON values: every line of the
//! pretty-printed structure is emitted, prefixed with `-` (only before),
//! `+` (only after) or a space (unchanged).

use serde_json::{Map, Value};

/// Source of line-oriented structural diffs
pub trait StructuralDiff {
    /// Render the full diff of two values as text, one line per token.
    ///
    /// Equal inputs must produce no `-` or `+` lines.
    fn diff(&self, before: &Value, after: &Value) -> String;
}

/// Default structural diff over `serde_json` values
pub struct JsonLineDiff;

impl Default for JsonLineDiff {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonLineDiff {
    pub fn new() -> Self {
        Self
    }

    fn diff_value(
        &self,
        key: Option<&str>,
        before: &Value,
        after: &Value,
        depth: usize,
        out: &mut Vec<String>,
    ) {
        if before == after {
            emit_value(' ', key, before, depth, out);
            return;
        }

        match (before, after) {
            (Value::Object(before), Value::Object(after)) => {
                out.push(line(' ', depth, &format!("{}{{", key_prefix(key))));
                self.diff_members(before, after, depth + 1, out);
                out.push(line(' ', depth, "}"));
            }
            (Value::Array(before), Value::Array(after)) => {
                out.push(line(' ', depth, &format!("{}[", key_prefix(key))));
                self.diff_elements(before, after, depth + 1, out);
                out.push(line(' ', depth, "]"));
            }
            _ => {
                emit_value('-', key, before, depth, out);
                emit_value('+', key, after, depth, out);
            }
        }
    }

    fn diff_members(
        &self,
        before: &Map<String, Value>,
        after: &Map<String, Value>,
        depth: usize,
        out: &mut Vec<String>,
    ) {
        for (key, before_value) in before {
            match after.get(key) {
                Some(after_value) => self.diff_value(Some(key.as_str()), before_value, after_value, depth, out),
                None => emit_value('-', Some(key.as_str()), before_value, depth, out),
            }
        }

        for (key, after_value) in after {
            if !before.contains_key(key) {
                emit_value('+', Some(key.as_str()), after_value, depth, out);
            }
        }
    }

    fn diff_elements(&self, before: &[Value], after: &[Value], depth: usize, out: &mut Vec<String>) {
        let mut removed: Vec<&Value> = Vec::new();
        let mut added: Vec<&Value> = Vec::new();

        for op in align(before, after) {
            match op {
                ElementOp::Keep(value) => {
                    self.flush_gap(&mut removed, &mut added, depth, out);
                    emit_value(' ', None, value, depth, out);
                }
                ElementOp::Remove(value) => removed.push(value),
                ElementOp::Add(value) => added.push(value),
            }
        }

        self.flush_gap(&mut removed, &mut added, depth, out);
    }

    /// Emit a run of unmatched elements.
    ///
    /// Equal-length gaps of same-kind containers are diffed element by
    /// element; any other gap is all removals followed by all additions.
    fn flush_gap(
        &self,
        removed: &mut Vec<&Value>,
        added: &mut Vec<&Value>,
        depth: usize,
        out: &mut Vec<String>,
    ) {
        let pairwise = removed.len() == added.len()
            && removed
                .iter()
                .zip(added.iter())
                .all(|(before, after)| same_container_kind(before, after));

        if pairwise {
            for (before, after) in removed.iter().zip(added.iter()) {
                self.diff_value(None, before, after, depth, out);
            }
        } else {
            for value in removed.iter() {
                emit_value('-', None, value, depth, out);
            }
            for value in added.iter() {
                emit_value('+', None, value, depth, out);
            }
        }

        removed.clear();
        added.clear();
    }
}

impl StructuralDiff for JsonLineDiff {
    fn diff(&self, before: &Value, after: &Value) -> String {
        let mut out = Vec::new();
        self.diff_value(None, before, after, 0, &mut out);
        out.join("\n")
    }
}

enum ElementOp<'a> {
    Keep(&'a Value),
    Remove(&'a Value),
    Add(&'a Value),
}

/// Align two arrays by longest common subsequence on element equality
fn align<'a>(before: &'a [Value], after: &'a [Value]) -> Vec<ElementOp<'a>> {
    let n = before.len();
    let m = after.len();

    // lcs[i][j] = LCS length of before[i..] and after[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if before[i] == after[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if before[i] == after[j] {
            ops.push(ElementOp::Keep(&before[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(ElementOp::Remove(&before[i]));
            i += 1;
        } else {
            ops.push(ElementOp::Add(&after[j]));
            j += 1;
        }
    }
    ops.extend(before[i..].iter().map(ElementOp::Remove));
    ops.extend(after[j..].iter().map(ElementOp::Add));

    ops
}

fn same_container_kind(before: &Value, after: &Value) -> bool {
    matches!(
        (before, after),
        (Value::Object(_), Value::Object(_)) | (Value::Array(_), Value::Array(_))
    )
}

/// Emit a whole value with a single marker
fn emit_value(marker: char, key: Option<&str>, value: &Value, depth: usize, out: &mut Vec<String>) {
    let prefix = key_prefix(key);

    match value {
        Value::Object(map) if !map.is_empty() => {
            out.push(line(marker, depth, &format!("{}{{", prefix)));
            for (member_key, member) in map {
                emit_value(marker, Some(member_key.as_str()), member, depth + 1, out);
            }
            out.push(line(marker, depth, "}"));
        }
        Value::Array(items) if !items.is_empty() => {
            out.push(line(marker, depth, &format!("{}[", prefix)));
            for item in items {
                emit_value(marker, None, item, depth + 1, out);
            }
            out.push(line(marker, depth, "]"));
        }
        // Scalars and empty containers fit on one line
        scalar => out.push(line(marker, depth, &format!("{}{}", prefix, scalar))),
    }
}

fn key_prefix(key: Option<&str>) -> String {
    match key {
        Some(key) => format!("{}: ", Value::String(key.to_string())),
        None => String::new(),
    }
}

fn line(marker: char, depth: usize, content: &str) -> String {
    format!("{}{}{}", marker, "  ".repeat(depth), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn diff_lines(before: Value, after: Value) -> Vec<String> {
        JsonLineDiff::new()
            .diff(&before, &after)
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_equal_values_have_no_changes() {
        let value = json!({"a": [1, {"b": null}], "c": "x", "d": {}});
        let lines = diff_lines(value.clone(), value);

        assert!(lines.iter().all(|l| l.starts_with(' ')));
        assert_eq!(lines[0], " {");
        assert_eq!(lines[1], "   \"a\": [");
        assert!(lines.contains(&"   \"d\": {}".to_string()));
    }

    #[test]
    fn test_changed_member() {
        assert_eq!(
            diff_lines(json!({"a": 1}), json!({"a": 2})),
            vec![" {", "-  \"a\": 1", "+  \"a\": 2", " }"]
        );
    }

    #[test]
    fn test_added_and_removed_members() {
        assert_eq!(
            diff_lines(json!({"keep": true, "old": 1}), json!({"keep": true, "new": 2})),
            vec![
                " {",
                "   \"keep\": true",
                "-  \"old\": 1",
                "+  \"new\": 2",
                " }"
            ]
        );
    }

    #[test]
    fn test_array_alignment() {
        assert_eq!(
            diff_lines(json!(["a", "b", "c"]), json!(["a", "x", "c", "d"])),
            vec![
                " [",
                "   \"a\"",
                "-  \"b\"",
                "+  \"x\"",
                "   \"c\"",
                "+  \"d\"",
                " ]"
            ]
        );
    }

    #[test]
    fn test_array_of_objects_recurses() {
        assert_eq!(
            diff_lines(
                json!([{"port": 80, "proto": "tcp"}]),
                json!([{"port": 443, "proto": "tcp"}])
            ),
            vec![
                " [",
                "   {",
                "-    \"port\": 80",
                "+    \"port\": 443",
                "     \"proto\": \"tcp\"",
                "   }",
                " ]"
            ]
        );
    }

    #[test]
    fn test_type_change_replaces_whole_value() {
        assert_eq!(
            diff_lines(json!({"v": [1]}), json!({"v": "one"})),
            vec![" {", "-  \"v\": [", "-    1", "-  ]", "+  \"v\": \"one\"", " }"]
        );
    }

    #[test]
    fn test_scalar_top_level() {
        assert_eq!(diff_lines(json!(1), json!("1")), vec!["-1", "+\"1\""]);
    }
}
