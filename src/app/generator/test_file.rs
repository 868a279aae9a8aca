//! Splicing generated tests into the test file.

use crate::domain::GeneratedTest;

const IMPORT_PREFIXES: &[&str] =
    &["import ", "from ", "use ", "#include", "require ", "require(", "using "];

/// Return `original` with the test's missing imports and its code added.
///
/// Imports already present at the top level (ignoring surrounding whitespace)
/// are skipped. New imports go after the last existing import statement, or
/// at the top of the file when there is none. The test body is appended after
/// a blank line.
pub fn insert_test(original: &str, test: &GeneratedTest) -> String {
    let mut lines: Vec<&str> = original.lines().collect();
    let existing: Vec<&str> =
        lines.iter().filter(|line| is_import(line)).map(|line| line.trim()).collect();

    let mut new_imports: Vec<&str> = Vec::new();
    for import in test.new_imports_code.lines().map(str::trim_end) {
        let trimmed = import.trim();
        if trimmed.is_empty() || existing.contains(&trimmed) || new_imports.contains(&import) {
            continue;
        }
        new_imports.push(import);
    }

    let insert_at = end_of_imports(&lines).map(|index| index + 1).unwrap_or(0);
    let tail = lines.split_off(insert_at);
    lines.extend(new_imports);
    lines.extend(tail);

    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    let mut updated = lines.join("\n");
    let body = test.test_code.trim_end();
    if !body.trim().is_empty() {
        if !updated.is_empty() {
            updated.push_str("\n\n");
        }
        updated.push_str(body);
    }
    updated.push('\n');
    updated
}

/// Index of the line that ends the last top-level import statement.
///
/// A statement continues while brackets opened on its first line are unclosed
/// (`from x import (`, `use a::{`, `import {`) or a line ends with a backslash.
fn end_of_imports(lines: &[&str]) -> Option<usize> {
    let mut last_end = None;
    let mut open = 0_i32;
    let mut in_statement = false;

    for (index, line) in lines.iter().enumerate() {
        if !in_statement {
            if !is_import(line) {
                continue;
            }
            in_statement = true;
            open = 0;
        }

        open += bracket_balance(line);
        if open <= 0 && !line.trim_end().ends_with('\\') {
            in_statement = false;
            last_end = Some(index);
        }
    }

    last_end
}

fn bracket_balance(line: &str) -> i32 {
    line.chars()
        .map(|ch| match ch {
            '(' | '[' | '{' => 1,
            ')' | ']' | '}' => -1,
            _ => 0,
        })
        .sum()
}

fn is_import(line: &str) -> bool {
    // Indented lines are function-local imports; keep them where they are.
    !line.starts_with(char::is_whitespace)
        && IMPORT_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}
