use std::path::Path;

/// Rendered prompt sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Language name for a source file, derived from its extension.
pub fn language_for(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "py" => "python",
        "rs" => "rust",
        "js" | "mjs" | "cjs" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "go" => "go",
        "rb" => "ruby",
        "cs" => "csharp",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" => "cpp",
        "php" => "php",
        "swift" => "swift",
        "scala" => "scala",
        _ => "unknown",
    }
}

/// Prefix each line with its 1-based line number.
pub fn number_lines(content: &str) -> String {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| format!("{} {}", index + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}
