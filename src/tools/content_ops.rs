//! Content tools: pattern search, keyword analysis, append, line deletion.

use std::fs;
use std::io::{ErrorKind, Write};

use walkdir::WalkDir;

use super::{Session, Tool};

/// Find files matching a filename pattern, recursively.
pub struct FindFiles;

impl Tool for FindFiles {
    fn name(&self) -> &str {
        "Find Files"
    }

    fn description(&self) -> &str {
        "Finds files in the current directory and subdirectories that match a specified pattern. Input should be a filename pattern (e.g., '*.txt') to locate matching files."
    }

    fn execute(&self, input: &str, session: &mut Session) -> String {
        let pattern = input.trim();
        let mut matching = Vec::new();

        for entry in WalkDir::new(session.current_dir())
            .into_iter()
            .filter_map(Result::ok)
        {
            if entry.file_type().is_file()
                && wildcard_match(pattern, &entry.file_name().to_string_lossy())
            {
                matching.push(entry.path().display().to_string());
            }
        }

        if matching.is_empty() {
            return "No files found matching the pattern.".to_string();
        }
        matching.join(", ")
    }
}

/// Match a filename against a shell-style pattern (`*` and `?` wildcards).
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;

    while n < name.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == name[n]) {
            p += 1;
            n += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, n));
            p += 1;
        } else if let Some((star_p, star_n)) = star {
            // Backtrack: let the last '*' absorb one more character.
            p = star_p + 1;
            n = star_n + 1;
            star = Some((star_p, star_n + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Read a file and count keyword occurrences in it.
pub struct ReadAnalyze;

impl Tool for ReadAnalyze {
    fn name(&self) -> &str {
        "Read and Analyze File"
    }

    fn description(&self) -> &str {
        "Reads the content of a specified file and analyzes it for specified keywords. Input should be the file path, followed by a comma-separated list of keywords."
    }

    fn execute(&self, input: &str, session: &mut Session) -> String {
        let trimmed = input.trim();
        let mut parts = trimmed.splitn(2, ',');
        let file_part = parts.next().unwrap_or_default().trim();
        let keywords: Vec<String> = parts
            .next()
            .map(|rest| rest.split(',').map(|k| k.trim().to_string()).collect())
            .unwrap_or_default();

        let file_path = session.current_dir().join(file_part);
        if !file_path.is_file() {
            return format!("File not found: {}", file_path.display());
        }

        match fs::read_to_string(&file_path) {
            Ok(content) => analyze_content(&content, &keywords),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                "Error reading file: Unable to decode the file content.".to_string()
            }
            Err(e) => format!("Error reading file: {}", e),
        }
    }
}

/// Case-insensitive, non-overlapping keyword counts, one line per keyword.
fn analyze_content(content: &str, keywords: &[String]) -> String {
    let haystack = content.to_lowercase();
    keywords
        .iter()
        .map(|keyword| {
            let count = haystack.matches(&keyword.to_lowercase()).count();
            if count > 0 {
                format!("Keyword '{}' found {} times.", keyword, count)
            } else {
                format!("Keyword '{}' not found.", keyword)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append content to an existing file.
pub struct AddContent;

impl Tool for AddContent {
    fn name(&self) -> &str {
        "Add Content"
    }

    fn description(&self) -> &str {
        "Appends specified content to a file in the current directory. Input should be the file name followed by the content to add, separated by a ','."
    }

    fn execute(&self, input: &str, session: &mut Session) -> String {
        let parts: Vec<&str> = input.splitn(2, ',').collect();
        if parts.len() != 2 {
            return "Invalid input format. Provide a file name followed by content.".to_string();
        }

        let (file_name, content_to_add) = (parts[0], parts[1]);
        let file_path = session.current_dir().join(file_name.trim());

        if !file_path.is_file() {
            return "File not found.".to_string();
        }

        let result = fs::OpenOptions::new()
            .append(true)
            .open(&file_path)
            .and_then(|mut file| write!(file, "\n{}", content_to_add.trim()));

        match result {
            Ok(()) => format!("Content added to '{}'.", file_name),
            Err(e) => format!("Error adding content: {}", e),
        }
    }
}

/// Delete lines containing a given text from a file.
pub struct DeleteContent;

impl Tool for DeleteContent {
    fn name(&self) -> &str {
        "Delete Content"
    }

    fn description(&self) -> &str {
        "Deletes lines containing specified text from a file in the current directory. Input should be the file name followed by the text to delete."
    }

    fn execute(&self, input: &str, session: &mut Session) -> String {
        let parts: Vec<&str> = input.splitn(2, ',').collect();
        if parts.len() != 2 {
            return "Invalid input format. Provide a file name followed by the text to delete."
                .to_string();
        }

        let (file_name, text_to_delete) = (parts[0], parts[1]);
        let file_path = session.current_dir().join(file_name.trim());

        if !file_path.is_file() {
            return "File not found.".to_string();
        }

        let result = fs::read_to_string(&file_path).and_then(|content| {
            let kept: String = content
                .split_inclusive('\n')
                .filter(|line| !line.contains(text_to_delete))
                .collect();
            fs::write(&file_path, kept)
        });

        match result {
            Ok(()) => format!(
                "Deleted lines containing '{}' from '{}'.",
                text_to_delete, file_name
            ),
            Err(e) => format!("Error deleting content: {}", e),
        }
    }
}
