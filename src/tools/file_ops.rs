//! File tools: creation, deletion, reading, renaming.

use std::fs;
use std::io::ErrorKind;

use super::{Session, Tool};

/// Create an empty file in the current directory.
pub struct CreateFile;

impl Tool for CreateFile {
    fn name(&self) -> &str {
        "Create File"
    }

    fn description(&self) -> &str {
        "Creates a new file in the current directory. Input should be the file name."
    }

    fn execute(&self, input: &str, session: &mut Session) -> String {
        let file_path = session.resolve(input);

        match fs::write(&file_path, "") {
            Ok(()) => format!("File '{}' created.", input),
            Err(e) => format!("Error creating file: {}", e),
        }
    }
}

/// Delete a file in the current directory.
pub struct DeleteFile;

impl Tool for DeleteFile {
    fn name(&self) -> &str {
        "Delete File"
    }

    fn description(&self) -> &str {
        "Deletes a file in the current directory. Input should be the file name."
    }

    fn execute(&self, input: &str, session: &mut Session) -> String {
        let path = session.strip_root_prefix(input);
        let file_path = session.current_dir().join(path);

        match fs::remove_file(&file_path) {
            Ok(()) => format!("File '{}' deleted.", input),
            Err(e) if e.kind() == ErrorKind::NotFound => "File not found.".to_string(),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                format!("Permission denied: Unable to delete file '{}'.", input)
            }
            Err(e) => format!("Error deleting file: {}", e),
        }
    }
}

/// Read a file's content.
pub struct ReadFile;

impl Tool for ReadFile {
    fn name(&self) -> &str {
        "Read File"
    }

    fn description(&self) -> &str {
        "Reads the content of a specified file. Input should be the file path."
    }

    fn execute(&self, input: &str, session: &mut Session) -> String {
        let path = session.strip_root_prefix(input);
        let file_path = session.current_dir().join(path);

        if !file_path.is_file() {
            return format!("File not found: {}", file_path.display());
        }

        match fs::read_to_string(&file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                "Error reading file: Unable to decode the file content.".to_string()
            }
            Err(e) => format!("Error reading file: {}", e),
        }
    }
}

/// Rename a file in the current directory.
pub struct RenameFile;

impl Tool for RenameFile {
    fn name(&self) -> &str {
        "Rename File"
    }

    fn description(&self) -> &str {
        "Renames a file in the current directory. Input should be the current filename and the new name, separated by a ','."
    }

    fn execute(&self, input: &str, session: &mut Session) -> String {
        let parts: Vec<&str> = input.split(',').collect();
        if parts.len() != 2 {
            return "Invalid input format. Provide the current filename and the new name, separated by a ','."
                .to_string();
        }

        let old_name = parts[0].trim();
        let new_name = parts[1].trim();
        let old_path = session.current_dir().join(old_name);
        let new_path = session.current_dir().join(new_name);

        match fs::rename(&old_path, &new_path) {
            Ok(()) => format!("Renamed '{}' to '{}'.", old_name, new_name),
            Err(e) if e.kind() == ErrorKind::NotFound => "File not found.".to_string(),
            Err(e) => format!("Error renaming file: {}", e),
        }
    }
}
