//! Directory tools: listing, navigation, creation, deletion.

use std::fs;
use std::io::ErrorKind;

use super::{Session, Tool};

/// List the contents of a directory.
pub struct ListDirectory;

impl Tool for ListDirectory {
    fn name(&self) -> &str {
        "List Directory"
    }

    fn description(&self) -> &str {
        "Lists files in the specified directory. Input should be a valid directory inside the sandbox directory, or ' ' for the current directory."
    }

    fn execute(&self, input: &str, session: &mut Session) -> String {
        let directory = if input.trim().is_empty() {
            session.current_dir().to_path_buf()
        } else {
            session.resolve(input)
        };

        if !directory.is_dir() {
            return "Invalid directory.".to_string();
        }

        let entries = match fs::read_dir(&directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return format!("Error: The directory '{}' does not exist.", directory.display());
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return format!(
                    "Error: Permission denied when accessing '{}'.",
                    directory.display()
                );
            }
            Err(e) => return format!("Error listing directory: {}", e),
        };

        let mut output = format!("Directory listing for: {}\n", directory.display());
        output.push_str("-----------------------------------\n");
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return format!("Error listing directory: {}", e),
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            match entry.metadata() {
                Ok(meta) if meta.is_dir() => {
                    output.push_str(&format!("[DIR]  {}\n", name));
                }
                Ok(meta) => {
                    output.push_str(&format!("[FILE] {}  ({} bytes)\n", name, meta.len()));
                }
                Err(e) => return format!("Error listing directory: {}", e),
            }
        }
        output.trim_end().to_string()
    }
}

/// Change the session's working directory.
pub struct ChangeDirectory;

impl Tool for ChangeDirectory {
    fn name(&self) -> &str {
        "Change Directory"
    }

    fn description(&self) -> &str {
        "Changes the current working directory. Navigates to one if needed. Input should be a valid directory name inside the sandbox directory."
    }

    fn execute(&self, input: &str, session: &mut Session) -> String {
        // Resolved against the sandbox root, not the current directory.
        let new_dir = session.root().join(input.trim());

        if new_dir.is_dir() {
            if input.trim() == ".." {
                return "Forbidden directory.".to_string();
            }
            let message = format!("Changed directory to {}", new_dir.display());
            session.set_current_dir(new_dir);
            return message;
        }
        "Invalid directory.".to_string()
    }
}

/// Create a directory under the current directory.
pub struct CreateDirectory;

impl Tool for CreateDirectory {
    fn name(&self) -> &str {
        "Create Directory"
    }

    fn description(&self) -> &str {
        "Creates a new directory in the current directory. Input should be the directory name."
    }

    fn execute(&self, input: &str, session: &mut Session) -> String {
        let new_dir = session.resolve(input);

        if new_dir.exists() {
            return "Directory already exists.".to_string();
        }

        match fs::create_dir_all(&new_dir) {
            Ok(()) => format!("Directory '{}' created.", input),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                format!("Permission denied: Unable to create directory '{}'.", input)
            }
            Err(e) => format!("Error creating directory: {}", e),
        }
    }
}

/// Delete an empty directory under the current directory.
pub struct DeleteDirectory;

impl Tool for DeleteDirectory {
    fn name(&self) -> &str {
        "Delete Directory"
    }

    fn description(&self) -> &str {
        "Deletes a directory in the current directory. Input should be the directory name."
    }

    fn execute(&self, input: &str, session: &mut Session) -> String {
        let dir_path = session.resolve(input);

        match fs::remove_dir(&dir_path) {
            Ok(()) => format!("Directory '{}' deleted.", input),
            Err(e) if e.kind() == ErrorKind::NotFound => "Directory not found.".to_string(),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                format!("Permission denied: Unable to delete directory '{}'.", input)
            }
            Err(_) => "Directory not empty or not found.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn list_directory_formats_files_and_dirs() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("sub")).unwrap();
        fs::write(root.path().join("a.txt"), "hello").unwrap();
        let mut session = Session::new(root.path());

        let listing = ListDirectory.execute("", &mut session);
        assert!(listing.starts_with(&format!(
            "Directory listing for: {}",
            root.path().display()
        )));
        assert!(listing.contains("[DIR]  sub"));
        assert!(listing.contains("[FILE] a.txt  (5 bytes)"));
    }

    #[test]
    fn list_directory_rejects_missing_path() {
        let root = tempdir().unwrap();
        let mut session = Session::new(root.path());
        assert_eq!(ListDirectory.execute("nope", &mut session), "Invalid directory.");
    }

    #[test]
    fn change_directory_moves_session_state() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("sub")).unwrap();
        let mut session = Session::new(root.path());

        let message = ChangeDirectory.execute("sub", &mut session);
        assert!(message.starts_with("Changed directory to "));
        assert_eq!(session.current_dir(), root.path().join("sub"));
    }

    #[test]
    fn change_directory_refuses_parent() {
        let root = tempdir().unwrap();
        let mut session = Session::new(root.path());
        assert_eq!(
            ChangeDirectory.execute("..", &mut session),
            "Forbidden directory."
        );
        assert_eq!(session.current_dir(), root.path());
    }

    #[test]
    fn change_directory_resolves_from_root_not_current() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("a/b")).unwrap();
        let mut session = Session::new(root.path());

        ChangeDirectory.execute("a", &mut session);
        // "b" alone is relative to the root, where it does not exist.
        assert_eq!(ChangeDirectory.execute("b", &mut session), "Invalid directory.");
        let message = ChangeDirectory.execute("a/b", &mut session);
        assert!(message.starts_with("Changed directory to "));
    }

    #[test]
    fn create_directory_reports_existing() {
        let root = tempdir().unwrap();
        let mut session = Session::new(root.path());

        assert_eq!(
            CreateDirectory.execute("fresh", &mut session),
            "Directory 'fresh' created."
        );
        assert_eq!(
            CreateDirectory.execute("fresh", &mut session),
            "Directory already exists."
        );
    }

    #[test]
    fn delete_directory_requires_empty() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("full")).unwrap();
        fs::write(root.path().join("full/x"), "x").unwrap();
        let mut session = Session::new(root.path());

        assert_eq!(
            DeleteDirectory.execute("full", &mut session),
            "Directory not empty or not found."
        );
        assert_eq!(
            DeleteDirectory.execute("gone", &mut session),
            "Directory not found."
        );

        fs::remove_file(root.path().join("full/x")).unwrap();
        assert_eq!(
            DeleteDirectory.execute("full", &mut session),
            "Directory 'full' deleted."
        );
    }
}
