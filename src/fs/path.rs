//! Lexical path normalization.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against the current directory and clean it lexically.
///
/// `.` components are dropped and `..` pops the previous component without
/// touching the filesystem, so symlinks are not resolved and the path does
/// not need to exist.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(clean(&joined))
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_is_kept() {
        assert_eq!(
            absolutize(Path::new("/etc/app/config.yaml")).unwrap(),
            PathBuf::from("/etc/app/config.yaml")
        );
    }

    #[test]
    fn dot_components_are_cleaned() {
        assert_eq!(
            absolutize(Path::new("/etc/./app/../other//config.yaml")).unwrap(),
            PathBuf::from("/etc/other/config.yaml")
        );
    }

    #[test]
    fn parent_of_root_is_root() {
        assert_eq!(
            absolutize(Path::new("/../../config.yaml")).unwrap(),
            PathBuf::from("/config.yaml")
        );
    }

    #[test]
    #[serial_test::serial]
    fn relative_path_joins_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        let resolved = absolutize(Path::new("conf/app.yaml")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.starts_with(clean(&cwd)));
        assert!(resolved.ends_with("conf/app.yaml"));
    }
}
