use std::fs::Metadata;
use std::path::Path;

use ignore::{DirEntry, WalkBuilder};

use crate::entry::{Child, Identifier, DIRECTORY_MIME_TYPE};
use crate::error::WalkError;
use crate::traits::{ChildProvider, Listing};

/// Type marker reported for everything on disk that is not a directory.
pub const FILE_MIME_TYPE: &str = "application/octet-stream";

/// Lists local directories, one level per call.
///
/// Identifiers are filesystem paths. Entries are sorted by file name, no
/// ignore files are honoured and symlinks are never followed, so a symlinked
/// directory shows up as a leaf. Each child carries its [`Metadata`].
///
/// A child whose name is not valid UTF-8 cannot be addressed by an
/// [`Identifier`], so it is reported as a [`WalkError::InvalidName`] row
/// instead of being visited under a lossy name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryProvider;

impl DirectoryProvider {
    pub fn new() -> Self {
        Self
    }

    /// The identifier of a local directory, for use as a walk root.
    pub fn identifier(path: &Path) -> Result<Identifier, WalkError> {
        path.to_str()
            .map(Identifier::from)
            .ok_or_else(|| WalkError::InvalidName {
                id:   Identifier::new(path.to_string_lossy()),
                name: path.as_os_str().to_os_string(),
            })
    }
}

impl ChildProvider for DirectoryProvider {
    type Metadata = Metadata;

    fn list_children(&self, id: &Identifier) -> Result<Listing<'_, Metadata>, WalkError> {
        let mut builder = WalkBuilder::new(Path::new(id.as_str()));
        builder
            .standard_filters(false)
            .follow_links(false)
            .max_depth(Some(1))
            .sort_by_file_name(|a, b| a.cmp(b));
        let mut walk = builder.build();

        // The walk yields the directory itself first.
        match walk.next() {
            Some(Ok(dir)) if dir.file_type().is_some_and(|ft| ft.is_dir()) => {}
            Some(Ok(_)) => {
                return Err(WalkError::Provider {
                    id:      id.clone(),
                    message: "not a directory".into(),
                })
            }
            Some(Err(err)) => return Err(map_ignore_error(id, err)),
            None           => return Err(WalkError::NotFound(id.clone())),
        }

        let id = id.clone();
        Ok(Box::new(walk.map(move |res| {
            res.map_err(|err| map_ignore_error(&id, err))
                .and_then(|entry| to_child(&id, entry))
        })))
    }
}

fn to_child(parent: &Identifier, entry: DirEntry) -> Result<Child<Metadata>, WalkError> {
    let name = match entry.file_name().to_str() {
        Some(name) => name.to_owned(),
        None => {
            return Err(WalkError::InvalidName {
                id:   parent.clone(),
                name: entry.file_name().to_os_string(),
            })
        }
    };
    let marker = if entry.file_type().is_some_and(|ft| ft.is_dir()) {
        DIRECTORY_MIME_TYPE
    } else {
        FILE_MIME_TYPE
    };
    let metadata = entry
        .metadata()
        .map_err(|err| map_ignore_error(&parent.child(&name), err))?;

    Ok(Child::new(name, marker, metadata))
}

// ---------------------------------------------------------------------------
// Map ignore::Error to WalkError
// ---------------------------------------------------------------------------

fn map_ignore_error(id: &Identifier, err: ignore::Error) -> WalkError {
    match err {
        ignore::Error::WithPath { path, err } => {
            map_ignore_error(&Identifier::new(path.to_string_lossy()), *err)
        }
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            map_ignore_error(id, *err)
        }
        ignore::Error::Loop { .. } => WalkError::Loop(id.clone()),
        ignore::Error::Io(io_err)  => match io_err.kind() {
            std::io::ErrorKind::NotFound         => WalkError::NotFound(id.clone()),
            std::io::ErrorKind::PermissionDenied => WalkError::PermissionDenied(id.clone()),
            _                                    => WalkError::Io {
                id:     id.clone(),
                source: io_err,
            },
        },
        other => WalkError::Provider {
            id:      id.clone(),
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn names(provider: &DirectoryProvider, id: &Identifier) -> Vec<(String, String)> {
        provider
            .list_children(id)
            .unwrap()
            .map(|c| {
                let c = c.unwrap();
                (c.name, c.type_marker)
            })
            .collect()
    }

    #[test]
    fn lists_one_level_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join(".hidden"), "h").unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a").join("deep.txt"), "d").unwrap();

        let id = DirectoryProvider::identifier(dir.path()).unwrap();
        assert_eq!(
            names(&DirectoryProvider, &id),
            [
                (".hidden".to_string(), FILE_MIME_TYPE.to_string()),
                ("a".to_string(), DIRECTORY_MIME_TYPE.to_string()),
                ("b.txt".to_string(), FILE_MIME_TYPE.to_string()),
            ]
        );
    }

    #[test]
    fn metadata_is_passed_along() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("five.txt"), "12345").unwrap();

        let id = DirectoryProvider::identifier(dir.path()).unwrap();
        let child = DirectoryProvider
            .list_children(&id)
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(child.metadata.len(), 5);
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let id = DirectoryProvider::identifier(&dir.path().join("vanished")).unwrap();
        let err = DirectoryProvider.list_children(&id).err().unwrap();
        assert!(matches!(err, WalkError::NotFound(_)), "{err:?}");
    }

    #[test]
    fn files_cannot_be_listed() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let id = DirectoryProvider::identifier(&file).unwrap();
        let err = DirectoryProvider.list_children(&id).err().unwrap();
        assert!(matches!(err, WalkError::Provider { .. }), "{err:?}");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_are_error_rows() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let raw = OsStr::from_bytes(b"caf\xe9");
        fs::create_dir(dir.path().join(raw)).unwrap();
        fs::write(dir.path().join(raw).join("inside.txt"), "x").unwrap();
        fs::write(dir.path().join("plain.txt"), "y").unwrap();

        let id = DirectoryProvider::identifier(dir.path()).unwrap();
        let rows: Vec<_> = DirectoryProvider.list_children(&id).unwrap().collect();

        assert_eq!(rows.len(), 2);
        assert!(
            matches!(&rows[0], Err(WalkError::InvalidName { id: parent, name }) if *parent == id && name == raw),
            "{:?}",
            rows[0].as_ref().err()
        );
        assert_eq!(rows[1].as_ref().map(|c| c.name.as_str()).ok(), Some("plain.txt"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_root_has_no_identifier() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/tmp/caf\xe9"));
        let err = DirectoryProvider::identifier(path).unwrap_err();
        assert!(matches!(err, WalkError::InvalidName { .. }));
    }
}
