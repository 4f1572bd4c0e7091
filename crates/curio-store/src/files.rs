//! Local file storage for uploaded RFP documents

use crate::StoreError;
use curio_domain::{DocumentStorage, StoredFile};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// URL prefix under which uploads are addressed
pub const UPLOAD_URL_PREFIX: &str = "/files/uploads/";

const UPLOAD_DIR: &str = "rfp-uploads";

/// Stores uploads under `<root>/rfp-uploads/`
///
/// Uploads are addressed by `/files/uploads/<name>` URLs. Existing files are
/// never replaced: a taken name gets a `-N` suffix before its extension.
#[derive(Debug, Clone)]
pub struct FileStorage {
    uploads_dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `root`, creating the upload directory
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let uploads_dir = root.as_ref().join(UPLOAD_DIR);
        fs::create_dir_all(&uploads_dir)?;
        Ok(Self { uploads_dir })
    }

    /// Directory holding uploaded files
    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Local path of an upload URL, `None` for URLs this storage does not serve
    pub fn path_for_url(&self, url: &str) -> Result<Option<PathBuf>, StoreError> {
        match url.strip_prefix(UPLOAD_URL_PREFIX) {
            Some(name) => Ok(Some(self.uploads_dir.join(sanitize_file_name(name)?))),
            None => Ok(None),
        }
    }

    /// Write `content` to a new file named `name`, or the first free `stem-N.ext`
    fn write_new(&self, name: &str, content: &[u8]) -> Result<(PathBuf, String), StoreError> {
        let (stem, extension) = match name.rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => (stem, format!(".{}", extension)),
            _ => (name, String::new()),
        };

        let mut attempt = 0u32;
        loop {
            let candidate = if attempt == 0 {
                name.to_string()
            } else {
                format!("{}-{}{}", stem, attempt, extension)
            };
            let path = self.uploads_dir.join(&candidate);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(content)?;
                    return Ok((path, candidate));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl DocumentStorage for FileStorage {
    type Error = StoreError;

    fn save_upload(&self, content: &[u8], file_name: &str) -> Result<StoredFile, Self::Error> {
        let (path, name) = self.write_new(sanitize_file_name(file_name)?, content)?;

        debug!("Saved upload '{}' ({} bytes)", name, content.len());
        Ok(StoredFile {
            path: path.to_string_lossy().into_owned(),
            url: format!("{}{}", UPLOAD_URL_PREFIX, name),
            file_name: name,
        })
    }

    fn read_url(&self, url: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let Some(path) = self.path_for_url(url)? else {
            return Ok(None);
        };
        if !path.is_file() {
            return Err(StoreError::NotFound(url.to_string()));
        }
        Ok(Some(fs::read(path)?))
    }
}

/// Last path component of an uploaded file name
///
/// Clients may send a full path; only the final component is kept, so an
/// upload can never land outside the upload directory. Empty names, `.` and
/// `..` are rejected as `InvalidData`.
pub fn sanitize_file_name(file_name: &str) -> Result<&str, StoreError> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(StoreError::InvalidData(format!(
            "Invalid file name: '{}'",
            file_name
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("rfp.pdf").unwrap(), "rfp.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\rfp.docx").unwrap(), "rfp.docx");
        assert!(sanitize_file_name("").is_err());
        assert!(sanitize_file_name("uploads/").is_err());
        assert!(sanitize_file_name("..").is_err());
    }

    #[test]
    fn test_taken_names_get_a_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        let first = storage.save_upload(b"first", "notes.txt").unwrap();
        let second = storage.save_upload(b"second", "bids/notes.txt").unwrap();
        let third = storage.save_upload(b"third", "notes.txt").unwrap();
        let bare = storage.save_upload(b"bare", "README").unwrap();
        let bare_again = storage.save_upload(b"bare again", "README").unwrap();

        assert_eq!(first.url, "/files/uploads/notes.txt");
        assert_eq!(second.url, "/files/uploads/notes-1.txt");
        assert_eq!(third.file_name, "notes-2.txt");
        assert_eq!(bare.file_name, "README");
        assert_eq!(bare_again.file_name, "README-1");

        assert_eq!(storage.read_url(&first.url).unwrap().unwrap(), b"first");
        assert_eq!(storage.read_url(&second.url).unwrap().unwrap(), b"second");
    }

    #[test]
    fn test_remote_url_is_not_local() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        assert!(storage.read_url("https://example.org/rfp.pdf").unwrap().is_none());
    }
}
