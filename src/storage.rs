//! File storage abstraction for bitmap sources and cache artifacts
//!
//! The image cache never touches a filesystem directly. It goes through
//! [`Storage`], so the same code runs against an SD card driver on a board,
//! `std::fs` on a host ([`StdStorage`], `std` feature) or an in-memory map
//! in tests.
//!
//! Paths are `/`-separated and relative to whatever root the
//! implementation chooses.

use alloc::string::String;
use alloc::vec::Vec;

/// An open file
pub trait StorageFile {
    /// Error type for file I/O
    type Error: core::fmt::Debug;

    /// Total length in bytes
    fn len(&mut self) -> Result<u64, Self::Error>;

    /// Move the read/write position to `offset` bytes from the start
    fn seek(&mut self, offset: u64) -> Result<(), Self::Error>;

    /// Read up to `buf.len()` bytes, returning how many were read
    ///
    /// Returns 0 only at end of file.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write all of `bytes` at the current position
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Read until `buf` is full or the file ends, returning the bytes read
    fn read_fill(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}

/// A directory tree of files
pub trait Storage {
    /// Error type for storage operations
    type Error: core::fmt::Debug;
    /// Handle type returned by [`open`](Self::open) and [`create`](Self::create)
    type File: StorageFile<Error = Self::Error>;

    /// Open an existing file for reading
    ///
    /// Returns `Ok(None)` if the file does not exist.
    fn open(&mut self, path: &str) -> Result<Option<Self::File>, Self::Error>;

    /// Create a file for writing, truncating any existing content
    fn create(&mut self, path: &str) -> Result<Self::File, Self::Error>;

    /// Create a directory and all missing parents
    fn create_dir_all(&mut self, path: &str) -> Result<(), Self::Error>;

    /// Names of the entries directly inside `dir`
    fn list(&mut self, dir: &str) -> Result<Vec<String>, Self::Error>;

    /// Delete a file
    fn remove(&mut self, path: &str) -> Result<(), Self::Error>;

    /// Whether a file exists at `path`
    fn exists(&mut self, path: &str) -> Result<bool, Self::Error> {
        Ok(self.open(path)?.is_some())
    }
}

#[cfg(feature = "std")]
pub use self::fs::{StdFile, StdStorage};

#[cfg(feature = "std")]
mod fs {
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
    use std::path::PathBuf;

    use super::{Storage, StorageFile};

    /// [`Storage`] on the host filesystem, rooted at a directory
    #[derive(Debug, Clone)]
    pub struct StdStorage {
        root: PathBuf,
    }

    impl StdStorage {
        /// Resolve every path relative to `root`
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        /// Root directory
        pub fn root(&self) -> &std::path::Path {
            &self.root
        }

        fn resolve(&self, path: &str) -> PathBuf {
            path.split('/')
                .filter(|part| !part.is_empty())
                .fold(self.root.clone(), |acc, part| acc.join(part))
        }
    }

    /// File handle returned by [`StdStorage`]
    #[derive(Debug)]
    pub struct StdFile(std::fs::File);

    impl StorageFile for StdFile {
        type Error = std::io::Error;

        fn len(&mut self) -> Result<u64, Self::Error> {
            Ok(self.0.metadata()?.len())
        }

        fn seek(&mut self, offset: u64) -> Result<(), Self::Error> {
            self.0.seek(SeekFrom::Start(offset)).map(|_| ())
        }

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            self.0.read(buf)
        }

        fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
            self.0.write_all(bytes)
        }
    }

    impl Storage for StdStorage {
        type Error = std::io::Error;
        type File = StdFile;

        fn open(&mut self, path: &str) -> Result<Option<Self::File>, Self::Error> {
            match std::fs::File::open(self.resolve(path)) {
                Ok(file) => Ok(Some(StdFile(file))),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(err) => Err(err),
            }
        }

        fn create(&mut self, path: &str) -> Result<Self::File, Self::Error> {
            std::fs::File::create(self.resolve(path)).map(StdFile)
        }

        fn create_dir_all(&mut self, path: &str) -> Result<(), Self::Error> {
            std::fs::create_dir_all(self.resolve(path))
        }

        fn list(&mut self, dir: &str) -> Result<Vec<String>, Self::Error> {
            let mut names = Vec::new();
            for entry in std::fs::read_dir(self.resolve(dir))? {
                let name = entry?.file_name();
                if let Some(name) = name.to_str() {
                    names.push(String::from(name));
                }
            }
            names.sort();
            Ok(names)
        }

        fn remove(&mut self, path: &str) -> Result<(), Self::Error> {
            std::fs::remove_file(self.resolve(path))
        }
    }
}
