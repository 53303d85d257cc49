use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct FilePath {
    buf: PathBuf,
}

impl FilePath {
    /// Reads the raw bytes of the file. Decoding is left to the caller so that
    /// encoding problems surface as parse errors rather than i/o errors.
    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.buf)
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.buf.display())
    }
}

impl<T: Into<PathBuf>> From<T> for FilePath {
    fn from(s: T) -> FilePath {
        FilePath { buf: s.into() }
    }
}

impl FromStr for FilePath {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<FilePath, &'static str> {
        Ok(FilePath { buf: s.into() })
    }
}

impl AsRef<Path> for FilePath {
    fn as_ref(&self) -> &Path {
        self.buf.as_path()
    }
}
