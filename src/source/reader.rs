use super::{Encoding, LineSource};
use crate::error::ParseError;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

pub type Lines<'a> = LineSource<Box<dyn BufRead + 'a>>;

/// Supplies fresh line sources for one input, plus its name for diagnostics.
///
/// Every call to [`lines`](Self::lines) opens the input again; the stream is
/// released when the returned source is dropped.
pub trait ReaderFactory: Send + Sync {
    fn file_name(&self) -> &str;

    fn encoding(&self) -> Encoding;

    fn open(&self) -> Result<Box<dyn BufRead + '_>, ParseError>;

    fn lines(&self) -> Result<Lines<'_>, ParseError> {
        Ok(LineSource::new(self.open()?, self.file_name(), self.encoding()))
    }
}

pub struct FileReaderFactory {
    path: PathBuf,
    file_name: String,
    encoding: Encoding,
}

impl FileReaderFactory {
    pub fn new(path: impl Into<PathBuf>, encoding: Encoding) -> Self {
        let path = path.into();
        let file_name = path.display().to_string();
        Self {
            path,
            file_name,
            encoding,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReaderFactory for FileReaderFactory {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>, ParseError> {
        let file = File::open(&self.path).map_err(|source| ParseError::Io {
            file: self.file_name.clone(),
            source,
        })?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// In-memory input, used for stdin and tests.
pub struct StringReaderFactory {
    name: String,
    content: Vec<u8>,
    encoding: Encoding,
}

impl StringReaderFactory {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            encoding: Encoding::Utf8,
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl ReaderFactory for StringReaderFactory {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>, ParseError> {
        Ok(Box::new(Cursor::new(self.content.as_slice())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_factory_reads_lines_each_time() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "one\ntwo\n").unwrap();

        let factory = FileReaderFactory::new(file.path(), Encoding::Utf8);
        let first: Vec<_> = factory.lines().unwrap().map(|l| l.unwrap()).collect();
        let second: Vec<_> = factory.lines().unwrap().map(|l| l.unwrap()).collect();

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let factory = FileReaderFactory::new("/does/not/exist.log", Encoding::Utf8);

        let result = factory.lines();
        match result {
            Err(ParseError::Io { file, .. }) => assert_eq!(file, "/does/not/exist.log"),
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn test_string_factory_encoding() {
        let factory = StringReaderFactory::new("mem", b"na\xefve".to_vec()).with_encoding(Encoding::Latin1);
        let lines: Vec<_> = factory.lines().unwrap().map(|l| l.unwrap().into_text()).collect();

        assert_eq!(factory.file_name(), "mem");
        assert_eq!(lines, vec!["naïve"]);
    }
}
