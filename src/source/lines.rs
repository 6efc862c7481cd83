use crate::error::ParseError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// Character encoding of a tool's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum Encoding {
    /// Strict UTF-8; invalid data is a parse error.
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    /// UTF-8 with invalid sequences replaced by U+FFFD.
    #[serde(rename = "utf-8-lossy", alias = "utf8-lossy")]
    Utf8Lossy,
    /// ISO-8859-1, each byte is one code point.
    #[serde(rename = "iso-8859-1", alias = "latin1")]
    Latin1,
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "utf-8"),
            Encoding::Utf8Lossy => write!(f, "utf-8-lossy"),
            Encoding::Latin1 => write!(f, "iso-8859-1"),
        }
    }
}

impl std::str::FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "utf-8-lossy" | "utf8-lossy" | "lossy" => Ok(Encoding::Utf8Lossy),
            "iso-8859-1" | "latin1" | "latin-1" => Ok(Encoding::Latin1),
            _ => Err(format!("Unknown encoding: {}", s)),
        }
    }
}

/// One line of input and its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    number: usize,
    text: String,
}

impl Line {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::ops::Deref for Line {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Lazy, forward-only sequence of decoded lines.
///
/// Lines end at `\n`; a trailing `\r` is dropped and a UTF-8 byte order mark
/// in front of the first line is skipped. After the first error the source
/// is exhausted.
pub struct LineSource<R> {
    reader: R,
    file_name: String,
    encoding: Encoding,
    line_number: usize,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, file_name: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            reader,
            file_name: file_name.into(),
            encoding,
            line_number: 0,
            buffer: Vec::new(),
            finished: false,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    fn read_line(&mut self) -> Result<Option<Line>, ParseError> {
        self.buffer.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buffer)
            .map_err(|source| ParseError::Io {
                file: self.file_name.clone(),
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let mut bytes = self.buffer.as_slice();
        if let Some(rest) = bytes.strip_suffix(b"\n") {
            bytes = rest;
        }
        if let Some(rest) = bytes.strip_suffix(b"\r") {
            bytes = rest;
        }
        if self.line_number == 1 {
            if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
                bytes = rest;
            }
        }

        let text = match self.encoding {
            Encoding::Utf8 => std::str::from_utf8(bytes)
                .map_err(|_| ParseError::Decode {
                    file: self.file_name.clone(),
                    line: self.line_number,
                })?
                .to_string(),
            Encoding::Utf8Lossy => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        };

        Ok(Some(Line::new(self.line_number, text)))
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<Line, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
