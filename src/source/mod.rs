//! Line sources: decoding raw tool output into numbered lines.

mod lines;
mod reader;

pub use lines::{Encoding, Line, LineSource};
pub use reader::{FileReaderFactory, Lines, ReaderFactory, StringReaderFactory};
