//! Concrete issue parsers and the registry that creates them by id.

mod ajc;
mod cargo;
mod clang_tidy;
mod dr_memory;
mod gcc4;
mod javac;
mod nag_fortran;
mod pylint;

pub use ajc::AjcParser;
pub use cargo::CargoCheckParser;

use crate::engine::{IssueParser, LookaheadParser};
use crate::error::ParserError;
use serde::Serialize;

/// Registry entry describing one parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParserDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

const PARSERS: &[ParserDescriptor] = &[
    ParserDescriptor {
        id: gcc4::ID,
        name: "GNU C Compiler (gcc 4+)",
        description: "gcc/g++ warnings and errors, with make directory tracking",
    },
    ParserDescriptor {
        id: clang_tidy::ID,
        name: "Clang-Tidy",
        description: "clang-tidy check findings; compiler -W warnings are skipped",
    },
    ParserDescriptor {
        id: javac::ID,
        name: "Java Compiler",
        description: "javac output from maven or ant, and kotlinc 'w:' warnings",
    },
    ParserDescriptor {
        id: nag_fortran::ID,
        name: "NAG Fortran Compiler",
        description: "nagfor messages with indented continuation lines",
    },
    ParserDescriptor {
        id: pylint::ID,
        name: "Pylint",
        description: "pylint in parseable output format",
    },
    ParserDescriptor {
        id: dr_memory::ID,
        name: "Dr. Memory",
        description: "Dr. Memory error reports with stack traces",
    },
    ParserDescriptor {
        id: ajc::ID,
        name: "AspectJ Compiler",
        description: "ajc messages from the aspectj-maven-plugin",
    },
    ParserDescriptor {
        id: cargo::ID,
        name: "Cargo",
        description: "cargo check/clippy with --message-format json",
    },
];

pub fn available_parsers() -> &'static [ParserDescriptor] {
    PARSERS
}

pub fn is_known_parser(id: &str) -> bool {
    PARSERS.iter().any(|p| p.id == id)
}

/// Create a fresh parser instance; patterns are compiled per instance.
pub fn create_parser(id: &str) -> Result<Box<dyn IssueParser>, ParserError> {
    let pattern_error = |source: regex::Error| ParserError::Pattern {
        parser: id.to_string(),
        source,
    };
    let lookahead = |create: fn() -> Result<LookaheadParser, regex::Error>| {
        create()
            .map(|parser| Box::new(parser) as Box<dyn IssueParser>)
            .map_err(pattern_error)
    };

    match id {
        gcc4::ID => lookahead(gcc4::create),
        clang_tidy::ID => lookahead(clang_tidy::create),
        javac::ID => lookahead(javac::create),
        nag_fortran::ID => lookahead(nag_fortran::create),
        pylint::ID => lookahead(pylint::create),
        dr_memory::ID => lookahead(dr_memory::create),
        ajc::ID => AjcParser::new()
            .map(|parser| Box::new(parser) as Box<dyn IssueParser>)
            .map_err(pattern_error),
        cargo::ID => Ok(Box::new(CargoCheckParser::new())),
        other => Err(ParserError::UnknownParser(other.to_string())),
    }
}

#[cfg(test)]
pub(crate) fn parse_text(parser: &dyn IssueParser, text: &str) -> crate::issue::Report {
    let factory = crate::source::StringReaderFactory::new("test.log", text);
    parser
        .parse(&factory, &crate::engine::CancellationToken::new())
        .unwrap()
}
