use super::{CancellationToken, LookaheadCursor, Match, PatternMatcher};
use crate::error::ParseError;
use crate::issue::{Issue, IssueBuilder, Report};
use crate::source::{Lines, ReaderFactory};
use tracing::debug;

/// Cursor handed to continuations: lookahead over the lines of one input.
pub type Cursor<'a> = LookaheadCursor<Lines<'a>>;

/// Parser-specific logic run after a primary match. It may consume further
/// lines from the cursor and yields at most one issue.
pub type Continuation = dyn Fn(&Match<'_>, &mut Cursor<'_>, &mut IssueBuilder) -> Result<Option<Issue>, ParseError>
    + Send
    + Sync;

type LineFilter = dyn Fn(&str) -> bool + Send + Sync;
type Configure = dyn Fn(&mut IssueBuilder) + Send + Sync;
type PostProcess = dyn Fn(Report) -> Report + Send + Sync;

/// Prefix of lines decorated by an ant task, e.g. `[javac] `.
pub const ANT_TASK: &str = r"^(?:.*\[[^\]]*\])?\s*";

const ENTERING_DIRECTORY: &str = "Entering directory";

/// Anything that turns one input into a report.
pub trait IssueParser: Send + Sync {
    fn id(&self) -> &str;

    fn parse(
        &self,
        factory: &dyn ReaderFactory,
        cancel: &CancellationToken,
    ) -> Result<Report, ParseError>;
}

/// The line-oriented engine: a primary pattern, an optional fast-reject
/// filter and a continuation, composed into one parser.
pub struct LookaheadParser {
    id: String,
    matcher: PatternMatcher,
    continuation: Box<Continuation>,
    filter: Option<Box<LineFilter>>,
    configure: Option<Box<Configure>>,
    post_process: Option<Box<PostProcess>>,
    track_directories: bool,
}

impl LookaheadParser {
    pub fn new<F>(id: impl Into<String>, matcher: PatternMatcher, continuation: F) -> Self
    where
        F: Fn(&Match<'_>, &mut Cursor<'_>, &mut IssueBuilder) -> Result<Option<Issue>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            id: id.into(),
            matcher,
            continuation: Box::new(continuation),
            filter: None,
            configure: None,
            post_process: None,
            track_directories: false,
        }
    }

    /// Cheap pre-check run before the pattern. It only saves work: a line it
    /// rejects must never be one the pattern would match.
    pub fn with_filter(mut self, filter: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Prepare the builder once per parse, before the first line.
    pub fn with_configure(
        mut self,
        configure: impl Fn(&mut IssueBuilder) + Send + Sync + 'static,
    ) -> Self {
        self.configure = Some(Box::new(configure));
        self
    }

    pub fn with_post_process(
        mut self,
        post_process: impl Fn(Report) -> Report + Send + Sync + 'static,
    ) -> Self {
        self.post_process = Some(Box::new(post_process));
        self
    }

    /// Follow `make: Entering directory '...'` lines and resolve relative
    /// file names against the current directory.
    pub fn with_make_directories(mut self) -> Self {
        self.track_directories = true;
        self
    }

    fn is_line_interesting(&self, line: &str) -> bool {
        self.filter.as_ref().map(|f| f(line)).unwrap_or(true)
    }
}

impl IssueParser for LookaheadParser {
    fn id(&self) -> &str {
        &self.id
    }

    fn parse(
        &self,
        factory: &dyn ReaderFactory,
        cancel: &CancellationToken,
    ) -> Result<Report, ParseError> {
        let mut report = Report::new();
        let mut builder = IssueBuilder::new();
        builder.set_origin(&self.id);
        if let Some(configure) = &self.configure {
            configure(&mut builder);
        }

        let mut lookahead = LookaheadCursor::new(factory.lines()?);
        let mut matches = 0usize;

        while let Some(line) = lookahead.next() {
            if self.track_directories && line.contains(ENTERING_DIRECTORY) {
                if let Some(dir) = entering_directory(&line) {
                    builder.set_directory(fix_msys_path(dir, cfg!(windows)));
                }
            } else if self.is_line_interesting(&line) {
                if let Some(matched) = self.matcher.try_match(&line) {
                    matches += 1;
                    let issue = (self.continuation)(&matched, &mut lookahead, &mut builder)?;
                    builder.clean();
                    if let Some(issue) = issue {
                        report.add(issue);
                    }
                }
            }

            lookahead.check()?;
            if cancel.is_canceled() {
                debug!(
                    "{}: canceled at line {} of {}",
                    self.id,
                    lookahead.line_number(),
                    factory.file_name()
                );
                return Err(ParseError::canceled(report));
            }
        }
        lookahead.check()?;

        debug!(
            "{}: {} lines, {} matches, {} issues in {}",
            self.id,
            lookahead.line_number(),
            matches,
            report.len(),
            factory.file_name()
        );

        Ok(match &self.post_process {
            Some(post_process) => post_process(report),
            None => report,
        })
    }
}

/// Directory of a `make[N]: Entering directory '<dir>'` line.
fn entering_directory(line: &str) -> Option<&str> {
    let (prefix, rest) = line.split_once(ENTERING_DIRECTORY)?;
    if !prefix.contains("make") {
        return None;
    }
    let quoted = rest.strip_prefix(' ')?.strip_prefix(['`', '\''])?;
    let (dir, tail) = quoted.rsplit_once(['\'', '`'])?;
    tail.is_empty().then_some(dir)
}

/// MSYS make reports `c:/` as `/c/`; turn it back on Windows.
fn fix_msys_path(path: &str, is_windows: bool) -> String {
    let bytes = path.as_bytes();
    if is_windows && bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b'/' {
        format!("{}:{}", &path[1..2], &path[2..])
    } else {
        path.to_string()
    }
}
