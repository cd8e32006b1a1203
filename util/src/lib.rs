use std::{
    io::{self, Read},
    num::ParseIntError,
    str::FromStr,
};

use anyhow::Result;
use miette::{Diagnostic, GraphicalReportHandler, SourceSpan};
use nom::{
    character::complete::{digit1, one_of},
    combinator::{map_res, opt, recognize},
    error::{FromExternalError, ParseError},
    sequence::tuple,
    IResult,
};
use nom_locate::LocatedSpan;
use nom_supreme::{
    error::{ErrorTree, GenericErrorTree},
    final_parser::final_parser,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Thanks to FasterThanLime! https://fasterthanli.me/series/advent-of-code-2022/part-11

pub type Span<'a> = LocatedSpan<&'a str>;

/// Where and why a single line failed to parse, relative to the line itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub offset: usize,
    pub len: usize,
    pub kind: String,
}

/// A parse failure pointing into the whole input it came from.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[error("bad input on line {line}")]
#[diagnostic(help("every non-blank line must hold a single base-10 integer"))]
pub struct BadInput {
    #[source_code]
    src: String,

    #[label("{kind}")]
    bad_bit: SourceSpan,

    kind: String,

    pub line: usize,
}

impl BadInput {
    /// `line_start` is the byte offset of the failing line inside `src`,
    /// `line` its 1-based number.
    pub fn at_line(src: &str, line_start: usize, line: usize, err: LineError) -> Self {
        Self {
            src: src.to_string(),
            bad_bit: (line_start + err.offset, err.len).into(),
            kind: err.kind,
            line,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn span(&self) -> SourceSpan {
        self.bad_bit
    }
}

pub fn parse_number<'a, E>(i: Span<'a>) -> IResult<Span<'a>, i64, E>
where
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, ParseIntError>,
{
    map_res(
        recognize(tuple((opt(one_of("+-")), digit1))),
        |i: Span<'a>| FromStr::from_str(i.fragment()),
    )(i)
}

pub fn parse_nice<'a, T, F>(l: &'a str, parse_fun: F) -> Result<T, LineError>
where
    F: FnMut(Span<'a>) -> IResult<Span<'a>, T, ErrorTree<Span<'a>>>,
{
    let line_span = Span::new(l);
    let line: Result<_, ErrorTree<Span>> = final_parser(parse_fun)(line_span);
    line.map_err(|e| match e {
        GenericErrorTree::Base { location, kind } => {
            let offset = location.location_offset();
            LineError {
                offset,
                len: l.len() - offset,
                kind: kind.to_string(),
            }
        }
        GenericErrorTree::Stack { .. } | GenericErrorTree::Alt(_) => LineError {
            offset: 0,
            len: l.len(),
            kind: "unparseable line".to_string(),
        },
    })
}

pub fn render_report(diagnostic: &dyn Diagnostic) -> Result<String> {
    let mut s = String::new();
    GraphicalReportHandler::new().render_report(&mut s, diagnostic)?;
    Ok(s)
}

pub fn read_input_as_string() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    Ok(input)
}

/// Logs go to stderr so stdout only carries answers. `RUST_LOG` wins over `verbose`.
pub fn init_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
