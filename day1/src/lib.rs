use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use itertools::Itertools;
use thiserror::Error;
use tracing::debug;
use util::{parse_nice, parse_number, BadInput};

#[derive(Error, Debug, miette::Diagnostic)]
pub enum CalorieError {
    #[error("unable to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    BadLine(#[from] BadInput),

    #[error("group total overflowed on line {line}")]
    Overflow { line: usize },

    #[error("sum of the largest group totals overflowed")]
    SumOverflow,

    #[error("need at least {needed} groups, found {found}")]
    NotEnoughGroups { needed: usize, found: usize },
}

pub type Result<T, E = CalorieError> = std::result::Result<T, E>;

/// Where the running maximum starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MaxStart {
    /// Start at zero; an all-negative input reports 0.
    #[default]
    Zero,
    /// Start at the first group total.
    FirstGroup,
}

/// What happens to numbers after the last blank line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TrailingGroup {
    /// Keep the pending group as the final total.
    #[default]
    Flush,
    /// Discard it; only blank-line terminated groups count.
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub input: PathBuf,
    pub max_start: MaxStart,
    pub trailing_group: TrailingGroup,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data.txt"),
            max_start: MaxStart::default(),
            trailing_group: TrailingGroup::default(),
        }
    }
}

/// Reads the whole input; `-` means stdin.
pub fn load_input(path: &Path) -> Result<String> {
    let contents = if path == Path::new("-") {
        util::read_input_as_string()
    } else {
        fs::read_to_string(path)
    }
    .map_err(|source| CalorieError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "loaded input");

    Ok(contents)
}

pub fn group_totals(input: &str, trailing: TrailingGroup) -> Result<Vec<i64>> {
    let mut totals = Vec::new();
    let mut current_total = 0i64;
    let mut pending = false;
    let mut line_start = 0;

    for (i, raw) in input.split_inclusive('\n').enumerate() {
        let line_number = i + 1;
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            totals.push(current_total);
            current_total = 0;
            pending = false;
        } else {
            let calories = parse_nice(line, parse_number)
                .map_err(|e| BadInput::at_line(input, line_start, line_number, e))?;
            current_total = current_total
                .checked_add(calories)
                .ok_or(CalorieError::Overflow { line: line_number })?;
            pending = true;
        }

        line_start += raw.len();
    }

    if pending {
        match trailing {
            TrailingGroup::Flush => totals.push(current_total),
            TrailingGroup::Drop => debug!(current_total, "dropping unterminated final group"),
        }
    }

    debug!(groups = totals.len(), "grouped input");

    Ok(totals)
}

pub fn largest(totals: &[i64], start: MaxStart) -> Result<i64> {
    let (first, rest) = match start {
        MaxStart::Zero => (0, totals),
        MaxStart::FirstGroup => match totals.split_first() {
            Some((first, rest)) => (*first, rest),
            None => {
                return Err(CalorieError::NotEnoughGroups {
                    needed: 1,
                    found: 0,
                })
            }
        },
    };

    Ok(rest
        .iter()
        .fold(first, |best, &total| if total > best { total } else { best }))
}

pub fn top_n_total(totals: &[i64], n: usize) -> Result<i64> {
    if totals.len() < n {
        return Err(CalorieError::NotEnoughGroups {
            needed: n,
            found: totals.len(),
        });
    }

    totals
        .iter()
        .sorted_by(|a, b| b.cmp(a))
        .take(n)
        .try_fold(0i64, |sum, &total| sum.checked_add(total))
        .ok_or(CalorieError::SumOverflow)
}

pub fn top_three_total(totals: &[i64]) -> Result<i64> {
    top_n_total(totals, 3)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub largest: i64,
    pub top_three_total: i64,
}

impl Report {
    pub fn compute(totals: &[i64], options: &Options) -> Result<Self> {
        Ok(Self {
            largest: largest(totals, options.max_start)?,
            top_three_total: top_three_total(totals)?,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Largest: {}", self.largest)?;
        write!(f, "Top three total: {}", self.top_three_total)
    }
}

pub fn run(options: &Options) -> Result<Report> {
    let input = load_input(&options.input)?;
    let totals = group_totals(&input, options.trailing_group)?;
    Report::compute(&totals, options)
}
