//! Regex-redux benchmark: DNA variant counting and IUB code substitution.

use std::borrow::Cow;
use std::fmt;
use std::io::Read;
use std::path::Path;

use itertools::Itertools;
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};
use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};

/// Header lines and line breaks, removed before matching.
pub const STRIP_PATTERN: &str = r">.*\n|\n";

/// Variant patterns, matched case-insensitively in this order.
pub const VARIANTS: [&str; 11] = [
    "agggtaaa|tttaccct",
    "aggggtaaaa|tttacccct",
    "agggggtaaaaa|tttaacccct",
    "[cgt]gggtaaa|tttaccc[acg]",
    "a[act]ggtaaa|tttacc[agt]t",
    "ag[act]gtaaa|tttac[agt]ct",
    "agg[act]taaa|ttta[agt]cct",
    "aggg[acg]aaa|ttt[cgt]ccct",
    "agggt[cgt]aa|tt[acg]accct",
    "agggta[cgt]a|t[acg]taccct",
    "agggtaa[cgt]|[acg]ttaccct",
];

/// Substitutions applied in sequence, case-sensitively.
pub const SUBSTITUTIONS: [(&str, &str); 5] = [
    ("tHa[Nt]", "<4>"),
    ("aND|caN|Ha[DS]|WaS", "<3>"),
    ("a[NSt]|BY", "<2>"),
    ("<[^>]*>", "|"),
    (r"\|[^|][^|]*\|", "-"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexReport {
    /// `(pattern, match count)` in declaration order
    pub counts: Vec<(&'static str, usize)>,
    pub initial_length: usize,
    pub code_length: usize,
    pub result_length: usize,
}

impl fmt::Display for RegexReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self
            .counts
            .iter()
            .map(|(pattern, count)| format!("{} {}", pattern, count))
            .join("\n");
        writeln!(f, "{}", counts)?;
        writeln!(f)?;
        writeln!(f, "{}", self.initial_length)?;
        writeln!(f, "{}", self.code_length)?;
        write!(f, "{}", self.result_length)
    }
}

/// Compiled pattern set for one or more runs.
#[derive(Debug, Clone)]
pub struct RegexRedux {
    strip: Regex,
    variants: Vec<(&'static str, Regex)>,
    substitutions: Vec<(Regex, &'static str)>,
}

impl RegexRedux {
    pub fn new() -> ApplicationResult<Self> {
        let strip = Regex::new(STRIP_PATTERN)?;
        let variants = VARIANTS
            .iter()
            .map(|&pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|re| (pattern, re))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let substitutions = SUBSTITUTIONS
            .iter()
            .map(|&(pattern, replacement)| Regex::new(pattern).map(|re| (re, replacement)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            strip,
            variants,
            substitutions,
        })
    }

    /// Remove header lines and newlines.
    pub fn strip<'a>(&self, input: &'a str) -> Cow<'a, str> {
        self.strip.replace_all(input, "")
    }

    /// Non-overlapping match count of every variant, in declaration order.
    pub fn count_variants(&self, sequence: &str, parallel: bool) -> Vec<(&'static str, usize)> {
        let count = |(pattern, re): &(&'static str, Regex)| (*pattern, re.find_iter(sequence).count());
        if parallel {
            self.variants.par_iter().map(count).collect()
        } else {
            self.variants.iter().map(count).collect()
        }
    }

    /// Apply every substitution in order.
    pub fn substitute(&self, sequence: &str) -> String {
        self.substitutions
            .iter()
            .fold(sequence.to_string(), |acc, (re, replacement)| {
                re.replace_all(&acc, *replacement).into_owned()
            })
    }

    #[instrument(level = "debug", skip(self, input), fields(len = input.len()))]
    pub fn run(&self, input: &str, parallel: bool) -> RegexReport {
        let sequence = self.strip(input);
        debug!(code_length = sequence.len(), "stripped");
        let counts = self.count_variants(&sequence, parallel);
        let result = self.substitute(&sequence);
        RegexReport {
            counts,
            initial_length: input.len(),
            code_length: sequence.len(),
            result_length: result.len(),
        }
    }
}

/// Read benchmark input from `path`, or stdin when absent.
pub fn read_input(path: Option<&Path>) -> ApplicationResult<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_path_context("read input", path),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .with_context("read stdin")?;
            Ok(input)
        }
    }
}
