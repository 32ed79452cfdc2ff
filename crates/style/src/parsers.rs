//! Low-level nom parsers for style values.

use crate::dimension::Edges;
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{space0, space1};
use nom::combinator::{all_consuming, map, opt, value};
use nom::multi::separated_list1;
use nom::number::complete::float;
use nom::sequence::{delimited, pair};
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

/// Scale factor from a unit suffix to points.
fn unit(input: &str) -> IResult<&str, f32> {
    alt((
        value(1.0, tag_no_case("pt")),
        value(1.0, tag_no_case("px")),
        value(72.0, tag_no_case("in")),
        value(28.35, tag_no_case("cm")),
        value(2.835, tag_no_case("mm")),
    ))
    .parse(input)
}

/// A length with an optional unit (e.g. "10pt", "5mm", "12"). Bare numbers are points.
pub fn length(input: &str) -> IResult<&str, f32> {
    map(pair(float, opt(unit)), |(v, scale)| v * scale.unwrap_or(1.0)).parse(input)
}

pub fn parse_length(input: &str) -> Result<f32, StyleParseError> {
    run_parser(delimited(space0, length, space0), input)
}

/// Parses CSS edge shorthand: one to four lengths separated by spaces.
pub fn parse_edges(input: &str) -> Result<Edges, StyleParseError> {
    let values = run_parser(
        delimited(space0, separated_list1(space1, length), space0),
        input,
    )?;
    Edges::from_values(&values).map_err(|e| StyleParseError::InvalidValue {
        property: "edges".to_string(),
        value: e,
    })
}

/// Helper to run a nom parser over the whole input and convert its result.
fn run_parser<'a, O, P>(parser: P, input: &'a str) -> Result<O, StyleParseError>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    all_consuming(parser)
        .parse(input)
        .map(|(_, out)| out)
        .map_err(|e| StyleParseError::Parse(format!("'{}': {}", input, e)))
}
