//! Fixtures written in the puzzle's own notation, for example
//! `on x=-20..26,y=-36..17,z=-47..7`.
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, recognize},
    sequence::{delimited, preceded, separated_pair, tuple},
    IResult,
};
use tracing_subscriber::prelude::*;

use crate::cuboid::Cuboid;
use crate::reboot::RebootStep;

fn i32_parser(input: &str) -> IResult<&str, i32> {
    map_res(
        recognize(tuple((opt(char('-')), digit1))),
        FromStr::from_str,
    )(input)
}

fn parse_range(input: &str) -> IResult<&str, (i32, i32)> {
    separated_pair(i32_parser, tag(".."), i32_parser)(input)
}

fn parse_cuboid(input: &str) -> IResult<&str, Cuboid> {
    map_res(
        tuple((
            delimited(tag("x="), parse_range, tag(",")),
            delimited(tag("y="), parse_range, tag(",")),
            preceded(tag("z="), parse_range),
        )),
        |((x1, x2), (y1, y2), (z1, z2))| Cuboid::new(x1..=x2, y1..=y2, z1..=z2),
    )(input)
}

fn parse_on_off(input: &str) -> IResult<&str, bool> {
    alt((map(tag("on"), |_| true), map(tag("off"), |_| false)))(input)
}

fn parse_step(input: &str) -> IResult<&str, RebootStep> {
    map(
        separated_pair(parse_on_off, tag(" "), parse_cuboid),
        |(on, c)| {
            if on {
                RebootStep::On(c)
            } else {
                RebootStep::Off(c)
            }
        },
    )(input)
}

fn complete<T>(s: &str, result: IResult<&str, T>) -> T {
    match result {
        Ok(("", value)) => value,
        Ok((tail, _)) => panic!("not matched in '{}': '{}'", s, tail),
        Err(e) => panic!("failed to parse '{}': {}", s, e),
    }
}

pub fn cuboid(s: &str) -> Cuboid {
    complete(s, parse_cuboid(s))
}

pub fn step(s: &str) -> RebootStep {
    complete(s, parse_step(s))
}

pub fn steps(lines: &[&str]) -> Vec<RebootStep> {
    lines.iter().map(|line| step(line)).collect()
}

/// Send tracing output to the test harness.  The filter comes from
/// RUST_LOG, defaulting to "info".
pub fn init_logging() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .expect("the fallback log filter should be valid");
    // Another test may already have installed the subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}

#[test]
fn test_parse_step() {
    assert_eq!(
        parse_step("on x=-54112..-39298,y=-85059..-49293,z=-27449..7877"),
        Ok((
            "",
            RebootStep::On(
                Cuboid::new(-54112..=-39298, -85059..=-49293, -27449..=7877).unwrap()
            )
        ))
    );
    assert_eq!(
        step("off x=1..1,y=2..2,z=3..3"),
        RebootStep::Off(Cuboid::new(1..=1, 2..=2, 3..=3).unwrap())
    );
}

#[test]
fn test_parse_rejects_inverted_range() {
    assert!(parse_cuboid("x=5..4,y=0..0,z=0..0").is_err());
}
