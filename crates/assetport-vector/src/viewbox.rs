//! `viewBox` parsing.

use assetport_core::ConvertError;
use nom::{
    branch::alt,
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, recognize},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, tuple},
    IResult,
};

/// The four components of an SVG `viewBox`.
///
/// `min_x`/`min_y` are parsed but not applied: VectorDrawable viewports always
/// start at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// `0 0 width height`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height,
        }
    }

    /// Parse `min-x min-y width height`, separated by whitespace and/or commas.
    pub fn parse(text: &str) -> Result<Self, ConvertError> {
        let invalid = || ConvertError::InvalidViewBox {
            value: text.to_string(),
        };
        let (_, numbers) = all_consuming(number_list)(text).map_err(|_| invalid())?;
        match numbers.as_slice() {
            &[min_x, min_y, width, height]
                if numbers.iter().all(|n| n.is_finite()) && width > 0.0 && height > 0.0 =>
            {
                Ok(Self {
                    min_x,
                    min_y,
                    width,
                    height,
                })
            }
            _ => Err(invalid()),
        }
    }
}

fn separator(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(tuple((multispace0, char(','), multispace0))),
        multispace1,
    ))(input)
}

fn number_list(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(multispace0, separated_list1(separator, double), multispace0)(input)
}
