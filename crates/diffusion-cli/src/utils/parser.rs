use diffusion_mc::core::density::RawEntry;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Entry {index} of the density list is empty.")]
    EmptyEntry { index: usize },

    #[error("Entry {index} of the density list ('{token}') is not a number.")]
    InvalidNumber { index: usize, token: String },
}

/// Parses a comma-separated density such as `0,0,3,5` or `[0, 0, 3, 5]`.
///
/// Integers and floats are both accepted here; rejecting floats is left to density
/// validation so the user gets the same error as any other caller.
pub fn parse_density_list(input: &str) -> Result<Vec<RawEntry>, ParseError> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed)
        .trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    body.split(',')
        .enumerate()
        .map(|(index, token)| parse_entry(index, token.trim()))
        .collect()
}

fn parse_entry(index: usize, token: &str) -> Result<RawEntry, ParseError> {
    if token.is_empty() {
        return Err(ParseError::EmptyEntry { index });
    }
    if let Ok(value) = token.parse::<i64>() {
        return Ok(RawEntry::Int(value));
    }
    token
        .parse::<f64>()
        .map(RawEntry::Float)
        .map_err(|_| ParseError::InvalidNumber {
            index,
            token: token.to_string(),
        })
}
