use std::num::IntErrorKind;

use crate::core::error::{ExtractError, Result};

/// Pages requested from a PDF, as 1-based numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    #[default]
    All,
    Only(Vec<i64>),
}

impl PageSelection {
    /// Parses a comma separated list such as `"1, 3,5"`. A blank list
    /// selects every page; any token that is not an integer is an error.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Self::All);
        }

        let pages = input
            .split(',')
            .map(parse_page)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::Only(pages))
    }

    /// Zero-based page indices to visit, in request order. Pages outside
    /// `1..=page_count` are dropped and repeats are visited once.
    pub fn resolve(&self, page_count: usize) -> Vec<usize> {
        match self {
            Self::All => (0..page_count).collect(),
            Self::Only(pages) => {
                let mut indices = Vec::with_capacity(pages.len());
                for &page in pages {
                    let Ok(page) = usize::try_from(page) else {
                        continue;
                    };
                    if page == 0 || page > page_count {
                        continue;
                    }
                    if !indices.contains(&(page - 1)) {
                        indices.push(page - 1);
                    }
                }
                indices
            }
        }
    }
}

/// Integers too large for `i64` saturate; they can never name a real page
/// and are dropped by `resolve` like any other out-of-range number.
fn parse_page(token: &str) -> Result<i64> {
    let token = token.trim();
    match token.parse::<i64>() {
        Ok(page) => Ok(page),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(ExtractError::InvalidPages(token.to_string())),
        },
    }
}
