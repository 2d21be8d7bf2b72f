//! Categorical label encoding fitted at training time

use serde::{Deserialize, Serialize};

/// Code substituted for categories the encoder never saw
pub const DEFAULT_CATEGORY_CODE: u32 = 0;

/// Result of encoding one categorical value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "code", rename_all = "snake_case")]
pub enum CategoryCode {
    Known(u32),
    /// Unseen during fitting; encodes as [`DEFAULT_CATEGORY_CODE`]
    Unknown,
}

impl CategoryCode {
    pub fn code(&self) -> u32 {
        match self {
            CategoryCode::Known(code) => *code,
            CategoryCode::Unknown => DEFAULT_CATEGORY_CODE,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, CategoryCode::Known(_))
    }
}

/// Maps category strings to their index in the sorted list of fitted classes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit on observed values; classes are sorted and de-duplicated
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes: Vec<String> = values.into_iter().map(|v| v.as_ref().to_string()).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn encode(&self, value: &str) -> CategoryCode {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .ok()
            .and_then(|index| u32::try_from(index).ok())
            .map(CategoryCode::Known)
            .unwrap_or(CategoryCode::Unknown)
    }

    /// Classes must be sorted and unique for `encode` to be correct
    pub fn is_well_formed(&self) -> bool {
        self.classes.windows(2).all(|pair| pair[0] < pair[1])
    }
}
