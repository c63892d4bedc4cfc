//! Quote and collection types

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A short text quote, identified by its text alone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    /// Build a quote, rejecting blank text or category
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Result<Self, ValidationError> {
        let quote = Self {
            text: text.into(),
            category: category.into(),
        };
        quote.validate()?;
        Ok(quote)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::MissingText);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Ok(())
    }
}

/// Ordered quotes with no two entries sharing `text`
///
/// Every constructor enforces the invariant. There is no `Deserialize`;
/// persisted data goes through [`Collection::from_quotes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Collection {
    quotes: Vec<Quote>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection keeping the first valid occurrence of each text
    pub fn from_quotes<I: IntoIterator<Item = Quote>>(quotes: I) -> Self {
        let mut collection = Self::new();
        for quote in quotes {
            if quote.validate().is_ok() {
                collection.push(quote);
            }
        }
        collection
    }

    /// The built-in seed collection used when nothing is persisted
    pub fn seed() -> Self {
        Self {
            quotes: vec![
                Quote {
                    text: "The only limit to our realization of tomorrow is our doubts of today."
                        .to_string(),
                    category: "Motivation".to_string(),
                },
                Quote {
                    text: "Life is what happens when you're busy making other plans.".to_string(),
                    category: "Life".to_string(),
                },
            ],
        }
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.quotes.iter().any(|q| q.text == text)
    }

    pub fn get(&self, text: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.text == text)
    }

    /// Append a quote unless its text is already present
    ///
    /// Returns `false` for a duplicate.
    pub fn push(&mut self, quote: Quote) -> bool {
        if self.contains_text(&quote.text) {
            return false;
        }
        self.quotes.push(quote);
        true
    }

    pub fn texts(&self) -> HashSet<&str> {
        self.quotes.iter().map(|q| q.text.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.quotes.iter()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn as_slice(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn into_vec(self) -> Vec<Quote> {
        self.quotes
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}
