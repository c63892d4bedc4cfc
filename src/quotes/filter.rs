//! Read-only category views over a collection

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::{Collection, Quote};

/// Sentinel value meaning "no filter"
pub const ALL_CATEGORIES: &str = "all";

/// Category filter as chosen in the dropdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => quote.category == *category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Category(category) => category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

/// Quotes matching `filter`, in collection order
pub fn filtered(collection: &Collection, filter: &CategoryFilter) -> Vec<Quote> {
    collection.iter().filter(|q| filter.matches(q)).cloned().collect()
}

/// Distinct categories in first-seen order
pub fn unique_categories(collection: &Collection) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for quote in collection {
        if !categories.contains(&quote.category) {
            categories.push(quote.category.clone());
        }
    }
    categories
}

/// Pick a random quote from the filtered view
pub fn pick_random<R: Rng + ?Sized>(
    collection: &Collection,
    filter: &CategoryFilter,
    rng: &mut R,
) -> Option<Quote> {
    let candidates = filtered(collection, filter);
    candidates.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Collection {
        Collection::from_quotes(vec![
            Quote::new("a", "Life").unwrap(),
            Quote::new("b", "Motivation").unwrap(),
            Quote::new("c", "Life").unwrap(),
        ])
    }

    #[test]
    fn test_filter_all_returns_everything() {
        assert_eq!(filtered(&sample(), &CategoryFilter::All).len(), 3);
    }

    #[test]
    fn test_default_is_all() {
        assert_eq!(CategoryFilter::default(), CategoryFilter::All);
        assert_eq!(CategoryFilter::default().as_str(), ALL_CATEGORIES);
    }

    #[test]
    fn test_filter_by_category() {
        let life = filtered(&sample(), &CategoryFilter::Category("Life".to_string()));
        let texts: Vec<&str> = life.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn test_unique_categories_first_seen_order() {
        assert_eq!(unique_categories(&sample()), vec!["Life", "Motivation"]);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!(CategoryFilter::from("all".to_string()), CategoryFilter::All);
        assert_eq!(CategoryFilter::from(String::new()), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from("Life".to_string()),
            CategoryFilter::Category("Life".to_string())
        );
        assert_eq!(String::from(CategoryFilter::All), "all");
    }

    #[test]
    fn test_pick_random_respects_filter() {
        let mut rng = StdRng::seed_from_u64(7);
        let filter = CategoryFilter::Category("Motivation".to_string());

        for _ in 0..10 {
            let quote = pick_random(&sample(), &filter, &mut rng).unwrap();
            assert_eq!(quote.text, "b");
        }
    }

    #[test]
    fn test_pick_random_empty_view() {
        let mut rng = StdRng::seed_from_u64(7);
        let filter = CategoryFilter::Category("Unknown".to_string());
        assert!(pick_random(&sample(), &filter, &mut rng).is_none());
    }
}
