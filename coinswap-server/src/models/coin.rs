//! Catalog rows and search input

use serde::Serialize;
use sqlx::FromRow;

use super::validation::{bounded_text, ValidationError};

/// Maximum length of a catalog search term
const MAX_SEARCH_LENGTH: usize = 100;

/// Catalog coin
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Coin {
    pub coin_id: i32,
    pub country: String,
    pub name: String,
    pub denomination: String,
    pub issue_year: i32,
    pub material: Option<String>,
    pub diameter_mm: Option<f32>,
    pub weight_g: Option<f32>,
    pub description: Option<String>,
}

/// Mintage of a catalog coin (year + mint mark)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CoinMintage {
    pub mintage_id: i32,
    pub coin_id: i32,
    pub year: i32,
    pub mint_mark: String,
    pub quantity: Option<i64>,
}

/// Country with the number of catalog coins it issued
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CountrySummary {
    pub country: String,
    pub coin_count: i64,
}

/// Validated free-text catalog search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        bounded_text("q", raw, MAX_SEARCH_LENGTH).map(Self)
    }

    /// ILIKE pattern matching the term anywhere, with wildcards escaped.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_term_trims() {
        let term = SearchTerm::new("  euro ").unwrap();
        assert_eq!(term, SearchTerm("euro".to_string()));
        assert_eq!(term.like_pattern(), "%euro%");
    }

    #[test]
    fn search_term_escapes_wildcards() {
        let term = SearchTerm::new("100%_off\\").unwrap();
        assert_eq!(term.like_pattern(), "%100\\%\\_off\\\\%");
    }

    #[test]
    fn search_term_rejects_blank_and_long() {
        assert!(SearchTerm::new("   ").is_err());
        assert!(SearchTerm::new(&"a".repeat(101)).is_err());
    }
}
