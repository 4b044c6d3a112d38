//! Collection rows (added and wanted coins) and their write inputs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::validation::ValidationError;

const MAX_GRADE_LENGTH: usize = 32;
const MAX_COMMENT_LENGTH: usize = 1000;

/// A user's owned instance of a catalog coin (added_coin_view row)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AddedCoin {
    pub added_coin_id: i32,
    pub username: String,
    pub coin_id: i32,
    pub country: String,
    pub name: String,
    pub denomination: String,
    pub issue_year: i32,
    pub mintage_id: Option<i32>,
    pub mint_mark: Option<String>,
    pub grade: Option<String>,
    pub value: Option<f64>,
    pub amount: i32,
    pub comment: Option<String>,
    pub swap: bool,
    pub added_at: DateTime<Utc>,
}

/// A catalog coin a user wants (wanted_coin_view row)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WantedCoin {
    pub wanted_coin_id: i32,
    pub username: String,
    pub coin_id: i32,
    pub country: String,
    pub name: String,
    pub denomination: String,
    pub issue_year: i32,
    pub created_at: DateTime<Utc>,
}

/// Editable metadata of an added coin.
///
/// `None` means "not submitted": inserts use the column default, updates
/// keep the stored value. An empty grade or comment clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinDetails {
    pub grade: Option<String>,
    pub value: Option<f64>,
    pub amount: Option<i32>,
    pub comment: Option<String>,
    pub swap: Option<bool>,
}

impl CoinDetails {
    pub fn new(
        grade: Option<&str>,
        value: Option<f64>,
        amount: Option<i32>,
        comment: Option<&str>,
        swap: Option<bool>,
    ) -> Result<Self, ValidationError> {
        let grade = grade.map(|g| limited("grade", g, MAX_GRADE_LENGTH)).transpose()?;
        let comment = comment
            .map(|c| limited("comment", c, MAX_COMMENT_LENGTH))
            .transpose()?;

        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: "value",
                    value: v.to_string(),
                });
            }
        }

        if let Some(a) = amount {
            if a < 1 {
                return Err(ValidationError::InvalidValue {
                    field: "amount",
                    value: a.to_string(),
                });
            }
        }

        Ok(Self {
            grade,
            value,
            amount,
            comment,
            swap,
        })
    }
}

fn limited(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// Input for `add_coin`
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddedCoin {
    pub coin_id: i32,
    pub mintage_id: Option<i32>,
    pub details: CoinDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_accept_absent_fields() {
        let details = CoinDetails::new(None, None, None, None, None).unwrap();
        assert_eq!(details, CoinDetails::default());
    }

    #[test]
    fn details_trim_text() {
        let details =
            CoinDetails::new(Some(" XF "), Some(2.5), Some(3), Some(" from grandpa "), Some(true))
                .unwrap();
        assert_eq!(details.grade.as_deref(), Some("XF"));
        assert_eq!(details.comment.as_deref(), Some("from grandpa"));
        assert_eq!(details.amount, Some(3));
        assert_eq!(details.swap, Some(true));
    }

    #[test]
    fn empty_grade_is_kept_as_clear_marker() {
        let details = CoinDetails::new(Some(""), None, None, None, None).unwrap();
        assert_eq!(details.grade.as_deref(), Some(""));
    }

    #[test]
    fn details_reject_bad_numbers() {
        assert!(CoinDetails::new(None, Some(-1.0), None, None, None).is_err());
        assert!(CoinDetails::new(None, Some(f64::NAN), None, None, None).is_err());
        assert!(CoinDetails::new(None, None, Some(0), None, None).is_err());
    }

    #[test]
    fn details_reject_long_comment() {
        let long = "c".repeat(MAX_COMMENT_LENGTH + 1);
        assert!(matches!(
            CoinDetails::new(None, None, None, Some(&long), None),
            Err(ValidationError::TooLong { field: "comment", .. })
        ));
    }
}
