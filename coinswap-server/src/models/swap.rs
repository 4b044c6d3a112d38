//! Swap offers/requests

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::validation::{bounded_text, ValidationError};

/// Maximum coins in a single offer or request
const MAX_COINS_PER_SWAP: usize = 100;
const MAX_MESSAGE_LENGTH: usize = 1000;
const MAX_USERNAME_LENGTH: usize = 64;

/// Direction of a swap record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(type_name = "swap_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SwapKind {
    /// Sender offers their own swap coins to the recipient
    Offer,
    /// Sender asks the recipient for the recipient's swap coins
    Request,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(type_name = "swap_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

/// swap_offer_view row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SwapOffer {
    pub swap_offer_id: i32,
    pub kind: SwapKind,
    pub status: SwapStatus,
    pub sender: String,
    pub recipient: String,
    pub message: Option<String>,
    pub coin_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// swap_offer_coin_view row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SwapOfferCoin {
    pub swap_offer_id: i32,
    pub added_coin_id: i32,
    pub owner: String,
    pub coin_id: i32,
    pub country: String,
    pub name: String,
    pub denomination: String,
    pub issue_year: i32,
    pub grade: Option<String>,
    pub amount: i32,
    pub wanted_coin_id: Option<i32>,
}

/// Input for `create_swap_offer` / `create_swap_request`
#[derive(Debug, Clone, PartialEq)]
pub struct NewSwap {
    pub kind: SwapKind,
    /// Recipient of an offer, or owner of the requested coins
    pub counterpart: String,
    /// Distinct added-coin ids, in submission order
    pub added_coin_ids: Vec<i32>,
    pub message: Option<String>,
}

impl NewSwap {
    pub fn new(
        kind: SwapKind,
        counterpart: &str,
        added_coin_ids: Vec<i32>,
        message: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let field = match kind {
            SwapKind::Offer => "recipient",
            SwapKind::Request => "owner",
        };
        let counterpart = bounded_text(field, counterpart, MAX_USERNAME_LENGTH)?;

        if added_coin_ids.len() > MAX_COINS_PER_SWAP {
            return Err(ValidationError::InvalidValue {
                field: "addedCoinIds",
                value: format!(
                    "{} coins (at most {})",
                    added_coin_ids.len(),
                    MAX_COINS_PER_SWAP
                ),
            });
        }
        let mut seen = HashSet::with_capacity(added_coin_ids.len());
        let ids: Vec<i32> = added_coin_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();
        if ids.is_empty() {
            return Err(ValidationError::Missing {
                field: "addedCoinIds",
            });
        }

        let message = match message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(m) if m.chars().count() > MAX_MESSAGE_LENGTH => {
                return Err(ValidationError::TooLong {
                    field: "message",
                    max: MAX_MESSAGE_LENGTH,
                })
            }
            other => other.map(str::to_string),
        };

        Ok(Self {
            kind,
            counterpart,
            added_coin_ids: ids,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_removed_in_order() {
        let swap = NewSwap::new(SwapKind::Offer, "bob", vec![7, 3, 7, 9, 3], None).unwrap();
        assert_eq!(swap.added_coin_ids, vec![7, 3, 9]);
    }

    #[test]
    fn requires_coins_and_counterpart() {
        assert_eq!(
            NewSwap::new(SwapKind::Offer, "bob", vec![], None).unwrap_err(),
            ValidationError::Missing {
                field: "addedCoinIds"
            }
        );
        assert_eq!(
            NewSwap::new(SwapKind::Request, " ", vec![1], None).unwrap_err(),
            ValidationError::Empty { field: "owner" }
        );
    }

    #[test]
    fn blank_message_is_none() {
        let swap = NewSwap::new(SwapKind::Request, "carol", vec![1], Some("   ")).unwrap();
        assert_eq!(swap.message, None);
    }

    #[test]
    fn too_many_coins() {
        let ids = (1..=101).collect();
        assert!(matches!(
            NewSwap::new(SwapKind::Offer, "bob", ids, None),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn oversized_list_rejected_before_dedup() {
        let started = std::time::Instant::now();
        let ids = (1..=100_000).collect();
        let err = NewSwap::new(SwapKind::Offer, "bob", ids, None).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue {
                field: "addedCoinIds",
                ..
            }
        ));
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SwapKind::Request).unwrap(), "\"request\"");
        assert_eq!(serde_json::to_string(&SwapStatus::Cancelled).unwrap(), "\"cancelled\"");
    }
}
