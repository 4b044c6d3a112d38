//! Domain models with validation at construction
//!
//! Row types mirror the views returned by the stored procedures.
//! Input types validate user input when created; invalid input
//! returns ValidationError, not panic.

pub mod coin;
pub mod collection;
pub mod session;
pub mod swap;
pub mod validation;

pub use coin::{Coin, CoinMintage, CountrySummary, SearchTerm};
pub use collection::{AddedCoin, CoinDetails, NewAddedCoin, WantedCoin};
pub use session::{Credentials, SessionInfo, SessionToken, SignUp};
pub use swap::{NewSwap, SwapKind, SwapOffer, SwapOfferCoin, SwapStatus};
pub use validation::ValidationError;
