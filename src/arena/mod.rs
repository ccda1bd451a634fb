//! Arena and tournament flow
//!
//! The arena owns the knight queue, the catalog and the gold pot. Rounds are
//! fought here; the vendor and healer are the between-round services.

pub mod healer;
pub mod tournament;
pub mod vendor;

pub use healer::{HealOffer, HealTier};
pub use tournament::{grow_pot, Arena, RoundOutcome, RoundReport};
