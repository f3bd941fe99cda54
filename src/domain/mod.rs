// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value types shared by the blocks.
//!
//! This module contains plain data types and the rules that belong to them.
//! Apart from `serde` derives for the configuration and payload contracts,
//! it has no dependencies on external crates.
//!
//! # Modules
//!
//! - [`locale`]: Locale table types ([`LocaleEntry`](locale::LocaleEntry),
//!   [`LocaleTable`](locale::LocaleTable), [`ResolvedLocale`](locale::ResolvedLocale))
//! - [`offer`]: Offers API types ([`OfferQuery`](offer::OfferQuery),
//!   [`Offer`](offer::Offer), [`FallbackRoutes`](offer::FallbackRoutes))
//! - [`slot`]: Slot animation types ([`SlotConfig`](slot::SlotConfig),
//!   [`AnimationState`](slot::AnimationState), [`ReelStyle`](slot::ReelStyle))

pub mod locale;
pub mod offer;
pub mod slot;
