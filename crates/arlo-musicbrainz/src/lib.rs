// SPDX-License-Identifier: GPL-3.0-or-later

//! MusicBrainz artist lookup.
//!
//! The core of this crate is [`ArtistLookup`], a search-as-you-type friendly
//! wrapper around [`MusicBrainzClient`] that puts a leading-edge [`Throttle`]
//! in front of the network call, so a caller can invoke it on every keystroke
//! without flooding the MusicBrainz web service.

pub mod client;
pub mod error;
pub mod lookup;
pub mod models;
pub mod notify;
pub mod throttle;

pub use client::MusicBrainzClient;
pub use error::{LookupError, Result};
pub use lookup::ArtistLookup;
pub use models::{ArtistRecord, LookupResponse, SearchQuery};
pub use notify::{FailureNotifier, TracingNotifier};
pub use throttle::Throttle;
