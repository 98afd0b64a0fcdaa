//! Notifier doubles built on the [mockall] mock generated for
//! [`crate::Notifier`].
//!
//! [mockall]: https://docs.rs/mockall/latest/mockall/

mod recording_notifier;

pub use recording_notifier::*;
