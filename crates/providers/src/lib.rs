//! Providers: organizations and community members who donate or sell items.
//!
//! A provider collects lots as it records items, then hands them to the
//! inventory in one transfer.

pub mod provider;

pub use provider::{NewItem, Provider, ProviderInfo, ProviderKind};
