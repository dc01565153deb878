//! Core use-case services.
//!
//! # Responsibility
//! - Own the store object every caller goes through.
//! - Provide the caller-facing flows built on it (save, deep links, widget
//!   feed) without exposing storage details.

pub mod deep_link;
pub mod note_store;
pub mod widget_feed;
