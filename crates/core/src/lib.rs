//! Domain model for the custom-jewelry catalog viewer.
//!
//! Everything in this crate is pure: record types mirroring the remote
//! data API, join and ordering rules between items and versions, media
//! categorisation, the media-tab policy, and the serializable view state
//! that the resolution pipeline drives through its transitions.

pub mod error;
pub mod item;
pub mod media;
pub mod order;
pub mod spec_fields;
pub mod tabs;
pub mod types;
pub mod version;
pub mod view;
