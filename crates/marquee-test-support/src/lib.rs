#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    clippy::all,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Shared test helpers used across the Marquee crates.
//! Layout: fixtures.rs (canned backend payloads shaped like the catalogue API).

pub mod fixtures;
