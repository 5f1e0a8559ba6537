//! Command handlers grouped by screen.

pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod catalogue;
pub(crate) mod genres;
pub(crate) mod search;
