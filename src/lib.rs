//! Cached translation of site content (journeys, sages, ashrams, blog posts)
//! into visitors' display languages.

pub mod api;
pub mod config;
pub mod db;
pub mod i18n;
pub mod security;
pub mod translation;
