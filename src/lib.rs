//! Movie search backend for a browser widget.
//!
//! Searches the TMDB catalogue (free text, random discovery, weekly trending), enriches every
//! result with the flat-rate streaming providers for one region, and hands back render-ready
//! cards. Provider lookups run concurrently per batch and never fail the batch.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
