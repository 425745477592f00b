//! Scheduled-trip search server.
//!
//! A web application that answers: "what runs between these two stops
//! on this date, and what does it cost?"

pub mod cache;
pub mod catalog;
pub mod directory;
pub mod domain;
pub mod fares;
pub mod geometry;
pub mod search;
pub mod seatmap;
pub mod web;
