//! MTR next-train arrival board.
//!
//! Answers: "When are the next trains at this station, on every line that
//! serves it?" One lookup fans out to the Next Train API once per line and
//! merges the answers into a single board.

pub mod board;
pub mod config;
pub mod console;
pub mod domain;
pub mod mtr;
pub mod stations;
pub mod web;
