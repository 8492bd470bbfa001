//! Writing Session - controlled writing-experiment runner
//!
//! Guides one participant through a fixed sequence of timed and untimed
//! writing, reflection, and survey phases, and produces a single exportable
//! record of everything they wrote and how long each phase took.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
