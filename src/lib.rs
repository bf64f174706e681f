//! A Monte Carlo projection engine for football fixtures. Blends multi-source team
//! statistics into canonical attack/defence profiles, adjusts them for context
//! (league strength, boosters, home advantage, head-to-head history), and simulates
//! independent Poisson scoring processes to derive goal, corner, shot and
//! betting-market probabilities.

#![allow(clippy::too_many_arguments)]

pub mod adjust;
pub mod blend;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod market;
pub mod poisson;
pub mod print;
pub mod profile;
pub mod sim;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
