//! # Engine Module
//!
//! The stateful Monte Carlo machinery. A [`simulation::Simulation`] owns the live
//! [`DensityState`](crate::core::density::DensityState), a single random number generator,
//! and two strategies: a [`proposer::MoveProposer`] that suggests one particle hop per step
//! and an [`acceptance::AcceptanceRule`] that decides whether to commit it.
//!
//! - **Configuration** ([`config`]) - Temperature, iteration budget and seed
//! - **Move Proposal** ([`proposer`]) - Particle-weighted hop selection with boundary handling
//! - **Acceptance** ([`acceptance`]) - The Metropolis criterion
//! - **State Tracking** ([`state`]) - Lifecycle phases, per-step outcomes, run statistics
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Configuration and misuse errors

pub mod acceptance;
pub mod config;
pub mod error;
pub mod progress;
pub mod proposer;
pub mod simulation;
pub mod state;
