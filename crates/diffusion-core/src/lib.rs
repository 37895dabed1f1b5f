//! # diffusion-mc Core Library
//!
//! A small, deterministic-when-seeded Monte Carlo engine for one-dimensional diffusion.
//! Discrete particles hop between adjacent positions on a line, and each hop is accepted or
//! rejected by the Metropolis criterion against a pluggable energy functional.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that each concern can be tested in isolation.
//!
//! - **[`core`]: The Foundation.** Stateless data models and pure functions: the validated
//!   particle-count vector (`DensityState`), the `EnergyFunctional` strategy trait with the
//!   standard diffusion energy, and generators for initial density profiles.
//!
//! - **[`engine`]: The Logic Core.** The stateful Monte Carlo machinery: move proposal,
//!   the Metropolis acceptance rule, the `Simulation` state machine, configuration and
//!   progress reporting. Randomness is always an explicit, injectable generator.
//!
//! - **[`workflows`]: The Public API.** Complete procedures that tie `engine` and `core`
//!   together, such as running a seeded simulation while recording frames for a renderer.

pub mod core;
pub mod engine;
pub mod workflows;
