//! Story assembly for TextTale.
//!
//! This crate turns a validated story request into finished scenes:
//!
//! - [`ScenePlanner`] lays out the scene texts for a style and length
//! - [`CharacterComposer`] builds the cast and its introduction
//! - [`Orchestrator`] fans speech and ambient synthesis out over a bounded worker
//!   pool and merges the results back in scene order
//! - [`StoryService`] ties the three together for the HTTP layer
//!
//! Audio failures never fail a story; a scene whose clip could not be produced
//! simply carries an empty URL.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod composer;
mod orchestrator;
mod planner;
mod service;

pub use composer::{Cast, CharacterComposer};
pub use orchestrator::{Orchestrator, OrchestratorConfig, OrchestratorConfigBuilder, merge_results};
pub use planner::{ScenePlanner, base_beat, structure};
pub use service::StoryService;
