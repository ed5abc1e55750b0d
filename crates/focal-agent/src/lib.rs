//! # focal-agent
//!
//! Turns tasks and search results into prompts and runs them through a
//! [`focal_llm::ChatProvider`]: per-task plan generation with a strict
//! JSON contract, dashboard insights over tasks plus file hits, and a
//! one-shot analysis prompt for downloaded Drive documents.

#![deny(unsafe_code)]

pub mod drive_analysis;
pub mod insights;
pub mod plan;

pub use drive_analysis::{analyze_document, build_analysis_prompt};
pub use insights::{InsightsInput, build_insights_prompt, generate_insights};
pub use plan::{PlanResult, generate_task_plan};
