//! Prompt Construction
//!
//! Pure builders for the two upstream calls: the world-state instruction
//! sent to the text model and the per-landmark prompts sent to the image
//! model. Same input always yields the same output string, which is what
//! makes golden-prompt tests possible. No I/O happens here.

mod guardrails;
mod image;
mod world;

pub use guardrails::{theme_guardrail, tier_guardrail};
pub use image::build_image_prompt;
pub use world::build_world_prompt;
