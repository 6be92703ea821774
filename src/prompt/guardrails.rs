//! Guardrail lookup tables keyed by theme and glitch tier.
//!
//! Immutable configuration initialized at compile time; access is read-only
//! and side-effect-free. An unrecognized theme degrades to the generic
//! entry rather than failing prompt construction.

use crate::glitch::GlitchTier;

const GENERIC_GUARDRAIL: &str = "Keep every change plausible for an American Great Lakes city: \
     realistic materials, weathering, and infrastructure. Avoid fantasy \
     architecture, alien technology, and anything that reads as concept art \
     rather than a photograph.";

/// Theme-specific stylistic boundaries injected into the world prompt.
pub fn theme_guardrail(theme: &str) -> &'static str {
    match theme.trim() {
        "Climate-Adaptive Waterfront" => {
            "Show flood-resilient engineering: raised promenades, wetland buffers, \
             breakwaters, amphibious walkways. Avoid disaster-movie destruction, \
             sci-fi debris, and submerged-ruin imagery; this is adaptation, not collapse."
        }
        "Industrial Revival" => {
            "Reactivate Buffalo's steel and grain-elevator heritage: working cranes, \
             refurbished brick, new industry grafted onto old bones. Avoid \
             abandoned-ruin cliches and steampunk ornamentation."
        }
        "Bills Dynasty City" => {
            "Celebratory civic energy: banners, crowds in red and blue, game-day \
             atmosphere woven into ordinary streets. Keep all signage and jerseys \
             unreadable; no real logos or wordmarks."
        }
        "Retro-Futurism 1980s" => {
            "A 1980s vision of the future built with period-plausible materials: \
             geometric concrete, tinted glass, boxy vehicles, sodium-vapor light. \
             Avoid cyberpunk neon drift, chrome excess, and holograms."
        }
        "Tech Boom Buffalo" => {
            "Glass-and-timber infill among the brick, campus plazas, dense transit, \
             prosperous street life. Avoid a generic Silicon Valley look and \
             avoid sci-fi megastructures; growth stays grounded in the existing city."
        }
        "Post-Snowpocalypse Survival" => {
            "Heavy lake-effect snow adapted into daily life: snow tunnels, elevated \
             walkways, plow infrastructure, warm light in deep winter. Avoid \
             apocalyptic ruin, frozen-wasteland despair, and sci-fi debris."
        }
        "Utopian Transit Era" => {
            "Light rail and pedestrianized streets stitched through the landmarks, \
             generous public space, working catenary and platforms. Avoid monorail \
             sci-fi cliches and fantasy vehicles."
        }
        _ => GENERIC_GUARDRAIL,
    }
}

/// Tier-specific guidance for how strongly visual distortion language may
/// appear. Always constrained to camera-realistic artifacts; fantastical
/// transformations are excluded at every tier.
pub fn tier_guardrail(tier: GlitchTier) -> &'static str {
    match tier {
        GlitchTier::Minor => {
            "Glitch presence is sparing and easy to miss: faint chromatic \
             aberration at high-contrast edges, the slightest ghosting, a touch \
             of sensor noise in shadows. A casual viewer might not notice \
             anything wrong. Only camera-realistic artifacts; no fantastical \
             transformations of the scene."
        }
        GlitchTier::Unstable => {
            "Glitch presence is clearly visible but controlled: chromatic \
             aberration, double-exposure ghosting on moving elements, scanline \
             shimmer, visible sensor noise. The scene itself stays physically \
             coherent. Only camera-realistic artifacts; no fantastical \
             transformations of the scene."
        }
        GlitchTier::Chaotic => {
            "Glitch presence is strong and dramatic: heavy chromatic aberration, \
             layered ghosting, smeared motion trails, pronounced sensor noise and \
             tearing at the frame edges. Still a photograph of a real place; \
             only camera-realistic artifacts, never fantastical transformations \
             of the scene."
        }
    }
}
