//! Per-landmark image prompt builder.

use crate::world::WorldState;

/// Fixed negative constraints appended to every image prompt. Ordering is
/// stable so the builder stays byte-deterministic.
const NEGATIVES: [&str; 10] = [
    "no text, no readable signage, no captions, no logos, no watermarks",
    "no borders, no frames, no matte, no mat board, no film frame, no poster layout",
    "no letterboxing, no pillarboxing, no black bars, no white bars, no embedded margins",
    "no vignette, no heavy corner shading, no dark rounded corners",
    "no picture-in-picture, no photo-within-a-photo, no mockup, no gallery framing",
    "no split-screen, no collage, no multiple panels",
    "no extreme wide cinematic bars",
    "no distorted anatomy (avoid extra limbs/faces if people appear)",
    "do not depict NYC/Chicago/Toronto skylines or iconic landmarks from other cities",
    "no flying cars, no sci-fi spacecraft, no fantasy architecture",
];

const DEFAULT_CAMERA_HINT: &str = "street-level view";

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        out.push_str("- ");
        out.push_str(item);
        out.push('\n');
    }
}

/// Derive the image-generation prompt for `world.landmarks[index]`.
///
/// Deterministic over its inputs. Every list sourced from the model has
/// already been defaulted to an empty sequence during deserialization, and
/// a missing camera hint falls back to a street-level view, so a partially
/// malformed but invariant-passing world state never fails here.
pub fn build_image_prompt(world: &WorldState, index: usize) -> String {
    let lm = &world.landmarks[index];
    let camera_hint = lm.camera_hint.as_deref().unwrap_or(DEFAULT_CAMERA_HINT);

    let mut out = String::with_capacity(2048);

    out.push_str(&format!(
        "Generate ONE photorealistic image of {} in Buffalo, New York in the year {}.\n\n",
        lm.name, world.year
    ));

    out.push_str("This image is part of the SAME alternate timeline:\n");
    out.push_str(&format!("Timeline name: {}\n", world.timeline_name));
    out.push_str(&format!("Theme: {}\n\n", world.theme));

    out.push_str("Global style:\n");
    out.push_str(&format!("- Lighting: {}\n", world.global_style.lighting));
    out.push_str(&format!("- Palette: {}\n", world.global_style.palette));
    out.push_str(&format!("- Camera: {}\n", world.global_style.camera));
    out.push_str(&format!("- Mood: {}\n\n", world.global_style.mood));

    out.push_str("Buffalo anchors (must include at least 2-3 as subtle background cues):\n");
    bullets(&mut out, &lm.buffalo_anchors);

    out.push_str("\nRecurring motifs (include a few if relevant):\n");
    bullets(&mut out, &world.motifs);

    out.push_str("\nLandmark identity constraints (must keep):\n");
    bullets(&mut out, &lm.must_keep);

    out.push_str("\nTimeline changes for this landmark (apply plausibly):\n");
    bullets(&mut out, &lm.changes);

    out.push_str("\nCamera hint:\n- ");
    out.push_str(camera_hint);
    out.push('\n');

    out.push_str("\nTimeline glitch:\n");
    out.push_str(&format!(
        "- Level: {} ({})\n",
        world.glitch,
        world.glitch.strength_phrase()
    ));
    out.push_str("- Visual glitch signature (use some, but keep realistic):\n");
    bullets(&mut out, &world.glitch_signature);

    out.push_str("\nFraming & output rules (VERY IMPORTANT):\n");
    out.push_str("- Output ONE single image only.\n");
    out.push_str("- Full-bleed, edge-to-edge scene: the image MUST fill the entire canvas.\n");
    out.push_str("- NO borders of any kind (no black/white borders, no frames, no mats).\n");
    out.push_str("- NO letterboxing or pillarboxing (no black bars).\n");
    out.push_str("- NO vignette or heavy corner darkening.\n");
    out.push_str(
        "- Do not depict a poster, print, phone screen, gallery display, or \
         photo-within-a-photo.\n",
    );

    out.push_str("\nHard rules:\n");
    out.push_str("- Keep the landmark clearly recognizable and Buffalo-specific.\n");
    out.push_str("- Grounded realism: no fantasy/sci-fi elements like flying cars.\n");
    out.push_str("- Avoid readable text/logos/watermarks.\n");
    out.push_str("- Output a single full-frame image with no borders/letterboxing.\n");

    out.push_str("\nNegative prompts:\n");
    for n in NEGATIVES {
        out.push_str("- ");
        out.push_str(n);
        out.push('\n');
    }

    out.trim_end().to_string()
}
