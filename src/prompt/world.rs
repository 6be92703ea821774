//! World-state prompt builder.

use crate::catalog::Landmark;
use crate::glitch::GlitchTier;
use crate::prompt::guardrails::{theme_guardrail, tier_guardrail};

/// Compose the instruction block for the text-model call.
///
/// The output asks the model for a single JSON object matching the fixed
/// schema, restates the hard constraints as prose, and anchors each selected
/// landmark with its literal catalog facts. Pure: same input, same string.
pub fn build_world_prompt(
    year: i64,
    theme: &str,
    tier: GlitchTier,
    landmarks: &[Landmark],
) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str(
        "You are an assistant that generates a SINGLE JSON object describing a coherent \
         alternate-timeline \"world state\" for Buffalo, NY.\n\n",
    );

    out.push_str("Hard requirements:\n");
    out.push_str("- Output MUST be valid JSON only. No markdown, no code fences, no commentary.\n");
    out.push_str(
        "- The JSON must include plans for ALL provided landmarks (same order), matching \
         their id values exactly.\n",
    );
    out.push_str("- Keep landmarks recognizable. Use baseFacts to avoid drifting to other cities.\n");
    out.push_str("- The style must be photorealistic and grounded (no sci-fi fantasy).\n");
    out.push_str("- No readable text, signage, or logos anywhere in the plan.\n\n");

    out.push_str("User inputs:\n");
    out.push_str(&format!("- year: {}\n", year));
    out.push_str(&format!("- theme: {}\n", theme));
    out.push_str(&format!("- glitch: {}\n\n", tier));

    out.push_str("Theme guardrails:\n");
    out.push_str(theme_guardrail(theme));
    out.push_str("\n\nGlitch guardrails:\n");
    out.push_str(tier_guardrail(tier));
    out.push_str("\n\n");

    out.push_str("Landmarks (fixed facts):\n");
    for l in landmarks {
        out.push_str("- id: ");
        out.push_str(l.id);
        out.push_str("\n  name: ");
        out.push_str(l.name);
        out.push_str("\n  baseFacts: ");
        out.push_str(l.base_facts);
        out.push('\n');
    }

    out.push_str("\nReturn JSON with this exact shape:\n\n");
    out.push_str(
        "{\n\
         \x20 \"year\": number,\n\
         \x20 \"theme\": string,\n\
         \x20 \"glitch\": \"minor\" | \"unstable\" | \"chaotic\",\n\
         \x20 \"timelineName\": string,\n\
         \x20 \"globalStyle\": {\n\
         \x20   \"lighting\": string,\n\
         \x20   \"palette\": string,\n\
         \x20   \"camera\": string,\n\
         \x20   \"mood\": string\n\
         \x20 },\n\
         \x20 \"motifs\": [string, string, string],\n\
         \x20 \"glitchSignature\": [string, string, string],\n\
         \x20 \"glitchNotes\": string,\n\
         \x20 \"landmarks\": [\n\
         \x20   {\n\
         \x20     \"id\": string,\n\
         \x20     \"name\": string,\n\
         \x20     \"buffaloAnchors\": [string, string],\n\
         \x20     \"mustKeep\": [string, string],\n\
         \x20     \"changes\": [string, string, string],\n\
         \x20     \"cameraHint\": string\n\
         \x20   }\n\
         \x20 ]\n\
         }\n\n",
    );

    out.push_str("Rules:\n");
    out.push_str("- motifs must be reusable across all landmarks (2-5 items).\n");
    out.push_str(
        "- glitchSignature must describe visual distortions (2-5 items) that match the \
         glitch tier.\n",
    );
    out.push_str(
        "- buffaloAnchors: 2-4 short strings per landmark naming concrete Buffalo-specific \
         background cues (geography, materials, neighboring structures).\n",
    );
    out.push_str("- mustKeep: 2-4 short bullet strings that preserve identity.\n");
    out.push_str(
        "- changes: 3-6 short bullet strings describing plausible future changes for that \
         landmark under the theme + year.\n",
    );
    out.push_str(
        "- cameraHint should be short and different per landmark (e.g., \"from waterfront \
         promenade\", \"ground-level plaza looking up\").\n",
    );
    out.push_str("- Keep everything Buffalo-specific and geographically plausible.\n\n");

    out.push_str("Now output JSON only.");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LANDMARKS;

    #[test]
    fn test_prompt_is_deterministic() {
        let sel = &LANDMARKS[..3];
        let a = build_world_prompt(2075, "Tech Boom Buffalo", GlitchTier::Unstable, sel);
        let b = build_world_prompt(2075, "Tech Boom Buffalo", GlitchTier::Unstable, sel);
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_embeds_inputs_and_facts() {
        let sel = &LANDMARKS[..3];
        let prompt = build_world_prompt(2099, "Industrial Revival", GlitchTier::Chaotic, sel);
        assert!(prompt.contains("- year: 2099"));
        assert!(prompt.contains("- theme: Industrial Revival"));
        assert!(prompt.contains("- glitch: chaotic"));
        for l in sel {
            assert!(prompt.contains(l.id));
            assert!(prompt.contains(l.base_facts));
        }
    }

    #[test]
    fn test_prompt_carries_schema_and_guardrails() {
        let sel = &LANDMARKS[..3];
        let prompt = build_world_prompt(2075, "Tech Boom Buffalo", GlitchTier::Minor, sel);
        assert!(prompt.contains("\"buffaloAnchors\""));
        assert!(prompt.contains("\"timelineName\""));
        assert!(prompt.contains("valid JSON only"));
        assert!(prompt.contains(theme_guardrail("Tech Boom Buffalo")));
        assert!(prompt.contains(tier_guardrail(GlitchTier::Minor)));
    }

    #[test]
    fn test_unknown_theme_still_builds() {
        let sel = &LANDMARKS[..3];
        let prompt = build_world_prompt(2075, "Sideways Dimension", GlitchTier::Minor, sel);
        assert!(prompt.contains("- theme: Sideways Dimension"));
        assert!(prompt.contains(theme_guardrail("Sideways Dimension")));
    }
}
