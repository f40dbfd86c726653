//! Instruction composition: merging a stage brief with channel context.
//!
//! Pure functions of their inputs. No randomness, no side effects.

use super::profile::ChannelProfile;

/// The fixed directives closing every composed context block
const INTEGRATION_REQUIREMENTS: [&str; 5] = [
    "- **CRITICAL**: All content must align with the above channel information",
    "- Incorporate the creator's expertise and background naturally",
    "- Ensure the tone and style match the channel's established voice",
    "- Consider the target audience in all content decisions",
    "- Respect production constraints and preferences",
];

/// Combine a stage's base instruction with channel context.
///
/// Returns the base instruction unchanged when every profile field is empty.
pub fn channel_aware_instruction(base_instruction: &str, profile: &ChannelProfile) -> String {
    match channel_context(profile) {
        Some(context) => format!("{context}\n{base_instruction}"),
        None => base_instruction.to_string(),
    }
}

/// Render the structured channel context block, if any field is set.
///
/// Sub-sections appear in a fixed order, each emitted only when at least one
/// of its constituent fields is non-empty; fields within a sub-section keep
/// their declared order. Whenever any sub-section was emitted, the block
/// closes with the fixed integration requirements.
pub fn channel_context(profile: &ChannelProfile) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    let channel_info = [
        ("Channel Name", profile.channel_name.as_str()),
        ("Creator", profile.creator_name.as_str()),
        ("Channel Description", profile.channel_description.as_str()),
    ];
    push_section(&mut parts, "## CHANNEL INFORMATION", &channel_info);

    let content_guidelines = [
        ("Target Audience", profile.target_audience.as_str()),
        ("Content Style", profile.content_style.as_str()),
        ("Tone of Voice", profile.tone_of_voice.as_str()),
        ("Preferred Video Length", profile.preferred_video_length.as_str()),
    ];
    push_section(&mut parts, "\n## CONTENT GUIDELINES", &content_guidelines);

    let expertise = profile.expertise_areas.join(", ");
    let branding = [
        ("Areas of Expertise", expertise.as_str()),
        ("Creator Background", profile.creator_background.as_str()),
        ("Unique Value Proposition", profile.unique_value_proposition.as_str()),
        ("Personal Story/Connection", profile.personal_story.as_str()),
    ];
    push_section(&mut parts, "\n## CREATOR EXPERTISE & BRANDING", &branding);

    let engagement = [
        ("Call-to-Action Style", profile.call_to_action_style.as_str()),
        ("Engagement Preferences", profile.engagement_preferences.as_str()),
        ("Visual Style Notes", profile.visual_style_notes.as_str()),
        ("Production Constraints", profile.production_constraints.as_str()),
    ];
    push_section(&mut parts, "\n## ENGAGEMENT & PRODUCTION PREFERENCES", &engagement);

    if parts.is_empty() {
        return None;
    }

    parts.push("\n## INTEGRATION REQUIREMENTS".to_string());
    parts.extend(INTEGRATION_REQUIREMENTS.iter().map(|s| s.to_string()));
    parts.push(String::new());

    Some(parts.join("\n"))
}

/// Emit a sub-section header plus its non-empty fields, or nothing at all
fn push_section(parts: &mut Vec<String>, header: &str, fields: &[(&str, &str)]) {
    if fields.iter().all(|(_, value)| value.is_empty()) {
        return;
    }

    parts.push(header.to_string());
    for (label, value) in fields {
        if !value.is_empty() {
            parts.push(format!("- **{label}**: {value}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_is_identity() {
        let base = "You are a technical content strategist.";
        let composed = channel_aware_instruction(base, &ChannelProfile::default());
        assert_eq!(composed, base);
    }

    #[test]
    fn test_context_absent_for_empty_profile() {
        assert!(channel_context(&ChannelProfile::default()).is_none());
    }

    #[test]
    fn test_single_field_emits_its_section_only() {
        let profile = ChannelProfile {
            channel_description: "A channel about MLOps.".to_string(),
            ..Default::default()
        };

        let context = channel_context(&profile).unwrap();
        assert!(context.contains("## CHANNEL INFORMATION"));
        assert!(context.contains("- **Channel Description**: A channel about MLOps."));
        assert!(!context.contains("## CONTENT GUIDELINES"));
        assert!(!context.contains("## CREATOR EXPERTISE & BRANDING"));
        assert!(!context.contains("## ENGAGEMENT & PRODUCTION PREFERENCES"));
        assert!(context.contains("## INTEGRATION REQUIREMENTS"));
    }

    #[test]
    fn test_context_block_ends_with_integration_requirements() {
        let profile = ChannelProfile {
            tone_of_voice: "conversational".to_string(),
            ..Default::default()
        };

        let context = channel_context(&profile).unwrap();
        let expected_tail = format!("{}\n", INTEGRATION_REQUIREMENTS.join("\n"));
        assert!(context.ends_with(&expected_tail));
    }

    #[test]
    fn test_composed_instruction_keeps_base_at_the_end() {
        let profile = ChannelProfile {
            creator_name: "Alice".to_string(),
            ..Default::default()
        };

        let composed = channel_aware_instruction("BASE TASK", &profile);
        assert!(composed.contains("- **Creator**: Alice"));
        assert!(composed.ends_with("BASE TASK"));
    }

    #[test]
    fn test_expertise_areas_joined_in_order() {
        let profile = ChannelProfile {
            expertise_areas: vec![
                "machine learning operations".to_string(),
                "data engineering".to_string(),
            ],
            ..Default::default()
        };

        let context = channel_context(&profile).unwrap();
        assert!(context
            .contains("- **Areas of Expertise**: machine learning operations, data engineering"));
    }

    #[test]
    fn test_determinism() {
        let profile = ChannelProfile {
            channel_name: "Test".to_string(),
            target_audience: "data engineers".to_string(),
            ..Default::default()
        };

        assert_eq!(channel_context(&profile), channel_context(&profile));
    }
}
