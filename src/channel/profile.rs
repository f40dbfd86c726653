//! Channel profile: creator and channel personalization attributes.

use serde::{Deserialize, Serialize};

/// Creator/channel metadata applied to every stage directive.
///
/// Every field is optional; empty fields are omitted from the composed
/// instruction. The profile is immutable for the duration of a pipeline run
/// and only changes through the [`ProfileStore`](super::store::ProfileStore)
/// between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelProfile {
    // Basic channel info
    pub channel_name: String,
    pub creator_name: String,
    pub channel_description: String,
    pub target_audience: String,

    // Content preferences
    pub content_style: String,
    pub tone_of_voice: String,
    /// Areas of expertise, order-preserving
    pub expertise_areas: Vec<String>,

    // Personal branding
    pub unique_value_proposition: String,
    pub creator_background: String,
    pub personal_story: String,

    // Content guidelines
    pub preferred_video_length: String,
    pub call_to_action_style: String,
    pub engagement_preferences: String,

    // Technical preferences
    pub visual_style_notes: String,
    pub production_constraints: String,
}

impl ChannelProfile {
    /// Whether every field is empty
    pub fn is_empty(&self) -> bool {
        self.channel_name.is_empty()
            && self.creator_name.is_empty()
            && self.channel_description.is_empty()
            && self.target_audience.is_empty()
            && self.content_style.is_empty()
            && self.tone_of_voice.is_empty()
            && self.expertise_areas.is_empty()
            && self.unique_value_proposition.is_empty()
            && self.creator_background.is_empty()
            && self.personal_story.is_empty()
            && self.preferred_video_length.is_empty()
            && self.call_to_action_style.is_empty()
            && self.engagement_preferences.is_empty()
            && self.visual_style_notes.is_empty()
            && self.production_constraints.is_empty()
    }
}

/// Partial update applied to a stored profile.
///
/// `None` leaves the stored value untouched; `Some` replaces it. Both the
/// interactive setup and the programmatic setter funnel through this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub channel_name: Option<String>,
    pub creator_name: Option<String>,
    pub channel_description: Option<String>,
    pub target_audience: Option<String>,
    pub content_style: Option<String>,
    pub tone_of_voice: Option<String>,
    pub expertise_areas: Option<Vec<String>>,
    pub unique_value_proposition: Option<String>,
    pub creator_background: Option<String>,
    pub personal_story: Option<String>,
    pub preferred_video_length: Option<String>,
    pub call_to_action_style: Option<String>,
    pub engagement_preferences: Option<String>,
    pub visual_style_notes: Option<String>,
    pub production_constraints: Option<String>,
}

impl ProfileUpdate {
    /// Set a field by its profile key. Expertise areas are comma-separated.
    ///
    /// Returns false if the key does not name a profile field.
    pub fn set_field(&mut self, key: &str, value: &str) -> bool {
        let value = value.trim();
        match key {
            "channel_name" => self.channel_name = Some(value.to_string()),
            "creator_name" => self.creator_name = Some(value.to_string()),
            "channel_description" => self.channel_description = Some(value.to_string()),
            "target_audience" => self.target_audience = Some(value.to_string()),
            "content_style" => self.content_style = Some(value.to_string()),
            "tone_of_voice" => self.tone_of_voice = Some(value.to_string()),
            "expertise_areas" => {
                self.expertise_areas = Some(
                    value
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                )
            }
            "unique_value_proposition" => self.unique_value_proposition = Some(value.to_string()),
            "creator_background" => self.creator_background = Some(value.to_string()),
            "personal_story" => self.personal_story = Some(value.to_string()),
            "preferred_video_length" => self.preferred_video_length = Some(value.to_string()),
            "call_to_action_style" => self.call_to_action_style = Some(value.to_string()),
            "engagement_preferences" => self.engagement_preferences = Some(value.to_string()),
            "visual_style_notes" => self.visual_style_notes = Some(value.to_string()),
            "production_constraints" => self.production_constraints = Some(value.to_string()),
            _ => return false,
        }
        true
    }

    /// Apply this update to a profile
    pub fn apply(&self, profile: &mut ChannelProfile) {
        macro_rules! merge {
            ($field:ident) => {
                if let Some(ref value) = self.$field {
                    profile.$field = value.clone();
                }
            };
        }

        merge!(channel_name);
        merge!(creator_name);
        merge!(channel_description);
        merge!(target_audience);
        merge!(content_style);
        merge!(tone_of_voice);
        merge!(expertise_areas);
        merge!(unique_value_proposition);
        merge!(creator_background);
        merge!(personal_story);
        merge!(preferred_video_length);
        merge!(call_to_action_style);
        merge!(engagement_preferences);
        merge!(visual_style_notes);
        merge!(production_constraints);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_empty() {
        assert!(ChannelProfile::default().is_empty());
    }

    #[test]
    fn test_any_field_makes_profile_non_empty() {
        let profile = ChannelProfile {
            tone_of_voice: "conversational".to_string(),
            ..Default::default()
        };
        assert!(!profile.is_empty());
    }

    #[test]
    fn test_update_merges_only_set_fields() {
        let mut profile = ChannelProfile {
            channel_name: "ML Ops Navigator".to_string(),
            creator_name: "Grigory".to_string(),
            ..Default::default()
        };

        let mut update = ProfileUpdate::default();
        assert!(update.set_field("creator_name", "Alice"));
        update.apply(&mut profile);

        assert_eq!(profile.creator_name, "Alice");
        assert_eq!(profile.channel_name, "ML Ops Navigator");
    }

    #[test]
    fn test_expertise_areas_comma_split_preserves_order() {
        let mut update = ProfileUpdate::default();
        assert!(update.set_field("expertise_areas", "mlops, data engineering , ai"));

        assert_eq!(
            update.expertise_areas,
            Some(vec![
                "mlops".to_string(),
                "data engineering".to_string(),
                "ai".to_string()
            ])
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut update = ProfileUpdate::default();
        assert!(!update.set_field("favorite_color", "blue"));
    }

    #[test]
    fn test_profile_yaml_round_trip() {
        let profile = ChannelProfile {
            channel_name: "Test".to_string(),
            expertise_areas: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        };

        let yaml = serde_yaml::to_string(&profile).unwrap();
        let parsed: ChannelProfile = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, profile);
    }
}
