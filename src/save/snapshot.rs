//! Flat serializable record of a [`PlayerProfile`].
//!
//! Loading never fails: any missing or malformed field falls back to the
//! value a fresh profile would have.

use super::manager::SaveError;
use crate::core::profile::{PlayerProfile, QuestId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// On-disk layout: `{energy, completedQuests, secretUnlocked}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSnapshot {
    pub energy: u32,
    /// Quest ids in stable order.
    pub completed_quests: Vec<String>,
    #[serde(alias = "easterEggFound")]
    pub secret_unlocked: bool,
}

impl Default for SaveSnapshot {
    fn default() -> Self {
        encode(&PlayerProfile::new())
    }
}

impl SaveSnapshot {
    /// Build a snapshot from loosely-typed JSON, field by field.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(fields) = value.as_object() else {
            log::warn!("save data is not an object; starting fresh");
            return defaults;
        };

        let energy = match fields.get("energy") {
            None => defaults.energy,
            Some(raw) => raw
                .as_u64()
                .and_then(|e| u32::try_from(e).ok())
                .unwrap_or_else(|| {
                    log::warn!("malformed energy {raw}; using {}", defaults.energy);
                    defaults.energy
                }),
        };

        let completed_quests = match fields.get("completedQuests") {
            None => defaults.completed_quests,
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect(),
            Some(raw) => {
                log::warn!("malformed completedQuests {raw}; ignoring");
                defaults.completed_quests
            }
        };

        let secret_unlocked = fields
            .get("secretUnlocked")
            .or_else(|| fields.get("easterEggFound"))
            .and_then(Value::as_bool)
            .unwrap_or(defaults.secret_unlocked);

        Self {
            energy,
            completed_quests,
            secret_unlocked,
        }
    }
}

pub fn encode(profile: &PlayerProfile) -> SaveSnapshot {
    SaveSnapshot {
        energy: profile.energy(),
        completed_quests: profile
            .completed_quests()
            .map(|quest| quest.as_str().to_owned())
            .collect(),
        secret_unlocked: profile.secret_unlocked(),
    }
}

/// Rebuild a profile. Unknown quest ids are dropped, energy is clamped.
pub fn decode(snapshot: &SaveSnapshot) -> PlayerProfile {
    let completed = snapshot.completed_quests.iter().filter_map(|id| {
        let quest = QuestId::from_id(id);
        if quest.is_none() {
            log::warn!("unknown quest id '{id}' in save data");
        }
        quest
    });
    PlayerProfile::from_parts(snapshot.energy, completed, snapshot.secret_unlocked)
}

/// Pretty JSON text for the save file.
pub fn to_json(profile: &PlayerProfile) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(&encode(profile))?)
}

/// Parse save file text. Unparseable text yields a fresh profile.
pub fn from_json(text: &str) -> PlayerProfile {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => decode(&SaveSnapshot::from_value(&value)),
        Err(e) => {
            log::warn!("corrupt save data ({e}); starting fresh");
            PlayerProfile::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::STARTING_ENERGY;
    use serde_json::json;

    #[test]
    fn test_round_trip_empty_profile() {
        let profile = PlayerProfile::new();
        assert_eq!(decode(&encode(&profile)), profile);
    }

    #[test]
    fn test_round_trip_full_profile() {
        let profile = PlayerProfile::from_parts(
            35,
            [QuestId::InAndOut, QuestId::WindowWitch, QuestId::WitchInWardrobe],
            true,
        );
        let snapshot = encode(&profile);
        assert_eq!(
            snapshot.completed_quests,
            vec!["window_witch", "in_and_out", "witch_in_wardrobe"]
        );
        assert_eq!(decode(&snapshot), profile);
        assert_eq!(from_json(&to_json(&profile).expect("encode")), profile);
    }

    #[test]
    fn test_json_field_names() {
        let text = to_json(&PlayerProfile::new()).expect("encode");
        let value: Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(
            value,
            json!({"energy": 100, "completedQuests": [], "secretUnlocked": false})
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let snapshot = SaveSnapshot::from_value(&json!({"energy": 40}));
        assert_eq!(snapshot.energy, 40);
        assert!(snapshot.completed_quests.is_empty());
        assert!(!snapshot.secret_unlocked);
    }

    #[test]
    fn test_legacy_secret_key_accepted() {
        let snapshot = SaveSnapshot::from_value(&json!({"easterEggFound": true}));
        assert!(snapshot.secret_unlocked);
        assert_eq!(snapshot.energy, STARTING_ENERGY);

        let typed: SaveSnapshot = serde_json::from_value(json!({
            "energy": 10,
            "completedQuests": ["da_wire"],
            "easterEggFound": true
        }))
        .expect("alias deserializes");
        assert!(typed.secret_unlocked);
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        let snapshot = SaveSnapshot::from_value(&json!({
            "energy": "lots",
            "completedQuests": "da_wire",
            "secretUnlocked": "yes"
        }));
        assert_eq!(snapshot, SaveSnapshot::default());

        let snapshot = SaveSnapshot::from_value(&json!({"energy": -5}));
        assert_eq!(snapshot.energy, STARTING_ENERGY);
    }

    #[test]
    fn test_unknown_quests_dropped_and_energy_clamped() {
        let profile = from_json(r#"{"energy": 900, "completedQuests": ["da_wire", "moon_quest", 7]}"#);
        assert_eq!(profile.energy(), profile.max_energy());
        assert_eq!(profile.completed_quests().collect::<Vec<_>>(), vec![QuestId::DaWire]);
    }

    #[test]
    fn test_garbage_text_starts_fresh() {
        assert_eq!(from_json("not json {"), PlayerProfile::new());
        assert_eq!(from_json("[1, 2, 3]"), PlayerProfile::new());
    }
}
