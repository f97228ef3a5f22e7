pub mod booking;
pub mod pet;
pub mod profile;
pub mod provider;

/// Serde helper for times carried on the wire as `"HH:MM"` (booking
/// times and opening hours must stay aligned with the slot grid format).
pub mod slot_time {
    use crate::consts;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(consts::SLOT_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, consts::SLOT_TIME_FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Wrapper {
        #[serde(with = "super::slot_time")]
        time: NaiveTime,
    }

    #[test]
    fn test_slot_time_round_trip() {
        let wrapper = Wrapper {
            time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        };

        let encoded = serde_json::to_string(&wrapper).unwrap();
        assert_eq!(encoded, r#"{"time":"09:30"}"#);
        assert_eq!(serde_json::from_str::<Wrapper>(&encoded).unwrap(), wrapper);
    }

    #[test]
    fn test_slot_time_rejects_bad_input() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"time":"9am"}"#).is_err());
    }
}
