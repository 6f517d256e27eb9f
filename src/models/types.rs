use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Display;

/// Milliseconds since the unix epoch, serialized as an RFC 3339 string.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, sqlx::Type)]
#[sqlx(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
    }
}
impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
impl From<Timestamp> for i64 {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}
impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let dt = self.to_datetime().ok_or_else(|| {
            serde::ser::Error::custom(format!("Timestamp out of range: {}", self.0))
        })?;
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}
impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Store-assigned device identifier.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct DeviceId(i64);

impl From<i64> for DeviceId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
impl From<DeviceId> for i64 {
    fn from(value: DeviceId) -> Self {
        value.0
    }
}
impl Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_serialize() {
        let ts = Timestamp::from(1685611360123);
        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            "\"2023-06-01T09:22:40.123Z\""
        );
    }

    #[test]
    fn test_device_id_is_a_bare_number() {
        assert_eq!(serde_json::to_string(&DeviceId::from(42)).unwrap(), "42");
        let id: DeviceId = serde_json::from_str("7").unwrap();
        assert_eq!(id, DeviceId::from(7));
    }
}
