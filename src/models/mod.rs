use serde::{Deserialize, Deserializer, Serialize};

/// A player row from the `players` table.
///
/// Doubles as the wire payload: any field missing from a request body
/// decodes to its zero value, so a PUT must carry the complete record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Player {
    /// Assigned by the store on first save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "null_as_default")]
    pub age: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub team: String,
    #[serde(deserialize_with = "null_as_default")]
    pub goals: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub assists: i32,
}

/// An explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Player {
    /// A player that has not been persisted yet.
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        age: i32,
        team: impl Into<String>,
        goals: i32,
        assists: i32,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            position: position.into(),
            age,
            team: team.into(),
            goals,
            assists,
        }
    }

    /// Copy of `self` carrying `id`, used when a payload replaces a stored row.
    pub fn with_id(self, id: i64) -> Self {
        Self { id: Some(id), ..self }
    }
}
