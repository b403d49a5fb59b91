use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
    pub role: String,
}

/// Singleton about-page content. One row; PUT upserts it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AboutContent {
    pub id: Uuid,
    pub description: String,
    pub mission: String,
    pub vision: String,
    #[serde(rename = "values")]
    pub core_values: String,
    pub leadership: Json<Vec<Leader>>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_values_serialize_under_the_public_name() {
        let about = AboutContent {
            id: Uuid::new_v4(),
            description: "d".into(),
            mission: "m".into(),
            vision: "v".into(),
            core_values: "integrity".into(),
            leadership: Json(vec![Leader { name: "Ada".into(), role: "CTO".into() }]),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&about).unwrap();
        assert_eq!(json["values"], "integrity");
        assert_eq!(json["leadership"][0]["name"], "Ada");
    }
}
