use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contributor label that marks a record as authored by the local user.
pub const USER_ADDED: &str = "User Added";

/// A single cultural-site entry.
///
/// Field names follow the persisted JSON layout. Fields this struct does not
/// know about are kept in `extra` so user records written by other versions
/// survive a load/save cycle and still show up in exports.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Record {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub period: String,
    pub district: String,
    pub location: Location,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(rename = "audio", default)]
    pub has_audio: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub contributor: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RecordError {
    #[error("record id must be positive")]
    ZeroId,

    #[error("record {0} has no images")]
    NoImages(u64),
}

impl Record {
    /// Deserialization is lenient about these; loaders call this afterwards.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.id == 0 {
            return Err(RecordError::ZeroId);
        }
        if self.images.is_empty() {
            return Err(RecordError::NoImages(self.id));
        }
        Ok(())
    }

    pub fn is_user_added(&self) -> bool {
        self.contributor == USER_ADDED
    }

    /// Value of one of the categorical fields.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Category => &self.category,
            Field::Period => &self.period,
            Field::District => &self.district,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Categorical record fields usable as filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Field {
    Category,
    Period,
    District,
}

/// A curated, named group of records.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ThematicCollection {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub items: Vec<u64>,
}

#[cfg(test)]
pub(crate) fn make_record(id: u64, category: &str, district: &str, tags: &[&str]) -> Record {
    Record {
        id,
        title: format!("Site {id}"),
        description: format!("Description of site {id}"),
        category: category.to_string(),
        period: "1850-1880".to_string(),
        district: district.to_string(),
        location: Location {
            lat: 48.43,
            lng: -123.43,
        },
        images: vec![format!("images/site-{id}.jpg")],
        has_audio: false,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        contributor: "Parks Canada".to_string(),
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_persisted_layout() {
        let json = r#"{
            "id": 7,
            "title": "Seven Signs",
            "description": "Bronze casts",
            "category": "Indigenous",
            "period": "1990-2010",
            "district": "Victoria",
            "location": { "lat": 48.425, "lng": -123.367 },
            "images": ["a.jpg"],
            "audio": true,
            "tags": ["Lekwungen"],
            "contributor": "Songhees Nation"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert!(record.has_audio);
        assert_eq!(record.location.lng, -123.367);
        assert!(record.extra.is_empty());
        assert!(!record.is_user_added());
    }

    #[test]
    fn keeps_unknown_fields_and_defaults_optional_ones() {
        let json = r#"{
            "id": 1, "title": "t", "description": "d", "category": "c",
            "period": "p", "district": "x",
            "location": { "lat": 0.0, "lng": 0.0 },
            "audio": true, "contributor": "User Added", "rating": 5
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert!(record.has_audio);
        assert!(record.tags.is_empty());
        assert!(record.is_user_added());
        assert_eq!(record.extra.get("rating"), Some(&Value::from(5)));

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["audio"], Value::Bool(true));
        assert_eq!(out["rating"], Value::from(5));
    }

    #[test]
    fn validate_requires_positive_id_and_an_image() {
        let mut record = make_record(1, "Military", "Esquimalt", &[]);
        assert_eq!(record.validate(), Ok(()));

        record.images.clear();
        assert_eq!(record.validate(), Err(RecordError::NoImages(1)));

        record.id = 0;
        assert_eq!(record.validate(), Err(RecordError::ZeroId));
    }

    #[test]
    fn field_selects_categorical_value() {
        let record = make_record(1, "Military", "Esquimalt", &[]);
        assert_eq!(record.field(Field::Category), "Military");
        assert_eq!(record.field(Field::Period), "1850-1880");
        assert_eq!(record.field(Field::District), "Esquimalt");
    }
}
