use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;
use crate::user::ToyOwner;

/// Fallback used for the generated image when neither name nor id is usable.
pub const DEFAULT_IMG_SEED: &str = "default-toy";

/// A catalog record. Field names on the wire match the stored `toy.json` layout.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Toy {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub img_url: String,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub owner: ToyOwner,
    /// Fields this service does not interpret, kept so a rewrite of the file loses nothing.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for `save`: with an id it updates, without one it creates.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToyInput {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl ToyInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ModelError::Validation("price must be a non-negative number".into()));
        }
        Ok(())
    }

    /// The id to update, ignoring blank strings sent by forms.
    pub fn target_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Caller-supplied image url, if it is not blank.
    pub fn explicit_img_url(&self) -> Option<&str> {
        self.img_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// Robohash url seeded by the toy name, then its id, then `DEFAULT_IMG_SEED`.
pub fn default_img_url(name: &str, id: &str) -> String {
    let seed = [name, id]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_IMG_SEED);
    format!("https://robohash.org/{seed}?set=set4")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_img_url_prefers_name_then_id() {
        assert_eq!(default_img_url("Robot", "abc"), "https://robohash.org/Robot?set=set4");
        assert_eq!(default_img_url("", "abc"), "https://robohash.org/abc?set=set4");
        assert_eq!(default_img_url("", ""), "https://robohash.org/default-toy?set=set4");
    }

    #[test]
    fn validate_rejects_negative_price() {
        let input = ToyInput { name: "Ball".into(), price: -1.0, ..Default::default() };
        assert!(matches!(input.validate(), Err(ModelError::Validation(_))));
        let ok = ToyInput { name: "Ball".into(), price: 0.0, ..Default::default() };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn blank_id_is_treated_as_create() {
        let input = ToyInput { id: Some("  ".into()), ..Default::default() };
        assert_eq!(input.target_id(), None);
        let input = ToyInput { id: Some("t1".into()), ..Default::default() };
        assert_eq!(input.target_id(), Some("t1"));
    }

    #[test]
    fn toy_reads_stored_layout() {
        let raw = r#"{
            "_id": "t101",
            "name": "Talking Doll",
            "price": 123,
            "inStock": true,
            "imgUrl": "https://robohash.org/Talking Doll?set=set4",
            "labels": ["Doll", "Battery Powered"],
            "createdAt": 1631031801011,
            "owner": {"_id": "u101", "fullname": "Admin", "isAdmin": true}
        }"#;
        let toy: Toy = serde_json::from_str(raw).unwrap();
        assert_eq!(toy.id, "t101");
        assert_eq!(toy.price, 123.0);
        assert!(toy.in_stock);
        assert_eq!(toy.labels.len(), 2);
        assert_eq!(toy.owner.id, "u101");
        assert!(toy.extra.is_empty());
    }

    #[test]
    fn unknown_fields_survive_a_rewrite() {
        let raw = r#"{"_id":"t1","name":"Ball","price":3,"msgs":[{"txt":"hi"}],"owner":{"_id":"u1","username":"muki"}}"#;
        let toy: Toy = serde_json::from_str(raw).unwrap();
        let json = serde_json::to_value(&toy).unwrap();
        assert_eq!(json["msgs"], serde_json::json!([{"txt": "hi"}]));
        assert_eq!(json["owner"]["username"], "muki");
    }
}
