use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key never carried over from a user onto a stored owner.
pub const SCORE_KEY: &str = "score";

/// The authenticated user performing an operation.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggedinUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Any other public profile fields (username, imgUrl, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Owner snapshot stored on a toy. Carries no `score`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToyOwner {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToyOwner {
    /// Drop a `score` that slipped in through `extra`.
    pub fn strip_score(&mut self) {
        self.extra.remove(SCORE_KEY);
    }
}

impl From<&LoggedinUser> for ToyOwner {
    fn from(user: &LoggedinUser) -> Self {
        let mut owner = Self {
            id: user.id.clone(),
            fullname: user.fullname.clone(),
            is_admin: user.is_admin,
            extra: user.extra.clone(),
        };
        owner.strip_score();
        owner
    }
}

impl LoggedinUser {
    /// Admins may modify anything; everyone else only what they own.
    pub fn can_modify(&self, owner: &ToyOwner) -> bool {
        self.is_admin || owner.id == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, is_admin: bool) -> LoggedinUser {
        LoggedinUser { id: id.into(), fullname: "Muki".into(), is_admin, score: Some(120.0), extra: Map::new() }
    }

    #[test]
    fn owner_copy_drops_score() {
        let owner = ToyOwner::from(&user("u1", false));
        let json = serde_json::to_value(&owner).unwrap();
        assert_eq!(json, serde_json::json!({"_id": "u1", "fullname": "Muki", "isAdmin": false}));
    }

    #[test]
    fn owner_copy_keeps_public_extras() {
        let u: LoggedinUser = serde_json::from_str(
            r#"{"_id":"u1","fullname":"Muki","isAdmin":false,"score":7,"username":"muki","imgUrl":"m.png"}"#,
        )
        .unwrap();
        assert_eq!(u.score, Some(7.0));
        let json = serde_json::to_value(ToyOwner::from(&u)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"_id": "u1", "fullname": "Muki", "isAdmin": false, "username": "muki", "imgUrl": "m.png"})
        );
    }

    #[test]
    fn stored_owner_score_is_stripped() {
        let mut owner: ToyOwner =
            serde_json::from_str(r#"{"_id":"u1","score":300,"username":"muki"}"#).unwrap();
        assert!(owner.extra.contains_key("score"));
        owner.strip_score();
        assert!(!owner.extra.contains_key("score"));
        assert_eq!(owner.extra["username"], "muki");
    }

    #[test]
    fn can_modify_own_or_as_admin() {
        let owner = ToyOwner { id: "u1".into(), ..Default::default() };
        assert!(user("u1", false).can_modify(&owner));
        assert!(user("u2", true).can_modify(&owner));
        assert!(!user("u2", false).can_modify(&owner));
    }

    #[test]
    fn deserializes_wire_shape() {
        let u: LoggedinUser =
            serde_json::from_str(r#"{"_id":"u9","fullname":"Puki","isAdmin":true,"score":10}"#).unwrap();
        assert_eq!(u.id, "u9");
        assert!(u.is_admin);
        assert_eq!(u.score, Some(10.0));
    }
}
