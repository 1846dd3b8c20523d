use serde::Deserialize;

use crate::error::AppError;
use crate::users::repo_types::UserFields;

/// Request body for create and update. Missing or `null` fields read as
/// empty; unknown keys such as `id` or the timestamps are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub photo: Option<String>,
}

impl UserRequest {
    /// Decode a JSON body regardless of the request's Content-Type.
    pub fn decode(body: &[u8]) -> Result<Self, AppError> {
        Ok(serde_json::from_slice(body)?)
    }
}

impl From<UserRequest> for UserFields {
    fn from(r: UserRequest) -> Self {
        Self {
            first_name: r.first_name.unwrap_or_default(),
            last_name: r.last_name.unwrap_or_default(),
            email: r.email.unwrap_or_default(),
            username: r.username.unwrap_or_default(),
            role: r.role.unwrap_or_default(),
            photo: r.photo.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn optional_fields_default_and_extras_are_ignored() {
        let req = UserRequest::decode(
            br#"{"id": 9, "first_name": "A", "last_name": "B", "email": "a@b.com", "created_at": "x"}"#,
        )
        .unwrap();
        let fields = UserFields::from(req);
        assert_eq!(fields.first_name, "A");
        assert_eq!(fields.username, "");
        assert!(fields.has_required());
    }

    #[test]
    fn null_fields_read_as_empty() {
        let req = UserRequest::decode(
            br#"{"first_name": "A", "last_name": "B", "email": "a@b.com", "username": null, "photo": null}"#,
        )
        .unwrap();
        let fields = UserFields::from(req);
        assert_eq!(fields.username, "");
        assert_eq!(fields.photo, "");
        assert!(fields.has_required());

        let req = UserRequest::decode(br#"{"first_name": null, "last_name": "B", "email": "a@b.com"}"#)
            .unwrap();
        assert!(!UserFields::from(req).has_required());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = UserRequest::decode(b"{not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.to_string(), "Failed to read JSON");
    }
}
