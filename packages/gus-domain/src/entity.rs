use serde::Deserialize;

/// A user as displayed and mutated by the controller.
///
/// `node_id` is the stable identity used for selection and list keying;
/// `id` is display-only and not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntity {
	pub id: String,
	pub node_id: String,
	pub login: String,
	pub avatar_url: String,
}

/// Raw `/search/users` response body.
#[derive(Debug, Default, Deserialize)]
pub struct RawSearchResponse {
	#[serde(default)]
	pub total_count: u64,
	#[serde(default)]
	pub incomplete_results: bool,
	#[serde(default)]
	pub items: Option<Vec<RawUser>>,
}

#[derive(Debug, Deserialize)]
pub struct RawUser {
	#[serde(default)]
	pub id: Option<u64>,
	#[serde(default)]
	pub node_id: Option<String>,
	#[serde(default)]
	pub login: Option<String>,
	#[serde(default)]
	pub avatar_url: Option<String>,
}

/// Total mapping from the wire shape to entities. Absent or null fields map
/// to the empty string; an absent `items` array maps to an empty list.
pub fn map_users(raw: RawSearchResponse) -> Vec<UserEntity> {
	raw.items.unwrap_or_default().into_iter().map(map_user).collect()
}

fn map_user(raw: RawUser) -> UserEntity {
	UserEntity {
		id: raw.id.map(|id| id.to_string()).unwrap_or_default(),
		node_id: raw.node_id.unwrap_or_default(),
		login: raw.login.unwrap_or_default(),
		avatar_url: raw.avatar_url.unwrap_or_default(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn maps_missing_fields_to_empty_strings() {
		let raw: RawSearchResponse =
			serde_json::from_str(r#"{ "items": [ { "login": "octocat" } ] }"#)
				.expect("Failed to parse response.");
		let users = map_users(raw);

		assert_eq!(users.len(), 1);
		assert_eq!(users[0].login, "octocat");
		assert_eq!(users[0].id, "");
		assert_eq!(users[0].node_id, "");
		assert_eq!(users[0].avatar_url, "");
	}

	#[test]
	fn maps_absent_items_to_empty_list() {
		let raw: RawSearchResponse =
			serde_json::from_str(r#"{ "total_count": 0 }"#).expect("Failed to parse response.");

		assert!(map_users(raw).is_empty());
	}
}
