use time::{Duration, OffsetDateTime};

use gus_domain::{GateStatus, RateLimitGate, RawSearchResponse, UserEntity, map_users, selection};

fn user(node_id: &str, login: &str) -> UserEntity {
	UserEntity {
		id: "1".to_string(),
		node_id: node_id.to_string(),
		login: login.to_string(),
		avatar_url: String::new(),
	}
}

fn roster() -> Vec<UserEntity> {
	vec![user("1", "Alice"), user("2", "Bob"), user("3", "Charlie")]
}

#[test]
fn maps_github_search_payload() {
	let raw: RawSearchResponse = serde_json::from_value(serde_json::json!({
		"total_count": 2,
		"incomplete_results": false,
		"items": [
			{ "id": 8_761_081, "node_id": "MDQ6VXNlcjg3NjEwODE=", "login": "octocat", "avatar_url": "https://example.test/a.png" },
			{ "id": null, "node_id": null, "login": null, "avatar_url": null }
		]
	}))
	.expect("Failed to parse payload.");
	let users = map_users(raw);

	assert_eq!(users.len(), 2);
	assert_eq!(users[0].id, "8761081");
	assert_eq!(users[0].node_id, "MDQ6VXNlcjg3NjEwODE=");
	assert_eq!(users[0].login, "octocat");
	assert_eq!(
		users[1],
		UserEntity {
			id: String::new(),
			node_id: String::new(),
			login: String::new(),
			avatar_url: String::new(),
		}
	);
}

#[test]
fn delete_selected_removes_only_selected_and_clears_selection() {
	let mut users = roster();
	let mut selected = vec!["2".to_string()];

	selection::delete_selected(&mut users, &mut selected);

	let ids: Vec<&str> = users.iter().map(|user| user.node_id.as_str()).collect();

	assert_eq!(ids, vec!["1", "3"]);
	assert!(selected.is_empty());
}

#[test]
fn duplicate_selected_prepends_block_in_list_order() {
	let mut users = roster();
	let mut selected = Vec::new();

	// Select Charlie before Alice; duplicates must still follow list order.
	selection::toggle(&mut selected, "3");
	selection::toggle(&mut selected, "1");

	selection::duplicate_selected(&mut users, &selected, "X");

	let ids: Vec<&str> = users.iter().map(|user| user.node_id.as_str()).collect();

	assert_eq!(ids, vec!["1-X", "3-X", "1", "2", "3"]);
	assert_eq!(users[0].login, "Alice");
	assert_eq!(users[1].login, "Charlie");
	// Originals stay selected; duplicates are not auto-selected.
	assert_eq!(selected, vec!["3", "1"]);
}

#[test]
fn duplicate_selected_twice_yields_independent_blocks() {
	let mut users = roster();
	let selected = vec!["2".to_string()];

	selection::duplicate_selected(&mut users, &selected, "A");
	selection::duplicate_selected(&mut users, &selected, "B");

	let bobs = users.iter().filter(|user| user.login == "Bob").count();

	assert_eq!(bobs, 3);
	assert_eq!(users[0].node_id, "2-B");
	assert_eq!(users[1].node_id, "2-A");
}

#[test]
fn duplicate_selected_with_empty_selection_is_noop() {
	let mut users = roster();

	selection::duplicate_selected(&mut users, &[], "X");

	assert_eq!(users.len(), 3);
}

#[test]
fn selection_stays_subset_of_list_ids_across_mutations() {
	let mut users = roster();
	let mut selected = Vec::new();

	selection::toggle(&mut selected, "1");
	selection::toggle(&mut selected, "2");
	selection::duplicate_selected(&mut users, &selected, "X");
	selection::delete_selected(&mut users, &mut selected);
	selected = selection::select_all(&users);

	for id in &selected {
		assert!(users.iter().any(|user| &user.node_id == id));
	}
}

#[test]
fn unique_suffixes_differ_per_call() {
	let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("Invalid timestamp.");
	let first = selection::unique_suffix(now);
	let second = selection::unique_suffix(now);

	assert_ne!(first, second);
	assert!(first.starts_with("1700000000000-"));
}

#[test]
fn gate_blocks_within_window_and_clears_after() {
	let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("Invalid timestamp.");
	let reset_at = now + Duration::seconds(60);
	let mut gate = RateLimitGate::default();

	gate.arm(reset_at);

	assert!(gate.is_armed());
	assert_eq!(gate.poll(now + Duration::seconds(30)), GateStatus::Blocked { reset_at });
	assert_eq!(gate.poll(now + Duration::seconds(61)), GateStatus::Cleared);
	assert!(!gate.is_armed());
}
