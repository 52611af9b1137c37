//! Selection and bulk list mutation over a user list.
//!
//! The selection is semantically a set of `node_id`s; it is represented as an
//! insertion-ordered `Vec` so callers observe a stable order. All operations
//! are synchronous and mutate the owning collections in place.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::entity::UserEntity;

/// Symmetric-difference membership toggle. Adding appends to the end;
/// removing preserves the relative order of the remainder.
pub fn toggle(selected: &mut Vec<String>, node_id: &str) {
	if let Some(position) = selected.iter().position(|id| id == node_id) {
		selected.remove(position);
	} else {
		selected.push(node_id.to_string());
	}
}

/// The `node_id`s of every listed user, in list order.
pub fn select_all(users: &[UserEntity]) -> Vec<String> {
	users.iter().map(|user| user.node_id.clone()).collect()
}

/// True iff the list is non-empty and every listed `node_id` is selected.
pub fn is_all_selected(users: &[UserEntity], selected: &[String]) -> bool {
	!users.is_empty() && users.iter().all(|user| selected.iter().any(|id| id == &user.node_id))
}

/// True iff something is selected but not everything. Mutually exclusive
/// with [`is_all_selected`].
pub fn is_some_selected(users: &[UserEntity], selected: &[String]) -> bool {
	!selected.is_empty() && !is_all_selected(users, selected)
}

/// Removes every selected user, preserving the relative order of survivors,
/// then clears the selection. No-op when the selection is empty.
pub fn delete_selected(users: &mut Vec<UserEntity>, selected: &mut Vec<String>) {
	if selected.is_empty() {
		return;
	}

	users.retain(|user| !selected.iter().any(|id| id == &user.node_id));
	selected.clear();
}

/// Clones every selected user in list order, rekeying each clone as
/// `<original>-<suffix>`, and prepends the clones as a contiguous block ahead
/// of the untouched originals. Duplicates are never auto-selected. No-op when
/// the selection is empty.
pub fn duplicate_selected(users: &mut Vec<UserEntity>, selected: &[String], suffix: &str) {
	if selected.is_empty() {
		return;
	}

	let mut duplicated: Vec<UserEntity> = users
		.iter()
		.filter(|user| selected.iter().any(|id| id == &user.node_id))
		.map(|user| UserEntity { node_id: format!("{}-{suffix}", user.node_id), ..user.clone() })
		.collect();

	duplicated.extend(users.drain(..));

	*users = duplicated;
}

/// Default duplicate suffix: unix milliseconds plus a random fragment.
pub fn unique_suffix(now: OffsetDateTime) -> String {
	let millis = now.unix_timestamp_nanos() / 1_000_000;
	let entropy = Uuid::new_v4().simple().to_string();

	format!("{millis}-{}", &entropy[..7])
}
