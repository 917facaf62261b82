// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashMap;
use super::Label;


#[cfg_attr(test, derive(Debug))]
#[derive(Clone, Copy, Default)]
pub(super) struct RoomState {
	/// The minute from which the valve releases pressure.
	opened_at: Option<usize>,
}

impl RoomState {
	fn is_open(&self) -> bool {
		self.opened_at.is_some()
	}
}

/// Per-room valve states along a single search trajectory.
///
/// Every branch of the search works on its own clone, so nothing is ever undone.
#[derive(Clone)]
pub(super) struct RoomStates<'s>(HashMap<Label<'s>, RoomState>);

impl<'s> RoomStates<'s> {
	pub(super) fn new(labels: impl IntoIterator<Item = Label<'s>>) -> Self {
		RoomStates(labels.into_iter().map(|label| (label, RoomState::default())).collect())
	}

	pub(super) fn is_open(&self, label: Label<'s>) -> bool {
		self.0.get(&label).map_or(false, RoomState::is_open)
	}

	pub(super) fn open(&mut self, label: Label<'s>, minute: usize) {
		self.0.entry(label).or_default().opened_at = Some(minute);
	}

	pub(super) fn opened_count(&self) -> usize {
		self.0.values().filter(|state| state.is_open()).count()
	}

	/// Pressure released by the currently open valves by the end of `last_minute`,
	/// assuming nothing else gets opened.
	pub(super) fn total_flow(&self, flow_rate: impl Fn(Label<'s>) -> usize, last_minute: usize) -> usize {
		self.0.iter()
			.filter_map(|(&label, state)| state.opened_at.map(|minute| (label, minute)))
			.map(|(label, minute)| flow_rate(label) * (last_minute + 1).saturating_sub(minute))
			.sum()
	}
}


#[cfg(test)]
mod tests {
	use super::{Label, RoomStates};

	fn flow_rate(label: Label<'_>) -> usize {
		match label.0 { "BB" => 13, "DD" => 20, "JJ" => 21, _ => 0 }
	}

	fn states() -> RoomStates<'static> {
		RoomStates::new(["AA", "BB", "DD", "JJ"].map(Label))
	}

	#[test]
	fn closed_valves_release_nothing() {
		assert_eq!(states().total_flow(flow_rate, 30), 0);
		assert_eq!(states().opened_count(), 0);
	}

	#[test]
	fn total_flow() {
		let mut states = states();
		states.open(Label("DD"), 3);
		states.open(Label("BB"), 6);
		assert_eq!(states.total_flow(flow_rate, 30), 20 * 28 + 13 * 25);
		assert_eq!(states.total_flow(flow_rate, 30), states.total_flow(flow_rate, 30));
		assert_eq!(states.opened_count(), 2);
		assert!(states.is_open(Label("DD")));
		assert!(!states.is_open(Label("JJ")));
	}

	#[test]
	fn opened_after_the_deadline() {
		let mut states = states();
		states.open(Label("JJ"), 31);
		assert_eq!(states.total_flow(flow_rate, 30), 0);
		states.open(Label("DD"), 30);
		assert_eq!(states.total_flow(flow_rate, 30), 20);
	}

	#[test]
	fn branches_do_not_share_state() {
		let mut states = states();
		let branch = states.clone();
		states.open(Label("BB"), 2);
		assert!(!branch.is_open(Label("BB")));
		assert_eq!(branch.total_flow(flow_rate, 30), 0);
	}
}
