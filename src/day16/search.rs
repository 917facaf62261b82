// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashMap;
use super::{flow::RoomStates, graph::GraphError, Label, Volcano};


/// A set of labels, stored as a sorted sequence so that equal sets compare
/// and hash equally regardless of the order they were visited in.
#[cfg_attr(test, derive(Debug))]
#[derive(Clone, PartialEq, Eq, Hash)]
pub(super) struct OpenedSet<'s>(Box<[Label<'s>]>);

impl<'s> OpenedSet<'s> {
	pub(super) fn labels(&self) -> &[Label<'s>] {
		&self.0
	}

	pub(super) fn intersection_len(&self, other: &Self) -> usize {
		use itertools::{EitherOrBoth, Itertools as _};
		self.0.iter()
			.merge_join_by(other.0.iter(), |a, b| a.cmp(b))
			.filter(|e| matches!(e, EitherOrBoth::Both(..)))
			.count()
	}
}

impl<'s> FromIterator<Label<'s>> for OpenedSet<'s> {
	fn from_iter<I: IntoIterator<Item = Label<'s>>>(iter: I) -> Self {
		use itertools::Itertools as _;
		OpenedSet(iter.into_iter().sorted().dedup().collect())
	}
}


/// Best total flow found for every set of opened valves.
#[derive(Default)]
pub(super) struct Memo<'s>(HashMap<OpenedSet<'s>, usize>);

impl<'s> Memo<'s> {
	/// Keeps the running maximum; a lower `total_flow` never replaces a higher one.
	pub(super) fn record(&mut self, path: &[Label<'s>], total_flow: usize) {
		self.0.entry(path.iter().copied().collect())
			.and_modify(|best| *best = (*best).max(total_flow))
			.or_insert(total_flow);
	}

	#[cfg(test)]
	pub(super) fn get(&self, opened: &OpenedSet<'s>) -> Option<usize> {
		self.0.get(opened).copied()
	}

	pub(super) fn iter(&self) -> impl Iterator<Item = (&OpenedSet<'s>, usize)> + '_ {
		self.0.iter().map(|(opened, &total_flow)| (opened, total_flow))
	}

	#[cfg(any(test, LOGGING))]
	pub(super) fn len(&self) -> usize {
		self.0.len()
	}
}


#[cfg_attr(test, derive(Debug))]
#[derive(Clone)]
pub(super) struct Route<'s> {
	/// The start, followed by the valves in the order they were opened.
	pub(super) path: Vec<Label<'s>>,
	pub(super) total_flow: usize,
}


/// Exhaustive depth-first search over the order in which valves get opened.
pub(super) struct Search<'v, 's> {
	volcano: &'v Volcano<'s>,
	last_minute: usize,
	memo: Memo<'s>,
}

impl<'v, 's> Search<'v, 's> {
	pub(super) fn new(volcano: &'v Volcano<'s>, last_minute: usize) -> Self {
		Search { volcano, last_minute, memo: Memo::default() }
	}

	pub(super) fn run(&mut self) -> Result<Route<'s>, GraphError<'s>> {
		let route = self.dfs(self.volcano.start, 1, self.volcano.room_states(), vec![])?;

		#[cfg(LOGGING)]
		println!("Searched {} minutes: {} opened sets, best {route}",
			self.last_minute, self.memo.len());

		Ok(route)
	}

	pub(super) fn memo(&self) -> &Memo<'s> {
		&self.memo
	}

	/// Arrives at `at` during `minute` (1-based), opens its valve if it has one,
	/// then tries every unopened valve that can still be reached in time.
	fn dfs(
		&mut self,
		at: Label<'s>,
		mut minute: usize,
		mut states: RoomStates<'s>,
		mut path: Vec<Label<'s>>,
	) -> Result<Route<'s>, GraphError<'s>> {
		let volcano = self.volcano;
		let flow_rate = |label: Label<'s>| volcano.flow_rate(label);

		let total_flow = states.total_flow(flow_rate, self.last_minute);
		self.memo.record(&path, total_flow);
		let mut best = Route { path: path.clone(), total_flow };

		if states.opened_count() == volcano.positive_valves || minute >= self.last_minute {
			return Ok(best)
		}

		path.push(at);
		if !states.is_open(at) && flow_rate(at) > 0 {
			minute += 1;
			states.open(at, minute);
			let total_flow = states.total_flow(flow_rate, self.last_minute);
			self.memo.record(&path, total_flow);
			if total_flow > best.total_flow {
				best = Route { path: path.clone(), total_flow };
			}
		}

		for &(next, distance) in volcano.graph.neighbors(at)? {
			if states.is_open(next) || flow_rate(next) == 0 { continue }
			if minute + distance > self.last_minute { continue }

			let route = self.dfs(next, minute + distance, states.clone(), path.clone())?;
			if route.total_flow > best.total_flow { best = route }
		}

		Ok(best)
	}
}

impl std::fmt::Display for OpenedSet<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use itertools::Itertools as _;
		write!(f, "{{{}}}", self.labels().iter().join(","))
	}
}

impl std::fmt::Display for Route<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use itertools::Itertools as _;
		write!(f, "{} ({})", self.path.iter().join(" -> "), self.total_flow)
	}
}
