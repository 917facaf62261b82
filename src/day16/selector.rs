// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use super::search::{Memo, OpenedSet};


/// Two routes may share this many labels and still count as disjoint: the
/// start, which is on every route but is never itself opened.
const MAX_SHARED: usize = 1;

#[cfg_attr(test, derive(Debug))]
pub(super) struct Entry<'s> {
	pub(super) opened: OpenedSet<'s>,
	pub(super) total_flow: usize,
}

/// The best memo entry for each agent; the second agent may stay idle.
#[cfg_attr(test, derive(Debug))]
pub(super) struct Selection<'s> {
	pub(super) first: Entry<'s>,
	pub(super) second: Option<Entry<'s>>,
}

impl Selection<'_> {
	pub(super) fn total_flow(&self) -> usize {
		self.first.total_flow + self.second.as_ref().map_or(0, |e| e.total_flow)
	}
}

/// Scans every pair of memo entries for the best combined total flow.
pub(super) fn select<'s>(memo: &Memo<'s>) -> Option<Selection<'s>> {
	use rayon::prelude::{IntoParallelRefIterator as _, IndexedParallelIterator as _, ParallelIterator as _};

	let entries = memo.iter().collect::<Vec<_>>();
	let &(single, single_flow) = entries.iter().max_by_key(|(_, total_flow)| *total_flow)?;

	let pair = entries.par_iter()
		.enumerate()
		.filter_map(|(i, &(a, a_flow))| entries[i + 1..].iter()
			.filter(|(b, _)| a.intersection_len(b) <= MAX_SHARED)
			.max_by_key(|(_, b_flow)| *b_flow)
			.map(|&(b, b_flow)| ((a, a_flow), (b, b_flow))))
		.max_by_key(|((_, a_flow), (_, b_flow))| a_flow + b_flow);

	let entry = |opened: &OpenedSet<'s>, total_flow| Entry { opened: opened.clone(), total_flow };
	match pair {
		Some(((a, a_flow), (b, b_flow))) if a_flow + b_flow >= single_flow =>
			Some(Selection { first: entry(a, a_flow), second: Some(entry(b, b_flow)) }),
		_ => Some(Selection { first: entry(single, single_flow), second: None }),
	}
}

impl std::fmt::Display for Selection<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} ({})", self.first.opened, self.first.total_flow)?;
		if let Some(second) = &self.second {
			write!(f, " + {} ({})", second.opened, second.total_flow)?;
		}
		write!(f, " = {}", self.total_flow())
	}
}
