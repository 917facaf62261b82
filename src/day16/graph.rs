// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::{BTreeMap, BTreeSet};
use super::Label;


#[allow(dead_code)]
#[derive(Debug)]
pub(super) enum GraphError<'s> {
	UnknownNode { label: Label<'s> },
	UnknownTunnel { from: Label<'s>, to: Label<'s> },
	RemovedNode { label: Label<'s> },
	Uncontracted,
}

/// Weighted adjacency over labeled nodes.
///
/// Built with unit-weight tunnels, then [`Graph::contract`]ed so that every
/// edge weight is a shortest-path distance, after which nodes may be removed
/// without affecting the distances between those that remain.
pub(super) struct Graph<'s> {
	adjacency: BTreeMap<Label<'s>, Vec<(Label<'s>, usize)>>,
	removed: BTreeSet<Label<'s>>,
	contracted: bool,
}

impl<'s> Graph<'s> {
	pub(super) fn build<T>(tunnels: impl IntoIterator<Item = (Label<'s>, T)>)
	-> Result<Self, GraphError<'s>>
	where T: IntoIterator<Item = Label<'s>> {
		let adjacency = tunnels.into_iter()
			.map(|(from, to)| (from, to.into_iter().map(|to| (to, 1)).collect::<Vec<_>>()))
			.collect::<BTreeMap<_, _>>();

		if let Some((&from, &(to, _))) = adjacency.iter()
			.flat_map(|(from, edges)| edges.iter().map(move |edge| (from, edge)))
			.find(|(_, (to, _))| !adjacency.contains_key(to)) {
			return Err(GraphError::UnknownTunnel { from, to })
		}

		Ok(Graph { adjacency, removed: BTreeSet::new(), contracted: false })
	}

	/// Replaces the adjacency with all-pairs shortest-path distances
	/// (Floyd–Warshall). Pairs without any path get no edge.
	pub(super) fn contract(&mut self) {
		let labels = self.adjacency.keys().copied().collect::<Vec<_>>();
		let n = labels.len();
		let index = |label: &Label<'s>| labels.binary_search(label).ok();

		let mut distances = vec![None::<usize>; n * n];
		for i in 0..n { distances[i * n + i] = Some(0) }
		for (i, edges) in self.adjacency.values().enumerate() {
			for (j, weight) in edges.iter().filter_map(|(to, w)| index(to).map(|j| (j, *w))) {
				let d = &mut distances[i * n + j];
				*d = Some(d.map_or(weight, |d| d.min(weight)));
			}
		}

		for (k, i, j) in itertools::iproduct!(0..n, 0..n, 0..n) {
			let (Some(ik), Some(kj)) = (distances[i * n + k], distances[k * n + j]) else { continue };
			if distances[i * n + j].map_or(true, |ij| ik + kj < ij) {
				distances[i * n + j] = Some(ik + kj);
			}
		}

		for (i, edges) in self.adjacency.values_mut().enumerate() {
			*edges = (0..n)
				.filter(|&j| j != i)
				.filter_map(|j| distances[i * n + j].map(|d| (labels[j], d)))
				.collect();
		}
		self.contracted = true;
	}

	/// Deletes `label` and every edge leading to it. Only valid once contracted.
	pub(super) fn remove_node(&mut self, label: Label<'s>) -> Result<(), GraphError<'s>> {
		if !self.contracted { return Err(GraphError::Uncontracted) }
		if self.adjacency.remove(&label).is_none() { return Err(self.missing(label)) }
		for edges in self.adjacency.values_mut() {
			edges.retain(|(to, _)| *to != label);
		}
		self.removed.insert(label);
		Ok(())
	}

	pub(super) fn neighbors(&self, label: Label<'s>) -> Result<&[(Label<'s>, usize)], GraphError<'s>> {
		self.adjacency.get(&label)
			.map(Vec::as_slice)
			.ok_or_else(|| self.missing(label))
	}

	/// Returns `Ok(None)` if no path connects the two nodes.
	#[allow(dead_code)]
	pub(super) fn distance(&self, from: Label<'s>, to: Label<'s>)
	-> Result<Option<usize>, GraphError<'s>> {
		if !self.contracted { return Err(GraphError::Uncontracted) }
		let edges = self.neighbors(from)?;
		self.neighbors(to)?;
		if from == to { return Ok(Some(0)) }
		Ok(edges.iter().find(|(l, _)| *l == to).map(|&(_, d)| d))
	}

	pub(super) fn labels(&self) -> impl Iterator<Item = Label<'s>> + '_ {
		self.adjacency.keys().copied()
	}

	fn missing(&self, label: Label<'s>) -> GraphError<'s> {
		if self.removed.contains(&label) {
			GraphError::RemovedNode { label }
		} else {
			GraphError::UnknownNode { label }
		}
	}
}

impl std::fmt::Display for Graph<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for (label, edges) in &self.adjacency {
			write!(f, "{label} ->")?;
			for (to, distance) in edges { write!(f, " {to} ({distance})")? }
			writeln!(f)?;
		}
		Ok(())
	}
}


#[cfg(test)]
mod tests {
	use test_case::test_case;
	use super::{Graph, GraphError, Label};

	const TUNNELS: [(&str, &[&str]); 10] = [
		("AA", &["DD", "II", "BB"]),
		("BB", &["CC", "AA"]),
		("CC", &["DD", "BB"]),
		("DD", &["CC", "AA", "EE"]),
		("EE", &["FF", "DD"]),
		("FF", &["EE", "GG"]),
		("GG", &["FF", "HH"]),
		("HH", &["GG"]),
		("II", &["AA", "JJ"]),
		("JJ", &["II"]),
	];

	fn graph<'s: 't, 't>(tunnels: impl IntoIterator<Item = (&'s str, &'t [&'s str])>) -> Graph<'s> {
		Graph::build(tunnels.into_iter()
			.map(|(from, to)| (Label(from), to.iter().map(|&to| Label(to)))))
			.unwrap()
	}

	fn contracted() -> Graph<'static> {
		let mut graph = graph(TUNNELS);
		graph.contract();
		graph
	}

	#[test_case("AA", "AA", 0)]
	#[test_case("AA", "BB", 1)]
	#[test_case("AA", "CC", 2)]
	#[test_case("AA", "HH", 5)]
	#[test_case("AA", "JJ", 2)]
	#[test_case("BB", "JJ", 3)]
	#[test_case("CC", "EE", 2)]
	#[test_case("HH", "BB", 6)]
	#[test_case("JJ", "HH", 7)]
	fn shortest_distances(from: &str, to: &str, expected: usize) {
		let graph = contracted();
		assert_eq!(graph.distance(Label(from), Label(to)).unwrap(), Some(expected));
		assert_eq!(graph.distance(Label(to), Label(from)).unwrap(), Some(expected));
	}

	#[test]
	fn contraction_is_independent_of_order() {
		let mut reversed = graph(TUNNELS.into_iter().rev());
		reversed.contract();
		assert_eq!(reversed.to_string(), contracted().to_string());
	}

	#[test]
	fn pruning_preserves_distances() {
		let mut graph = contracted();
		let kept = ["AA", "BB", "CC", "DD", "EE", "HH", "JJ"].map(Label);
		let before = kept.iter()
			.flat_map(|&from| kept.iter().map(move |&to| (from, to)))
			.map(|(from, to)| graph.distance(from, to).unwrap())
			.collect::<Vec<_>>();

		for label in ["FF", "GG", "II"] { graph.remove_node(Label(label)).unwrap() }

		let after = kept.iter()
			.flat_map(|&from| kept.iter().map(move |&to| (from, to)))
			.map(|(from, to)| graph.distance(from, to).unwrap())
			.collect::<Vec<_>>();
		assert_eq!(before, after);
		assert!(graph.neighbors(Label("AA")).unwrap().iter().all(|(to, _)| to.0 != "II"));
	}

	#[test]
	fn removed_nodes_are_not_queryable() {
		let mut graph = contracted();
		graph.remove_node(Label("II")).unwrap();
		assert!(matches!(graph.neighbors(Label("II")),
			Err(GraphError::RemovedNode { label: Label("II") })));
		assert!(matches!(graph.distance(Label("AA"), Label("II")),
			Err(GraphError::RemovedNode { .. })));
		assert!(matches!(graph.remove_node(Label("II")),
			Err(GraphError::RemovedNode { .. })));
		assert!(matches!(graph.distance(Label("AA"), Label("XX")),
			Err(GraphError::UnknownNode { label: Label("XX") })));
	}

	#[test]
	fn removal_requires_contraction() {
		let mut graph = graph(TUNNELS);
		assert!(matches!(graph.remove_node(Label("II")), Err(GraphError::Uncontracted)));
		assert!(matches!(graph.distance(Label("AA"), Label("BB")), Err(GraphError::Uncontracted)));
	}

	#[test]
	fn unreachable_nodes_have_no_distance() {
		let mut graph = graph([
			("AA", &["BB"][..]),
			("BB", &["AA"][..]),
			("XX", &[][..]),
		]);
		graph.contract();
		assert_eq!(graph.distance(Label("AA"), Label("XX")).unwrap(), None);
		assert_eq!(graph.neighbors(Label("AA")).unwrap(), [(Label("BB"), 1)]);
		assert!(graph.neighbors(Label("XX")).unwrap().is_empty());
	}

	#[test]
	fn unknown_tunnels_fail_build() {
		let built = Graph::build([(Label("AA"), vec![Label("BB")])]);
		assert!(matches!(built, Err(GraphError::UnknownTunnel { from: Label("AA"), to: Label("BB") })));
	}
}
