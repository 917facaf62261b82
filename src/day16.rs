// Copyright (c) 2022 Bastiaan Marinus van de Weerd

mod flow;
mod graph;
mod parsing;
mod search;
mod selector;

use std::collections::HashMap;
use {
	flow::RoomStates,
	graph::{Graph, GraphError},
	search::{Route, Search},
	selector::Selection,
};


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Label<'s>(&'s str);

const START: Label<'static> = Label("AA");

#[cfg_attr(test, derive(Debug))]
struct Valve<'s> {
	flow_rate: usize,
	tunnels: Vec<Label<'s>>,
}

type Valves<'s> = HashMap<Label<'s>, Valve<'s>>;


/// The tunnel network, contracted to the valves worth opening (plus the start).
struct Volcano<'s> {
	start: Label<'s>,
	graph: Graph<'s>,
	flow_rates: HashMap<Label<'s>, usize>,
	positive_valves: usize,
}

impl<'s> Volcano<'s> {
	fn new(start: Label<'s>, valves: Valves<'s>) -> Result<Self, GraphError<'s>> {
		if !valves.contains_key(&start) { return Err(GraphError::UnknownNode { label: start }) }

		let flow_rates = valves.iter()
			.map(|(&label, valve)| (label, valve.flow_rate))
			.collect::<HashMap<_, _>>();
		let positive_valves = flow_rates.values().filter(|&&rate| rate > 0).count();

		let mut graph = Graph::build(valves.into_iter()
			.map(|(label, valve)| (label, valve.tunnels)))?;
		graph.contract();
		for (&label, _) in flow_rates.iter().filter(|&(&label, &rate)| rate == 0 && label != start) {
			graph.remove_node(label)?;
		}

		#[cfg(LOGGING)]
		print!("{graph}");

		Ok(Volcano { start, graph, flow_rates, positive_valves })
	}

	fn flow_rate(&self, label: Label<'s>) -> usize {
		self.flow_rates.get(&label).copied().unwrap_or(0)
	}

	fn room_states(&self) -> RoomStates<'s> {
		RoomStates::new(self.graph.labels())
	}

	/// Best single-agent route opening valves until `last_minute`.
	fn best_route(&self, last_minute: usize) -> Result<Route<'s>, GraphError<'s>> {
		Search::new(self, last_minute).run()
	}

	/// Best pair of routes for two agents that never open the same valve.
	fn best_non_overlapping_routes(&self, last_minute: usize)
	-> Result<Option<Selection<'s>>, GraphError<'s>> {
		let mut search = Search::new(self, last_minute);
		search.run()?;
		Ok(selector::select(search.memo()))
	}
}


fn input_valves_from_str(s: &str) -> Valves<'_> {
	parsing::valves_from_str(s).map(|r| r.unwrap()).collect()
}

fn input_valves() -> Valves<'static> {
	input_valves_from_str(include_str!("day16.txt"))
}


fn part1_impl<const MINUTES: usize>(input_valves: Valves<'_>) -> usize {
	let volcano = Volcano::new(START, input_valves).unwrap();
	let route = volcano.best_route(MINUTES).unwrap();

	#[cfg(LOGGING)]
	println!("Best route in {MINUTES} minutes: {route}");

	route.total_flow
}

pub(crate) fn part1() -> usize {
	part1_impl::<30>(input_valves())
}


fn part2_impl<const MINUTES: usize>(input_valves: Valves<'_>) -> usize {
	let volcano = Volcano::new(START, input_valves).unwrap();
	let selection = volcano.best_non_overlapping_routes(MINUTES).unwrap();

	#[cfg(LOGGING)]
	if let Some(selection) = &selection {
		println!("Best routes in {MINUTES} minutes: {selection}");
	}

	selection.map_or(0, |s| s.total_flow())
}

pub(crate) fn part2() -> usize {
	part2_impl::<26>(input_valves())
}


impl std::fmt::Display for Label<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.0)
	}
}

impl std::fmt::Debug for Label<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "\"{self}\"")
	}
}


#[cfg(test)]
const EXAMPLE_INPUT: &str = indoc::indoc! { "
	Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
	Valve BB has flow rate=13; tunnels lead to valves CC, AA
	Valve CC has flow rate=2; tunnels lead to valves DD, BB
	Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE
	Valve EE has flow rate=3; tunnels lead to valves FF, DD
	Valve FF has flow rate=0; tunnels lead to valves EE, GG
	Valve GG has flow rate=0; tunnels lead to valves FF, HH
	Valve HH has flow rate=22; tunnel leads to valve GG
	Valve II has flow rate=0; tunnels lead to valves AA, JJ
	Valve JJ has flow rate=21; tunnel leads to valve II
" };

#[test]
fn tests() {
	assert_eq!(part1_impl::<30>(input_valves_from_str(EXAMPLE_INPUT)), 1651);
	assert_eq!(part1(), 1651);
	assert_eq!(part2_impl::<26>(input_valves_from_str(EXAMPLE_INPUT)), 1707);
	assert_eq!(part2(), 1707);
}

#[test]
fn two_agents_split_the_valves() {
	let volcano = Volcano::new(START, input_valves_from_str(EXAMPLE_INPUT)).unwrap();
	let selection = volcano.best_non_overlapping_routes(26).unwrap().unwrap();
	assert_eq!(selection.total_flow(), 1707);

	let second = selection.second.as_ref().unwrap();
	assert_eq!(selection.first.opened.intersection_len(&second.opened), 1);
	assert!(selection.first.opened.labels().contains(&START));
	assert!(second.opened.labels().contains(&START));
}

#[test]
fn out_of_reach_valves_are_never_opened() {
	use std::fmt::Write as _;

	// `AA` reaches `BB` directly, but `ZZ` only through a corridor of 40 stuck valves.
	let corridor = (0..40)
		.map(|i| format!("Q{}{}", (b'A' + i / 26) as char, (b'A' + i % 26) as char))
		.collect::<Vec<_>>();
	let mut input = String::new();
	writeln!(input, "Valve AA has flow rate=0; tunnels lead to valves BB, {}", corridor[0]).unwrap();
	writeln!(input, "Valve BB has flow rate=10; tunnel leads to valve AA").unwrap();
	for (i, room) in corridor.iter().enumerate() {
		let prev = if i == 0 { "AA" } else { corridor[i - 1].as_str() };
		let next = corridor.get(i + 1).map_or("ZZ", String::as_str);
		writeln!(input, "Valve {room} has flow rate=0; tunnels lead to valves {prev}, {next}").unwrap();
	}
	writeln!(input, "Valve ZZ has flow rate=100; tunnel leads to valve {}", corridor[39]).unwrap();

	let volcano = Volcano::new(START, input_valves_from_str(&input)).unwrap();
	assert_eq!(volcano.graph.distance(START, Label("ZZ")).unwrap(), Some(41));

	let mut search = Search::new(&volcano, 30);
	let route = search.run().unwrap();
	assert_eq!(route.total_flow, 10 * 28);
	assert!(!route.path.contains(&Label("ZZ")));
	assert!(search.memo().iter().all(|(opened, _)| !opened.labels().contains(&Label("ZZ"))));
}

#[test]
fn unknown_labels_fail_construction() {
	let valves = input_valves_from_str(indoc::indoc! { "
		Valve AA has flow rate=0; tunnels lead to valves BB, XX
		Valve BB has flow rate=5; tunnel leads to valve AA
	" });
	assert!(matches!(Volcano::new(START, valves),
		Err(GraphError::UnknownTunnel { from: Label("AA"), to: Label("XX") })));

	let valves = input_valves_from_str("Valve BB has flow rate=5; tunnel leads to valve BB\n");
	assert!(matches!(Volcano::new(START, valves),
		Err(GraphError::UnknownNode { label: Label("AA") })));
}
