// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use {std::num::ParseIntError, either::Either};
use super::{Label, Valve};


macro_rules! str_offset { ( $s0:expr, $s:expr ) => {
	// SAFETY: It is assumed that `$s0` and `$s` point into the same string slice
	unsafe { $s.as_ptr().offset_from($s0.as_ptr()) as usize }
} }

fn try_strip_prefix<'s>(s: &'s str, prefix: &str) -> Result<&'s str, &'s str> {
	s.strip_prefix(prefix).ok_or_else(|| {
		let p = s.bytes().zip(prefix.bytes()).position(|(s, p)| s != p).unwrap_or(s.len());
		&s[p..]
	})
}

#[allow(dead_code)]
#[derive(Debug)]
pub(super) enum LabelError {
	Empty,
	Invalid { column: usize, found: char },
}

fn try_label_from_str(s: &str) -> Result<(Label<'_>, &str), LabelError> {
	let len = s.bytes().take_while(u8::is_ascii_uppercase).count();
	if len == 0 {
		return Err(match s.chars().next() {
			Some(found) => LabelError::Invalid { column: 1, found },
			None => LabelError::Empty,
		})
	}
	Ok((Label(&s[..len]), &s[len..]))
}

macro_rules! recolumn_label_err { ( $offset:expr ) => { |e| match e {
	LabelError::Invalid { column, found } => LabelError::Invalid { column: column + $offset, found },
	e => e,
} } }

#[allow(dead_code)]
#[derive(Debug)]
pub(super) enum TunnelError {
	Format { column: usize },
	Label { offset: usize, source: LabelError },
}

fn try_tunnels_from_str(s: &str) -> Result<(Vec<Label<'_>>, &str), TunnelError> {
	let s0 = s;
	let mut s = s;
	let mut tunnels = vec![];
	for offset in 0.. {
		let (tunnel, rest) = try_label_from_str(s).map_err(|e| TunnelError::Label {
			offset, source: recolumn_label_err!(str_offset!(s0, s))(e) })?;
		tunnels.push(tunnel);
		s = rest;
		if s.is_empty() || s.starts_with('\n') { break }
		s = try_strip_prefix(s, ", ")
			.map_err(|s| TunnelError::Format { column: str_offset!(s0, s) + 1 })?;
	}
	Ok((tunnels, s))
}

macro_rules! recolumn_tunnel_err { ( $offset:expr ) => { |e| match e {
	TunnelError::Format { column } => TunnelError::Format { column: column + $offset },
	TunnelError::Label { offset, source } =>
		TunnelError::Label { offset, source: recolumn_label_err!($offset)(source) },
} } }

/// Tunnel errors are on the left for the singular form (`tunnel leads to
/// valve`), on the right for the plural form (`tunnels lead to valves`).
#[allow(dead_code)]
#[derive(Debug)]
pub(super) enum ValveError {
	Format { column: usize },
	Label(LabelError),
	FlowRate(ParseIntError),
	Tunnels(Either<TunnelError, TunnelError>),
}

fn try_valve_from_str(s: &str) -> Result<(Label<'_>, Valve<'_>, &str), ValveError> {
	use ValveError as E;
	let s0 = s;
	macro_rules! c { ( $s:expr ) => { str_offset!(s0, $s) } }

	let s = try_strip_prefix(s, "Valve ")
		.map_err(|s| E::Format { column: c!(s) + 1 })?;
	let (label, s) = try_label_from_str(s)
		.map_err(|e| E::Label(recolumn_label_err!(c!(s))(e)))?;
	let s = try_strip_prefix(s, " has flow rate=")
		.map_err(|s| E::Format { column: c!(s) + 1 })?;
	let (flow_rate, s) = s.split_once(';')
		.ok_or(E::Format { column: c!(s) + s.len() + 1 })?;
	let flow_rate = flow_rate.parse().map_err(E::FlowRate)?;
	let s = try_strip_prefix(s, " tunnel")
		.map_err(|s| E::Format { column: c!(s) + 1 })?;
	let (tunnels, s) = if s.starts_with('s') {
		let s = try_strip_prefix(s, "s lead to valves ")
			.map_err(|s| E::Format { column: c!(s) + 1 })?;
		try_tunnels_from_str(s)
			.map_err(|e| E::Tunnels(Either::Right(recolumn_tunnel_err!(c!(s))(e))))?
	} else {
		let s = try_strip_prefix(s, " leads to valve ")
			.map_err(|s| E::Format { column: c!(s) + 1 })?;
		let (tunnel, s) = try_label_from_str(s).map_err(|e| E::Tunnels(Either::Left(
			TunnelError::Label { offset: 0, source: recolumn_label_err!(c!(s))(e) })))?;
		(vec![tunnel], s)
	};
	Ok((label, Valve { flow_rate, tunnels }, s))
}

#[allow(dead_code)]
#[derive(Debug)]
pub(super) struct ValvesError { line: usize, source: ValveError }

pub(super) fn valves_from_str(s: &str)
-> impl Iterator<Item = Result<(Label<'_>, Valve<'_>), ValvesError>> + '_ {
	s.lines()
		.enumerate()
		.filter(|(_, line)| !line.is_empty())
		.map(|(l, line)| try_valve_from_str(line)
			.and_then(|(label, valve, rest)| match rest {
				"" => Ok((label, valve)),
				rest => Err(ValveError::Format { column: str_offset!(line, rest) + 1 }),
			})
			.map_err(|e| ValvesError { line: l + 1, source: e }))
}
