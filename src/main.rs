// Copyright (c) 2022 Bastiaan Marinus van de Weerd

mod util;
util::mod_days![16];

fn main() {
	println!("Day 16; part 1: {}, part 2: {}", day16::part1(), day16::part2());
}
