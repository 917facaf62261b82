// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// Declares a `dayNN` module for each of the given day numbers.
macro_rules! mod_days { ( $( $day:literal ),* $(,)? ) => { paste::paste! {
	$( mod [<day $day>]; )*
} } }

pub(crate) use mod_days;
