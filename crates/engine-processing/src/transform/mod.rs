pub mod coerce;
pub mod dates;
pub mod dedup;
pub mod derive;
pub mod normalize;
pub mod pipeline;
