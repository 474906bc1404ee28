//! Edges of the system: the transport-neutral cart controller and the CSV
//! formats used by the replay CLI.

pub mod csv;
pub mod transport;
