//! Domain types: daily bars and instrument identity.

pub mod bar;
pub mod ids;
pub mod instrument;

pub use bar::{Bar, BarError, Columns};
pub use ids::DatasetHash;
pub use instrument::Board;
