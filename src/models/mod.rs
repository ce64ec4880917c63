pub mod account;
pub mod catalog;
pub mod listing;
pub mod order;
pub mod report;
pub mod write_outcome;

pub use account::*;
pub use catalog::*;
pub use listing::*;
pub use order::*;
pub use report::*;
pub use write_outcome::*;
