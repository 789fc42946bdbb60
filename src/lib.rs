pub mod error;
pub mod labels;
pub mod loan;
pub mod series;
