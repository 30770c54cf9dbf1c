pub mod cards;
pub(crate) mod counts;
pub mod dealer;
pub mod error;
pub mod estimator;
pub mod outcome;
pub mod shoe;
