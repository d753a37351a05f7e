pub mod budget;
pub mod goals;
pub mod investments;
pub mod loans;
pub mod overview;
