pub mod allocation;
pub mod comparison;
pub mod outcome;
pub mod payback;
pub mod variant;
