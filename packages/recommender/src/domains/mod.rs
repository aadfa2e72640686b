// Business domains
pub mod profiles;
pub mod recommendations;
