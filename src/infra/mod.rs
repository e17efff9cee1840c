pub mod factory;
pub mod google;
pub mod repositories;
