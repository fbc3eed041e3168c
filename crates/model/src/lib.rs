pub mod delivery;
pub mod errors;
pub mod store;
pub mod user;
