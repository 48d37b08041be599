pub mod answers;
pub mod contract;
pub mod portfolio;
pub mod profile;
