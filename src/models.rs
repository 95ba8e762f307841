pub mod auth;
pub mod blacklist;
pub mod calculator;
pub mod campaigns;
pub mod dashboard;
pub mod delivery;
pub mod finance;
pub mod orders;
pub mod risk;
