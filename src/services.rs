// src/services.rs

pub mod aggregation;
pub mod analytics;
pub mod auth;
pub mod blacklist_service;
pub mod calculator;
pub mod campaign_service;
pub mod dashboard_service;
pub mod delivery_service;
pub mod finance_service;
pub mod order_service;
pub mod risk;
