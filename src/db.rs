// src/db.rs

pub mod blacklist_repo;
pub mod campaign_repo;
pub mod delivery_repo;
pub mod finance_repo;
pub mod order_repo;
pub mod user_repo;

pub use blacklist_repo::BlacklistRepository;
pub use campaign_repo::CampaignRepository;
pub use delivery_repo::DeliveryRepository;
pub use finance_repo::FinanceRepository;
pub use order_repo::OrderRepository;
pub use user_repo::UserRepository;
