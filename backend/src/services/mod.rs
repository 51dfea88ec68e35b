//! Business logic services for the SGE Retail Management Platform

pub mod auth;
pub mod empty_crate;
pub mod product;
pub mod purchase_order;
pub mod reporting;
pub mod sell_order;
pub mod store;
pub mod sub_agent;
pub mod user;
pub mod vehicle;

pub use auth::AuthService;
pub use empty_crate::EmptyCrateService;
pub use product::ProductService;
pub use purchase_order::PurchaseOrderService;
pub use reporting::ReportingService;
pub use sell_order::SellOrderService;
pub use store::StoreService;
pub use sub_agent::SubAgentService;
pub use user::UserService;
pub use vehicle::VehicleService;
