//! HTTP handlers for the SGE Retail Management Platform

mod auth;
mod empty_crates;
mod health;
mod products;
mod purchase_orders;
mod reports;
mod sell_orders;
mod stores;
mod sub_agents;
mod users;
mod vehicles;

pub use auth::*;
pub use empty_crates::*;
pub use health::*;
pub use products::*;
pub use purchase_orders::*;
pub use reports::*;
pub use sell_orders::*;
pub use stores::*;
pub use sub_agents::*;
pub use users::*;
pub use vehicles::*;
