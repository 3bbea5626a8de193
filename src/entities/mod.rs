//! Entity module - SeaORM definitions for the two elevator tables.
//! `states` holds samples of the car, `demands` holds floor calls.

pub mod demand;
pub mod state;

pub use demand::{Column as DemandColumn, Entity as Demand, Model as DemandModel};
pub use state::{Column as StateColumn, Entity as State, Model as StateModel};
