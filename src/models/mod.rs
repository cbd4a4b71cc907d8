//! Domain model layer. `Order` is the sole entity.

pub mod order;

pub use order::Order;
