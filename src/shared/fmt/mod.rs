//! Display formatting for prices and history dates.

pub mod date;
pub mod num;

pub use date::{display_date, DateZone};
pub use num::{display_price, group_thousands};
