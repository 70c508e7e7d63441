pub mod aprs;
pub mod ndbc;
