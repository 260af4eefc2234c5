pub mod jd;

pub use jd::{night_label_zone, JulianDate, UNIX_EPOCH_JD};
