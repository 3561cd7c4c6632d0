mod alpha_from_red;

pub use alpha_from_red::{alpha_for_red, alpha_from_red};
