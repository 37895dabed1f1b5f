pub mod density;
pub mod energy;
pub mod profiles;
