pub mod device;
pub mod observables;
