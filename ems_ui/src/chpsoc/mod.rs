mod controller;

pub use controller::{reconcile, ChpsocController, Services, UpdateOutcome};
