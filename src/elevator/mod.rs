pub mod fsm;
pub mod observer;
pub mod scheduler;
mod fsm_tests;

pub use fsm::Elevator;
pub use observer::{ElevatorEvent, ElevatorObserver, NoopObserver};
