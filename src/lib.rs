//! Single-elevator simulation.
//!
//! The core is [`Elevator`]: a car serving a queue of floor stops with SCAN
//! ordering, a door/motor state machine and a pluggable
//! [`ElevatorObserver`]. [`Passenger`] values ride it through its public
//! operations. [`simulation::Simulation`] drives the car with random
//! passenger traffic.

/* Modules */
pub mod config;
pub mod elevator;
pub mod error;
pub mod passenger;
pub mod shared;
pub mod simulation;

pub use elevator::{Elevator, ElevatorEvent, ElevatorObserver, NoopObserver};
pub use error::ElevatorError;
pub use passenger::{Passenger, PassengerFactory, PassengerId};
pub use shared::{Behaviour, Direction, ElevatorState};
