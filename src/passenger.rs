/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::Elevator;
use crate::error::ElevatorError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassengerId(pub u64);

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Passenger#{}", self.0)
    }
}

/**
 * A rider going from one floor to another.
 *
 * Passengers are plain values. They never hold on to an elevator; every
 * interaction takes the elevator as an argument and goes through its public
 * operations, so all failure modes are the elevator's.
 *
 * # Fields
 * - `id`:                  Unique id handed out by a `PassengerFactory`.
 * - `current_floor`:       Floor the ride was requested from. Not updated while riding.
 * - `destination_floor`:   Floor the rider wants to get off at.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Passenger {
    id: PassengerId,
    current_floor: u8,
    destination_floor: u8,
}

impl Passenger {
    pub fn new(id: PassengerId, current_floor: u8, destination_floor: u8) -> Passenger {
        Passenger {
            id,
            current_floor,
            destination_floor,
        }
    }

    pub fn id(&self) -> PassengerId {
        self.id
    }

    pub fn current_floor(&self) -> u8 {
        self.current_floor
    }

    pub fn destination_floor(&self) -> u8 {
        self.destination_floor
    }

    /// Board `elevator` and press the destination button.
    pub fn enter_elevator(&self, elevator: &mut Elevator) -> Result<(), ElevatorError> {
        info!("{} is entering the elevator", self);
        elevator.append_passenger(self)?;
        elevator.call_floor(self.destination_floor)
    }

    pub fn exit_elevator(&self, elevator: &mut Elevator) -> Result<(), ElevatorError> {
        info!("{} is leaving the elevator", self);
        elevator.remove_passenger(self)
    }

    /// Press the hall button on the floor the passenger is waiting at.
    pub fn call_elevator(&self, elevator: &mut Elevator) -> Result<(), ElevatorError> {
        elevator.call_floor(self.current_floor)
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}->{})",
            self.id, self.current_floor, self.destination_floor
        )
    }
}

/// Hands out passengers with monotonically increasing ids.
#[derive(Debug, Default)]
pub struct PassengerFactory {
    next_id: u64,
}

impl PassengerFactory {
    pub fn new() -> PassengerFactory {
        PassengerFactory { next_id: 0 }
    }

    pub fn create(&mut self, current_floor: u8, destination_floor: u8) -> Passenger {
        let id = PassengerId(self.next_id);
        self.next_id += 1;
        Passenger::new(id, current_floor, destination_floor)
    }

    /// Number of passengers created so far.
    pub fn issued(&self) -> u64 {
        self.next_id
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
