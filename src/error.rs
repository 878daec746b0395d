/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::passenger::PassengerId;

/// Errors raised by the elevator core.
///
/// Usage errors are the caller's to handle (e.g. retry a boarding later).
/// The variants reported by [`ElevatorError::is_broken`] mean the door/motor
/// sequencing went wrong and should be treated as fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElevatorError {
    #[error("Floor {floor} is outside the building's floor range (1..={floors_count})")]
    FloorOutOfRange { floor: u8, floors_count: u8 },

    #[error("Elevator is full ({capacity} passengers)")]
    ElevatorFull { capacity: usize },

    #[error("Elevator doors are closed. Cannot enter at the moment")]
    DoorsClosed,

    #[error("Elevator is on floor {elevator_floor}, passenger is waiting on floor {passenger_floor}")]
    FloorMismatch { elevator_floor: u8, passenger_floor: u8 },

    #[error("{0} not found in the elevator")]
    PassengerNotFound(PassengerId),

    #[error("An elevator needs at least one floor")]
    InvalidFloorsCount,

    #[error("Elevator doors cannot be opened while it is in motion")]
    OpenedWhileMoving,

    #[error("Elevator cannot move while its doors are open")]
    MovedWithOpenDoors,

    #[error("Doors opened on floor {0}, which is not a requested stop")]
    FloorNotQueued(u8),
}

impl ElevatorError {
    /// True for invariant violations of the door/motion state machine.
    pub fn is_broken(&self) -> bool {
        matches!(
            self,
            ElevatorError::OpenedWhileMoving
                | ElevatorError::MovedWithOpenDoors
                | ElevatorError::FloorNotQueued(_)
        )
    }
}
