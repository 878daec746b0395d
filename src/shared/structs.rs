/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "moving")]
    Moving,
    #[serde(rename = "doorOpen")]
    DoorOpen,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    /// Sign of travel: `1` up, `-1` down, `0` idle.
    pub fn to_i32(&self) -> i32 {
        match *self {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Idle => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
            Direction::Idle => write!(f, "IDLE"),
        }
    }
}

/**
 * Point-in-time snapshot of an elevator, used for logging and reports.
 *
 * # Fields
 * - `behaviour`:   Door/motion state derived from the door and motor flags.
 * - `floor`:       Floor the car is currently at (1-based).
 * - `direction`:   Current direction of travel.
 * - `queue`:       Pending stops, in the order they will be served.
 * - `passengers`:  Number of riders aboard.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorState {
    pub behaviour: Behaviour,
    pub floor: u8,
    pub direction: Direction,
    pub queue: Vec<u8>,
    pub passengers: usize,
}

impl ElevatorState {
    pub fn new() -> ElevatorState {
        ElevatorState {
            behaviour: Behaviour::Idle,
            floor: 1,
            direction: Direction::Idle,
            queue: Vec::new(),
            passengers: 0,
        }
    }
}

impl Default for ElevatorState {
    fn default() -> Self {
        ElevatorState::new()
    }
}
