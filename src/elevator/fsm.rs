/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ElevatorConfig;
use crate::elevator::observer::{ElevatorEvent, ElevatorObserver, NoopObserver};
use crate::elevator::scheduler;
use crate::error::ElevatorError;
use crate::passenger::{Passenger, PassengerId};
use crate::shared::{Behaviour, Direction, ElevatorState};

/**
 * Single elevator car and its stop queue.
 *
 * The car is advanced one floor at a time by `step`, which closes the doors,
 * heads for the first queued floor and opens the doors again when it reaches a
 * queued floor. The queue is re-sorted on every new request so the car
 * finishes its sweep before turning around.
 *
 * # Fields
 * - `floors_count`:    Number of floors, fixed at construction. Floors are 1-based.
 * - `current_floor`:   Floor the car is at, always in `1..=floors_count`.
 * - `queue`:           Requested stops without duplicates, in serving order.
 * - `direction`:       Direction of travel. `Idle` iff the queue is empty.
 * - `max_capacity`:    Maximum number of passengers aboard.
 * - `passengers`:      Riders aboard, keyed by id.
 * - `is_open`:         Door state. Never true while `is_moving`.
 * - `is_moving`:       Motor state.
 * - `observer`:        Receiver of transition events. Taken out while a callback runs.
 * - `pending_events`:  Events raised during a callback, waiting for delivery.
 * - `dispatching`:     Set while the observer is being notified.
 */
pub struct Elevator {
    pub(crate) floors_count: u8,
    pub(crate) current_floor: u8,
    pub(crate) queue: Vec<u8>,
    pub(crate) direction: Direction,
    pub(crate) max_capacity: usize,
    pub(crate) passengers: BTreeMap<PassengerId, Passenger>,
    pub(crate) is_open: bool,
    pub(crate) is_moving: bool,
    observer: Option<Box<dyn ElevatorObserver>>,
    pending_events: VecDeque<ElevatorEvent>,
    dispatching: bool,
}

impl Elevator {
    pub fn new(floors_count: u8, max_capacity: usize) -> Result<Elevator, ElevatorError> {
        if floors_count == 0 {
            return Err(ElevatorError::InvalidFloorsCount);
        }

        Ok(Elevator {
            floors_count,
            current_floor: 1,
            queue: Vec::new(),
            direction: Direction::Idle,
            max_capacity,
            passengers: BTreeMap::new(),
            is_open: false,
            is_moving: false,
            observer: Some(Box::new(NoopObserver)),
            pending_events: VecDeque::new(),
            dispatching: false,
        })
    }

    pub fn from_config(config: &ElevatorConfig) -> Result<Elevator, ElevatorError> {
        Elevator::new(config.n_floors, config.max_capacity)
    }

    pub fn with_observer(mut self, observer: Box<dyn ElevatorObserver>) -> Elevator {
        self.set_observer(observer);
        self
    }

    /// Replace the observer. Events still queued go to the new observer.
    pub fn set_observer(&mut self, observer: Box<dyn ElevatorObserver>) {
        self.observer = Some(observer);
    }

    /***************************************/
    /*          Driver-facing API          */
    /***************************************/

    /// Request a stop at `floor`.
    ///
    /// A floor that is already queued is not added twice. If the car is idle
    /// and already standing on `floor`, the doors open right away.
    pub fn call_floor(&mut self, floor: u8) -> Result<(), ElevatorError> {
        if floor < 1 || floor > self.floors_count {
            return Err(ElevatorError::FloorOutOfRange {
                floor,
                floors_count: self.floors_count,
            });
        }

        if !self.queue.contains(&floor) {
            self.queue.push(floor);
            self.sort_queue();
        }

        if self.direction == Direction::Idle {
            self.update_direction();
            if self.current_floor == floor {
                self.open_doors()?;
            }
        }

        Ok(())
    }

    /// Advance the simulation by one time unit.
    ///
    /// Closes open doors, travels at most one floor toward the head of the
    /// queue and opens the doors if the car ends up on a queued floor.
    pub fn step(&mut self) -> Result<(), ElevatorError> {
        if self.is_open {
            self.close_doors();
        }

        self.update_direction();

        let head = self.queue.first().copied();
        if self.direction != Direction::Idle && head != Some(self.current_floor) {
            self.start_moving()?;

            match self.direction {
                Direction::Up => self.move_up(),
                Direction::Down => self.move_down(),
                Direction::Idle => (),
            }
        }

        if self.queue.contains(&self.current_floor) {
            self.stop_moving();
            self.open_doors()?;
        }

        debug!("Current floor is {}", self.current_floor);
        Ok(())
    }

    pub fn append_passenger(&mut self, passenger: &Passenger) -> Result<(), ElevatorError> {
        if self.is_full() {
            return Err(ElevatorError::ElevatorFull {
                capacity: self.max_capacity,
            });
        }
        if !self.is_open {
            return Err(ElevatorError::DoorsClosed);
        }
        if self.current_floor != passenger.current_floor() {
            return Err(ElevatorError::FloorMismatch {
                elevator_floor: self.current_floor,
                passenger_floor: passenger.current_floor(),
            });
        }

        self.passengers.insert(passenger.id(), *passenger);
        self.emit(ElevatorEvent::PassengerEntered(*passenger));
        Ok(())
    }

    pub fn remove_passenger(&mut self, passenger: &Passenger) -> Result<(), ElevatorError> {
        match self.passengers.remove(&passenger.id()) {
            Some(removed) => {
                self.emit(ElevatorEvent::PassengerExited(removed));
                Ok(())
            }
            None => Err(ElevatorError::PassengerNotFound(passenger.id())),
        }
    }

    /***************************************/
    /*              Accessors              */
    /***************************************/
    pub fn current_floor(&self) -> u8 {
        self.current_floor
    }

    pub fn floors_count(&self) -> u8 {
        self.floors_count
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn queue(&self) -> &[u8] {
        &self.queue
    }

    pub fn is_full(&self) -> bool {
        self.passengers.len() >= self.max_capacity
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    /// Snapshot of the riders aboard, ordered by id.
    pub fn passengers(&self) -> Vec<Passenger> {
        self.passengers.values().copied().collect()
    }

    pub fn behaviour(&self) -> Behaviour {
        if self.is_open {
            Behaviour::DoorOpen
        } else if self.is_moving {
            Behaviour::Moving
        } else {
            Behaviour::Idle
        }
    }

    pub fn state(&self) -> ElevatorState {
        ElevatorState {
            behaviour: self.behaviour(),
            floor: self.current_floor,
            direction: self.direction,
            queue: self.queue.clone(),
            passengers: self.passengers.len(),
        }
    }

    /***************************************/
    /*         Door/motion control         */
    /***************************************/

    /// Open the doors on a queued floor, completing that stop.
    pub(crate) fn open_doors(&mut self) -> Result<(), ElevatorError> {
        if self.is_moving {
            return Err(ElevatorError::OpenedWhileMoving);
        }
        let index = self
            .queue
            .iter()
            .position(|&floor| floor == self.current_floor)
            .ok_or(ElevatorError::FloorNotQueued(self.current_floor))?;

        debug!("Opening the doors");
        info!("Elevator arrived on {} floor", self.current_floor);
        self.queue.remove(index);
        if self.queue.is_empty() {
            self.update_direction();
        }
        self.is_open = true;
        debug!("Doors are open");

        self.emit(ElevatorEvent::DoorsOpened);
        Ok(())
    }

    pub(crate) fn close_doors(&mut self) {
        debug!("Closing the doors");
        self.is_open = false;
        debug!("Doors are closed");

        self.emit(ElevatorEvent::DoorsClosed);
    }

    pub(crate) fn start_moving(&mut self) -> Result<(), ElevatorError> {
        if self.is_open {
            return Err(ElevatorError::MovedWithOpenDoors);
        }
        if !self.is_moving {
            debug!("Starting Elevator");
        }
        self.is_moving = true;
        debug!("Elevator is moving");

        self.emit(ElevatorEvent::Moving);
        Ok(())
    }

    pub(crate) fn stop_moving(&mut self) {
        debug!("Stopping Elevator");
        self.is_moving = false;
        debug!("Elevator is stopped");

        self.emit(ElevatorEvent::Stopped);
    }

    /***************************************/
    /*           Private helpers           */
    /***************************************/
    fn move_up(&mut self) {
        debug!("Elevator moving up");
        self.current_floor = self.current_floor.saturating_add(1).min(self.floors_count);
    }

    fn move_down(&mut self) {
        debug!("Elevator moving down");
        self.current_floor = self.current_floor.saturating_sub(1).max(1);
    }

    pub(crate) fn update_direction(&mut self) {
        let previous = self.direction;
        self.direction =
            scheduler::next_direction(self.current_floor, self.queue.first().copied(), previous);

        if self.direction == Direction::Idle {
            debug!("Elevator is IDLE");
        } else if self.direction != previous {
            debug!("Direction is changed. Moving {}", self.direction);
        }
    }

    pub(crate) fn sort_queue(&mut self) {
        scheduler::sort_queue(
            &mut self.queue,
            self.current_floor,
            self.direction,
            self.floors_count,
        );
    }

    /// Queue `event` and, unless a callback is already running, deliver
    /// everything pending to the observer.
    fn emit(&mut self, event: ElevatorEvent) {
        self.pending_events.push_back(event);
        if self.dispatching {
            return;
        }

        self.dispatching = true;
        while let Some(event) = self.pending_events.pop_front() {
            let Some(mut observer) = self.observer.take() else {
                continue;
            };
            event.deliver(observer.as_mut(), self);
            // Keep an observer installed by the callback itself
            if self.observer.is_none() {
                self.observer = Some(observer);
            }
        }
        self.dispatching = false;
    }
}

impl fmt::Debug for Elevator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Elevator")
            .field("floors_count", &self.floors_count)
            .field("current_floor", &self.current_floor)
            .field("queue", &self.queue)
            .field("direction", &self.direction)
            .field("max_capacity", &self.max_capacity)
            .field("passengers", &self.passengers.len())
            .field("is_open", &self.is_open)
            .field("is_moving", &self.is_moving)
            .finish()
    }
}
