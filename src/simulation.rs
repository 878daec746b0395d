/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::SimulationConfig;
use crate::elevator::{Elevator, ElevatorObserver};
use crate::error::ElevatorError;
use crate::passenger::{Passenger, PassengerFactory};
use crate::shared::ElevatorState;

/**
 * Riders outside the car and running counters for the report.
 *
 * Shared between the simulation loop, which adds new riders, and the
 * `LobbyObserver`, which moves them in and out of the car.
 *
 * # Fields
 * - `waiting`:     Riders waiting for the car on their floor.
 * - `skipped`:     Riders who failed to board this minute. They call the car again after the step.
 * - `stats`:       Counters collected while the simulation runs.
 */
#[derive(Debug, Default)]
pub struct Lobby {
    pub waiting: Vec<Passenger>,
    pub skipped: Vec<Passenger>,
    pub stats: SimulationStats,
}

#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct SimulationStats {
    pub requests: u64,
    pub boardings: u64,
    pub deliveries: u64,
    pub failed_boardings: u64,
    pub peak_load: usize,
}

/// Outcome of a finished simulation run.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub steps: u64,
    pub stats: SimulationStats,
    pub still_waiting: usize,
    pub still_aboard: usize,
    pub elevator: ElevatorState,
}

/// Moves riders in and out of the car each time the doors open.
pub struct LobbyObserver {
    lobby: Rc<RefCell<Lobby>>,
}

impl LobbyObserver {
    pub fn new(lobby: Rc<RefCell<Lobby>>) -> LobbyObserver {
        LobbyObserver { lobby }
    }
}

impl ElevatorObserver for LobbyObserver {
    fn on_open_doors(&mut self, elevator: &mut Elevator) {
        let floor = elevator.current_floor();
        let mut lobby = self.lobby.borrow_mut();

        let arrived: Vec<Passenger> = elevator
            .passengers()
            .into_iter()
            .filter(|p| p.destination_floor() == floor)
            .collect();
        for passenger in arrived {
            match passenger.exit_elevator(elevator) {
                Ok(()) => lobby.stats.deliveries += 1,
                Err(e) => warn!("Failed to let {} leave the elevator: {}", passenger, e),
            }
        }

        let (boarding, staying): (Vec<Passenger>, Vec<Passenger>) = lobby
            .waiting
            .drain(..)
            .partition(|p| p.current_floor() == floor);
        lobby.waiting = staying;

        for passenger in boarding {
            match passenger.enter_elevator(elevator) {
                Ok(()) => lobby.stats.boardings += 1,
                Err(e) => {
                    warn!("Failed to let {} enter the elevator: {}", passenger, e);
                    lobby.stats.failed_boardings += 1;
                    lobby.skipped.push(passenger);
                }
            }
        }

        let load = elevator.passengers().len();
        lobby.stats.peak_load = lobby.stats.peak_load.max(load);
    }

    fn on_passenger_enter(&mut self, elevator: &mut Elevator, passenger: &Passenger) {
        for other in elevator.passengers() {
            if other.id() != passenger.id() {
                info!("{} meets {} in elevator", other, passenger);
            }
        }
    }

    fn on_passenger_exit(&mut self, elevator: &mut Elevator, passenger: &Passenger) {
        debug!(
            "{} left on floor {}, {} still aboard",
            passenger,
            elevator.current_floor(),
            elevator.passengers().len()
        );
    }
}

/**
 * Random passenger flow driving a single elevator.
 *
 * Every simulated minute a new passenger appears with probability
 * `request_probability` on a random floor, heading to a different random
 * floor, and calls the car. The car then advances one step. Riders who could
 * not board (car full, doors already closed) call the car again.
 */
pub struct Simulation {
    elevator: Elevator,
    lobby: Rc<RefCell<Lobby>>,
    factory: PassengerFactory,
    rng: StdRng,
    config: SimulationConfig,
    steps: u64,
}

impl Simulation {
    pub fn new(mut elevator: Elevator, config: SimulationConfig) -> Simulation {
        let lobby = Rc::new(RefCell::new(Lobby::default()));
        elevator.set_observer(Box::new(LobbyObserver::new(lobby.clone())));

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Simulation {
            elevator,
            lobby,
            factory: PassengerFactory::new(),
            rng,
            config,
            steps: 0,
        }
    }

    pub fn elevator(&self) -> &Elevator {
        &self.elevator
    }

    pub fn lobby(&self) -> Rc<RefCell<Lobby>> {
        self.lobby.clone()
    }

    /// Run for `config.duration` minutes and report the outcome.
    ///
    /// Stops at the first error; usage errors cannot occur here, so any
    /// error means the elevator is broken.
    pub fn run(mut self) -> Result<SimulationReport, ElevatorError> {
        let ticker = match self.config.tick_ms {
            0 => None,
            ms => Some(cbc::tick(Duration::from_millis(ms))),
        };
        let started = Instant::now();

        for minute in 0..self.config.duration {
            self.tick(minute)?;

            if let Some(ticker) = &ticker {
                let _ = ticker.recv();
            }
        }

        info!(
            "Simulation finished after {} steps in {:?}",
            self.steps,
            started.elapsed()
        );
        Ok(self.report())
    }

    /// One simulated minute: maybe spawn a rider, step the car, retry skipped riders.
    pub fn tick(&mut self, minute: u64) -> Result<(), ElevatorError> {
        if self.rng.random_bool(self.config.request_probability) {
            if let Some(passenger) = self.spawn_passenger() {
                info!(
                    "Passenger requested elevator: Current Floor {}, Destination Floor {}",
                    passenger.current_floor(),
                    passenger.destination_floor()
                );
                self.lobby.borrow_mut().stats.requests += 1;
                self.wait_for_elevator(passenger)?;
            }
        }

        self.elevator.step()?;
        self.steps += 1;
        debug!("Minute {}: {:?}", minute, self.elevator.state());

        let skipped = std::mem::take(&mut self.lobby.borrow_mut().skipped);
        for passenger in skipped {
            self.wait_for_elevator(passenger)?;
        }

        Ok(())
    }

    pub fn report(&self) -> SimulationReport {
        let lobby = self.lobby.borrow();
        SimulationReport {
            steps: self.steps,
            stats: lobby.stats.clone(),
            still_waiting: lobby.waiting.len() + lobby.skipped.len(),
            still_aboard: self.elevator.passengers().len(),
            elevator: self.elevator.state(),
        }
    }

    /// Rider on a random floor with a different random destination.
    /// `None` in a single-floor building.
    fn spawn_passenger(&mut self) -> Option<Passenger> {
        let floors = self.elevator.floors_count();
        if floors < 2 {
            return None;
        }

        let current_floor = self.rng.random_range(1..=floors);
        let mut destination_floor = self.rng.random_range(1..=floors);
        while destination_floor == current_floor {
            destination_floor = self.rng.random_range(1..=floors);
        }
        Some(self.factory.create(current_floor, destination_floor))
    }

    /// Put the rider in the waiting list before calling, so an immediate door
    /// opening on their floor lets them in.
    fn wait_for_elevator(&mut self, passenger: Passenger) -> Result<(), ElevatorError> {
        self.lobby.borrow_mut().waiting.push(passenger);
        passenger.call_elevator(&mut self.elevator)
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
