/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::Elevator;
use crate::passenger::Passenger;

/**
 * Listener for elevator state transitions.
 *
 * Every method has a no-op default, so an observer only implements the events
 * it cares about. Callbacks run synchronously inside the elevator operation
 * that triggered them and get mutable access to the elevator, e.g. to let
 * passengers board from `on_open_doors`.
 *
 * Events raised while a callback is running (a boarding inside
 * `on_open_doors`, say) are not delivered re-entrantly. They are queued and
 * handed to the observer, in order, once the running callback returns.
 */
pub trait ElevatorObserver {
    fn on_open_doors(&mut self, _elevator: &mut Elevator) {}

    fn on_close_doors(&mut self, _elevator: &mut Elevator) {}

    /// Sent on every step the car travels, not only when it starts.
    fn on_moving(&mut self, _elevator: &mut Elevator) {}

    fn on_stop(&mut self, _elevator: &mut Elevator) {}

    fn on_passenger_enter(&mut self, _elevator: &mut Elevator, _passenger: &Passenger) {}

    fn on_passenger_exit(&mut self, _elevator: &mut Elevator, _passenger: &Passenger) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ElevatorObserver for NoopObserver {}

/// Transition raised by the elevator, waiting to be delivered to the observer.
#[derive(Debug, Clone, PartialEq)]
pub enum ElevatorEvent {
    DoorsOpened,
    DoorsClosed,
    Moving,
    Stopped,
    PassengerEntered(Passenger),
    PassengerExited(Passenger),
}

impl ElevatorEvent {
    pub(crate) fn deliver(&self, observer: &mut dyn ElevatorObserver, elevator: &mut Elevator) {
        match self {
            ElevatorEvent::DoorsOpened => observer.on_open_doors(elevator),
            ElevatorEvent::DoorsClosed => observer.on_close_doors(elevator),
            ElevatorEvent::Moving => observer.on_moving(elevator),
            ElevatorEvent::Stopped => observer.on_stop(elevator),
            ElevatorEvent::PassengerEntered(passenger) => {
                observer.on_passenger_enter(elevator, passenger)
            }
            ElevatorEvent::PassengerExited(passenger) => {
                observer.on_passenger_exit(elevator, passenger)
            }
        }
    }
}
