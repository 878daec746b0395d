/*
 * Unit tests for the elevator state machine
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_elevator_init
 * - test_elevator_moving_up / test_elevator_moving_down
 * - test_update_direction
 * - test_open_doors_* / test_start_moving_*
 * - test_sort_queue
 * - test_call_floor_*
 * - test_step_*
 * - test_append_passenger_* / test_remove_passenger_*
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod fsm_tests {
    use crate::elevator::Elevator;
    use crate::error::ElevatorError;
    use crate::passenger::{Passenger, PassengerId};
    use crate::shared::Behaviour;
    use crate::shared::Direction::{Down, Idle, Up};

    fn setup_elevator() -> Elevator {
        Elevator::new(20, 6).unwrap()
    }

    fn passenger(id: u64, current_floor: u8, destination_floor: u8) -> Passenger {
        Passenger::new(PassengerId(id), current_floor, destination_floor)
    }

    /// Elevator standing on `floor` with its doors open and an empty queue.
    fn open_at(floor: u8) -> Elevator {
        let mut elevator = setup_elevator();
        elevator.current_floor = floor;
        elevator.call_floor(floor).unwrap();
        assert!(elevator.is_open());
        elevator
    }

    #[test]
    fn test_elevator_init() {
        // Purpose: Verify that the elevator is in the expected initial state after creation

        // Act
        let elevator = setup_elevator();

        // Assert
        assert_eq!(elevator.current_floor(), 1);
        assert_eq!(elevator.floors_count(), 20);
        assert_eq!(elevator.max_capacity(), 6);
        assert_eq!(elevator.direction(), Idle);
        assert_eq!(elevator.behaviour(), Behaviour::Idle);
        assert!(!elevator.is_full());
        assert!(!elevator.is_open());
        assert!(!elevator.is_moving());
        assert!(elevator.queue().is_empty());
        assert!(elevator.passengers().is_empty());
    }

    #[test]
    fn test_elevator_without_floors_rejected() {
        assert_eq!(
            Elevator::new(0, 6).unwrap_err(),
            ElevatorError::InvalidFloorsCount
        );
    }

    #[test]
    fn test_elevator_moving_up() {
        // Arrange
        let mut elevator = setup_elevator();
        elevator.current_floor = 5;
        elevator.queue = vec![7, 9, 11];

        // Act
        elevator.step().unwrap();

        // Assert
        assert_eq!(elevator.current_floor(), 6);
        assert_eq!(elevator.direction(), Up);
        assert!(elevator.is_moving());
    }

    #[test]
    fn test_elevator_moving_down() {
        // Arrange
        let mut elevator = setup_elevator();
        elevator.current_floor = 10;
        elevator.queue = vec![7, 5, 3];

        // Act
        elevator.step().unwrap();

        // Assert
        assert_eq!(elevator.current_floor(), 9);
        assert_eq!(elevator.direction(), Down);
    }

    #[test]
    fn test_update_direction() {
        // Arrange
        let mut elevator = setup_elevator();
        elevator.current_floor = 10;
        elevator.queue = vec![15, 12, 17];

        // Act
        elevator.update_direction();

        // Assert
        assert_eq!(elevator.direction(), Up);

        // Arrange
        elevator.current_floor = 18;
        elevator.queue = vec![15, 12, 9];

        // Act
        elevator.update_direction();

        // Assert
        assert_eq!(elevator.direction(), Down);

        // Arrange
        elevator.current_floor = 13;
        elevator.queue = vec![];

        // Act
        elevator.update_direction();

        // Assert
        assert_eq!(elevator.direction(), Idle);
    }

    #[test]
    fn test_open_doors_while_moving() {
        // Arrange
        let mut elevator = setup_elevator();
        elevator.current_floor = 7;
        elevator.queue = vec![7, 5, 3];
        elevator.is_moving = true;

        // Act
        let result = elevator.open_doors();

        // Assert
        assert_eq!(result, Err(ElevatorError::OpenedWhileMoving));
        assert!(result.unwrap_err().is_broken());
        assert!(!elevator.is_open());
        assert_eq!(elevator.queue(), &[7, 5, 3]);
    }

    #[test]
    fn test_open_doors_removes_floor_from_queue() {
        // Arrange
        let mut elevator = setup_elevator();
        elevator.current_floor = 7;
        elevator.queue = vec![7, 5, 3];

        // Act
        elevator.open_doors().unwrap();

        // Assert
        assert!(elevator.is_open());
        assert_eq!(elevator.queue(), &[5, 3]);
        assert_eq!(elevator.behaviour(), Behaviour::DoorOpen);
    }

    #[test]
    fn test_open_doors_on_unrequested_floor() {
        let mut elevator = setup_elevator();
        elevator.current_floor = 4;
        elevator.queue = vec![5, 3];

        let result = elevator.open_doors();

        assert_eq!(result, Err(ElevatorError::FloorNotQueued(4)));
        assert!(!elevator.is_open());
    }

    #[test]
    fn test_start_and_stop_moving() {
        // Arrange
        let mut elevator = setup_elevator();
        elevator.is_open = true;

        // Act
        let result = elevator.start_moving();

        // Assert
        assert_eq!(result, Err(ElevatorError::MovedWithOpenDoors));
        assert!(!elevator.is_moving());

        // Arrange
        elevator.is_open = false;

        // Act
        elevator.start_moving().unwrap();

        // Assert
        assert!(elevator.is_moving());
        assert_eq!(elevator.behaviour(), Behaviour::Moving);

        // Act
        elevator.stop_moving();

        // Assert
        assert!(!elevator.is_moving());
    }

    #[test]
    fn test_sort_queue() {
        // Arrange
        let mut elevator = setup_elevator();
        elevator.current_floor = 10;
        elevator.direction = Up;
        elevator.queue = vec![15, 12, 17, 3, 8];

        // Act
        elevator.sort_queue();

        // Assert
        assert_eq!(elevator.queue(), &[12, 15, 17, 8, 3]);
    }

    #[test]
    fn test_call_floor_out_of_range() {
        // Arrange
        let mut elevator = setup_elevator();

        // Act
        let below = elevator.call_floor(0);
        let above = elevator.call_floor(25);

        // Assert
        assert_eq!(
            below,
            Err(ElevatorError::FloorOutOfRange {
                floor: 0,
                floors_count: 20
            })
        );
        assert_eq!(
            above,
            Err(ElevatorError::FloorOutOfRange {
                floor: 25,
                floors_count: 20
            })
        );
        assert!(elevator.queue().is_empty());
        assert_eq!(elevator.direction(), Idle);
    }

    #[test]
    fn test_call_floor_orders_stops() {
        // Arrange
        let mut elevator = setup_elevator();

        // Act
        elevator.call_floor(7).unwrap();
        elevator.call_floor(5).unwrap();
        elevator.call_floor(10).unwrap();

        // Assert
        assert_eq!(elevator.queue(), &[5, 7, 10]);
        assert_eq!(elevator.direction(), Up);
    }

    #[test]
    fn test_call_floor_deduplicates() {
        // Arrange
        let mut elevator = setup_elevator();

        // Act
        elevator.call_floor(9).unwrap();
        elevator.call_floor(9).unwrap();

        // Assert
        assert_eq!(elevator.queue(), &[9]);
    }

    #[test]
    fn test_call_floor_idle_at_requested_floor_opens_doors() {
        // Arrange
        let mut elevator = setup_elevator();

        // Act
        elevator.call_floor(1).unwrap();

        // Assert
        assert!(elevator.is_open());
        assert!(elevator.queue().is_empty());
        assert_eq!(elevator.direction(), Idle);
    }

    #[test]
    fn test_call_floor_while_travelling_waits_for_sweep() {
        // Purpose: A request for the floor the car just left is served on the way back

        // Arrange
        let mut elevator = setup_elevator();
        elevator.call_floor(5).unwrap();
        elevator.step().unwrap();
        assert_eq!(elevator.current_floor(), 2);

        // Act
        elevator.call_floor(1).unwrap();
        elevator.call_floor(4).unwrap();

        // Assert
        assert_eq!(elevator.queue(), &[4, 5, 1]);
        assert!(!elevator.is_open());
    }

    #[test]
    fn test_step_end_to_end() {
        // Purpose: The car serves 5, 7 and 10 in order, one floor per step

        // Arrange
        let mut elevator = setup_elevator();
        elevator.queue = vec![5, 7, 10];

        // Act
        elevator.step().unwrap();

        // Assert
        assert_eq!(elevator.current_floor(), 2);
        assert!(elevator.is_moving());
        assert!(!elevator.is_open());
        assert_eq!(elevator.direction(), Up);

        // Act
        for _ in 0..3 {
            elevator.step().unwrap();
        }

        // Assert
        assert_eq!(elevator.current_floor(), 5);
        assert!(elevator.is_open());
        assert!(!elevator.is_moving());
        assert_eq!(elevator.queue(), &[7, 10]);

        // Act
        elevator.step().unwrap();

        // Assert
        assert_eq!(elevator.current_floor(), 6);
        assert!(!elevator.is_open());

        // Act
        elevator.step().unwrap();

        // Assert
        assert_eq!(elevator.current_floor(), 7);
        assert!(elevator.is_open());
        assert_eq!(elevator.queue(), &[10]);

        // Act
        for _ in 0..3 {
            elevator.step().unwrap();
        }

        // Assert
        assert_eq!(elevator.current_floor(), 10);
        assert!(elevator.is_open());
        assert!(elevator.queue().is_empty());

        // Act
        elevator.step().unwrap();

        // Assert
        assert_eq!(elevator.current_floor(), 10);
        assert_eq!(elevator.direction(), Idle);
        assert!(!elevator.is_open());
        assert!(!elevator.is_moving());
    }

    #[test]
    fn test_step_reverses_after_sweep() {
        // Arrange
        let mut elevator = setup_elevator();
        elevator.current_floor = 10;
        elevator.direction = Up;
        elevator.queue = vec![12, 8];

        // Act
        elevator.step().unwrap();
        elevator.step().unwrap();

        // Assert
        assert_eq!(elevator.current_floor(), 12);
        assert!(elevator.is_open());

        // Act
        elevator.step().unwrap();

        // Assert
        assert_eq!(elevator.current_floor(), 11);
        assert_eq!(elevator.direction(), Down);

        // Act
        for _ in 0..3 {
            elevator.step().unwrap();
        }

        // Assert
        assert_eq!(elevator.current_floor(), 8);
        assert!(elevator.is_open());
        assert!(elevator.queue().is_empty());
        assert_eq!(elevator.direction(), Idle);
    }

    #[test]
    fn test_last_stop_makes_elevator_idle() {
        // Purpose: A car that empties its queue goes idle, so a new call on its floor opens at once

        // Arrange
        let mut elevator = setup_elevator();
        elevator.call_floor(2).unwrap();
        elevator.step().unwrap();
        assert!(elevator.is_open());
        assert_eq!(elevator.direction(), Idle);
        elevator.step().unwrap();
        assert!(!elevator.is_open());

        // Act
        elevator.call_floor(2).unwrap();

        // Assert
        assert!(elevator.is_open());
        assert!(elevator.queue().is_empty());
    }

    #[test]
    fn test_step_serves_request_at_current_floor_without_moving() {
        // Purpose: A stop at the floor the car stands on is served in place

        // Arrange
        let mut elevator = setup_elevator();
        elevator.current_floor = 6;
        elevator.direction = Up;
        elevator.queue = vec![6];

        // Act
        elevator.step().unwrap();

        // Assert
        assert_eq!(elevator.current_floor(), 6);
        assert!(elevator.is_open());
        assert!(elevator.queue().is_empty());
    }

    #[test]
    fn test_step_idle_does_nothing() {
        let mut elevator = setup_elevator();

        elevator.step().unwrap();

        assert_eq!(elevator.current_floor(), 1);
        assert_eq!(elevator.direction(), Idle);
        assert!(!elevator.is_moving());
        assert!(!elevator.is_open());
    }

    #[test]
    fn test_append_passenger() {
        // Arrange
        let mut elevator = open_at(3);
        let rider = passenger(0, 3, 8);

        // Act
        elevator.append_passenger(&rider).unwrap();

        // Assert
        assert_eq!(elevator.passengers(), vec![rider]);
    }

    #[test]
    fn test_append_passenger_doors_closed() {
        let mut elevator = setup_elevator();

        let result = elevator.append_passenger(&passenger(0, 1, 8));

        assert_eq!(result, Err(ElevatorError::DoorsClosed));
        assert!(elevator.passengers().is_empty());
    }

    #[test]
    fn test_append_passenger_floor_mismatch() {
        let mut elevator = open_at(1);

        let result = elevator.append_passenger(&passenger(0, 2, 8));

        assert_eq!(
            result,
            Err(ElevatorError::FloorMismatch {
                elevator_floor: 1,
                passenger_floor: 2
            })
        );
    }

    #[test]
    fn test_append_passenger_full() {
        // Arrange
        let mut elevator = open_at(1);
        for id in 0..6 {
            elevator.append_passenger(&passenger(id, 1, 9)).unwrap();
        }
        assert!(elevator.is_full());

        // Act
        let result = elevator.append_passenger(&passenger(6, 1, 9));

        // Assert
        assert_eq!(result, Err(ElevatorError::ElevatorFull { capacity: 6 }));
        assert_eq!(elevator.passengers().len(), 6);
    }

    #[test]
    fn test_append_same_passenger_twice_keeps_one() {
        let mut elevator = open_at(1);
        let rider = passenger(0, 1, 9);

        elevator.append_passenger(&rider).unwrap();
        elevator.append_passenger(&rider).unwrap();

        assert_eq!(elevator.passengers().len(), 1);
    }

    #[test]
    fn test_zero_capacity_elevator_is_always_full() {
        let mut elevator = Elevator::new(5, 0).unwrap();
        elevator.call_floor(1).unwrap();

        assert!(elevator.is_full());
        assert_eq!(
            elevator.append_passenger(&passenger(0, 1, 3)),
            Err(ElevatorError::ElevatorFull { capacity: 0 })
        );
    }

    #[test]
    fn test_remove_passenger() {
        // Arrange
        let mut elevator = open_at(1);
        let rider = passenger(0, 1, 9);
        elevator.append_passenger(&rider).unwrap();

        // Act
        elevator.remove_passenger(&rider).unwrap();

        // Assert
        assert!(elevator.passengers().is_empty());
    }

    #[test]
    fn test_remove_passenger_not_found() {
        let mut elevator = setup_elevator();

        let result = elevator.remove_passenger(&passenger(4, 1, 9));

        assert_eq!(result, Err(ElevatorError::PassengerNotFound(PassengerId(4))));
    }

    #[test]
    fn test_state_snapshot() {
        // Arrange
        let mut elevator = setup_elevator();
        elevator.call_floor(4).unwrap();
        elevator.step().unwrap();

        // Act
        let state = elevator.state();
        let json = serde_json::to_value(&state).unwrap();

        // Assert
        assert_eq!(state.floor, 2);
        assert_eq!(state.behaviour, Behaviour::Moving);
        assert_eq!(state.queue, vec![4]);
        assert_eq!(json["behaviour"], "moving");
        assert_eq!(json["direction"], "up");
    }
}
