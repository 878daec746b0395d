/*
 * Stop ordering for the elevator queue.
 *
 * The queue is kept sorted by a single key that encodes SCAN scheduling: floors
 * ahead in the direction of travel come first, nearest first, then every floor
 * behind the car, again nearest first, for the return sweep. Everything here is
 * a pure function of (current floor, direction, floors) so it can be tested
 * without an elevator.
 */

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::Direction;

/***************************************/
/*             Public API              */
/***************************************/

/// Priority of `floor` in the queue; lower is served sooner.
///
/// Floors strictly ahead of the car get their distance as key. All other
/// floors are pushed past every possible "ahead" key by adding
/// `floors_count`. With `Direction::Idle` every floor maps to `floors_count`.
pub fn sort_key(floor: u8, current_floor: u8, direction: Direction, floors_count: u8) -> i32 {
    let d = direction.to_i32();
    let ahead = d * (floor as i32 - current_floor as i32);
    if ahead > 0 {
        ahead
    } else {
        d * (current_floor as i32 - floor as i32) + floors_count as i32
    }
}

/// Stable sort of `queue` by [`sort_key`].
pub fn sort_queue(queue: &mut [u8], current_floor: u8, direction: Direction, floors_count: u8) {
    queue.sort_by_key(|&floor| sort_key(floor, current_floor, direction, floors_count));
}

/// Direction needed to reach the head of the queue.
///
/// An empty queue means `Idle`. When the head is the current floor there is
/// nothing to travel, so the previous direction is kept.
pub fn next_direction(current_floor: u8, head: Option<u8>, previous: Direction) -> Direction {
    match head {
        None => Direction::Idle,
        Some(floor) if floor > current_floor => Direction::Up,
        Some(floor) if floor < current_floor => Direction::Down,
        Some(_) => previous,
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
