//! Bead ids: one monotonically increasing counter shared by epics and roles.

use crate::error::StoreError;
use crate::state::{State, StateStore};
use tracing::warn;

const BEAD_ID_PREFIX: &str = "audit-plan";

/// Hand out the next id. Returns the advanced counter and the id it names.
pub fn allocate(counter: u64) -> (u64, String) {
    let next = counter + 1;
    (next, format_bead_id(next))
}

pub fn format_bead_id(number: u64) -> String {
    format!("{}-{:03}", BEAD_ID_PREFIX, number)
}

/// Recover the counter value a bead id was allocated from
pub fn bead_number(bead_id: &str) -> Option<u64> {
    bead_id
        .trim()
        .strip_prefix(BEAD_ID_PREFIX)?
        .strip_prefix('-')?
        .parse()
        .ok()
}

/// Persist an advanced counter. On failure the in-memory counter is put back
/// to what it was so a failed save never leaves a gap.
pub fn commit_counter(
    state: &mut State,
    store: &dyn StateStore,
    next: u64,
) -> Result<(), StoreError> {
    let previous = state.bead_counter;
    state.bead_counter = next;

    if let Err(e) = store.save(state) {
        warn!(
            "Failed to persist bead counter {} (keeping {}): {}",
            next, previous, e
        );
        state.bead_counter = previous;
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct RecordingStore {
        fail: bool,
        saved: RefCell<Vec<u64>>,
    }

    impl StateStore for RecordingStore {
        fn load(&self) -> Result<State, StoreError> {
            Ok(State::default())
        }

        fn save(&self, state: &State) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Write {
                    path: PathBuf::from("state.json"),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.saved.borrow_mut().push(state.bead_counter);
            Ok(())
        }
    }

    #[test]
    fn test_allocate_sequential() {
        let (counter, first) = allocate(0);
        let (counter, second) = allocate(counter);

        assert_eq!(counter, 2);
        assert_eq!(first, "audit-plan-001");
        assert_eq!(second, "audit-plan-002");
    }

    #[test]
    fn test_bead_number_round_trip_past_padding() {
        assert_eq!(bead_number("audit-plan-007"), Some(7));
        assert_eq!(bead_number(&format_bead_id(1234)), Some(1234));
        assert_eq!(bead_number("perf-7"), None);
        assert_eq!(bead_number("audit-plan-"), None);
    }

    #[test]
    fn test_commit_counter_persists() {
        let store = RecordingStore {
            fail: false,
            saved: RefCell::new(Vec::new()),
        };
        let mut state = State {
            bead_counter: 3,
            ..State::default()
        };

        commit_counter(&mut state, &store, 7).unwrap();

        assert_eq!(state.bead_counter, 7);
        assert_eq!(*store.saved.borrow(), vec![7]);
    }

    #[test]
    fn test_commit_counter_rolls_back_on_save_failure() {
        let store = RecordingStore {
            fail: true,
            saved: RefCell::new(Vec::new()),
        };
        let mut state = State {
            bead_counter: 3,
            ..State::default()
        };

        assert!(commit_counter(&mut state, &store, 7).is_err());
        assert_eq!(state.bead_counter, 3);
    }
}
