/// A snapshot-backed optimistic mutation.
///
/// Capture the pre-mutation state, apply the local patch immediately so the
/// UI reflects it, then settle once the server answers: `commit` discards
/// the snapshot, `rollback` restores the captured state wholesale. The
/// rollback is a full-collection restore, not a partial patch.
#[derive(Debug)]
pub struct OptimisticUpdate<T: Clone> {
    snapshot: T,
}

impl<T: Clone> OptimisticUpdate<T> {
    /// Capture the state as it is right before the optimistic patch.
    pub fn capture(state: &T) -> Self {
        OptimisticUpdate {
            snapshot: state.clone(),
        }
    }

    /// Server confirmed the mutation — the optimistic state stands.
    pub fn commit(self) {}

    /// Server rejected the mutation — restore the captured state.
    pub fn rollback(self, state: &mut T) {
        *state = self.snapshot;
    }

    /// Settle from a server result: commit on `Ok`, roll back on `Err`.
    /// Returns true when the optimistic state was kept.
    pub fn settle<V, E>(self, result: &Result<V, E>, state: &mut T) -> bool {
        match result {
            Ok(_) => {
                self.commit();
                true
            }
            Err(_) => {
                self.rollback(state);
                false
            }
        }
    }
}
