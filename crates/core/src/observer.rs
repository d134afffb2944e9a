/// Receives events emitted while a simulation runs.
///
/// Observers see each event by reference, after the step that produced it has
/// been committed. They cannot alter the run; a simulation always executes its
/// full number of steps.
///
/// The trait is implemented for `()`, which discards every event, and for any
/// `FnMut(&E)` closure. Runs borrow their observer mutably, so a stateful
/// observer can be inspected once the run returns.
///
/// # Example
///
/// ```
/// use glucoloop_core::Observer;
///
/// let mut seen = Vec::new();
/// let mut observer = |event: &u32| seen.push(*event);
/// observer.observe(&1);
/// observer.observe(&2);
/// assert_eq!(seen, vec![1, 2]);
/// ```
pub trait Observer<E> {
    /// Handles a single event.
    fn observe(&mut self, event: &E);
}

impl<E> Observer<E> for () {
    fn observe(&mut self, _event: &E) {}
}

impl<E, F> Observer<E> for F
where
    F: FnMut(&E),
{
    fn observe(&mut self, event: &E) {
        self(event);
    }
}
