use crate::checkin::CheckinRules;
use crate::clock::Clock;
use crate::store::Store;

/// Shared collaborators of the validator, the reports and the job set,
/// constructed once in `main` and passed down explicitly.
pub struct Context<S, C> {
    pub store: S,
    pub clock: C,
    pub rules: CheckinRules,
}

impl<S: Store, C: Clock> Context<S, C> {
    pub fn new(store: S, clock: C, rules: CheckinRules) -> Self {
        Self {
            store,
            clock,
            rules,
        }
    }
}
