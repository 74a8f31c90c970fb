/// Lifecycle of one popup's request.
///
/// `Succeeded` and `Failed` are settled: they keep the last outcome visible
/// and accept a new submission. Only `Pending` blocks submission.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestStatus<T> {
    /// Nothing submitted yet.
    Idle,
    /// A request is in flight.
    Pending,
    /// The last request returned a validated result.
    Succeeded(T),
    /// The last request failed; holds the message shown to the user.
    Failed(String),
}

impl<T> Default for RequestStatus<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> RequestStatus<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn can_submit(&self) -> bool {
        !self.is_pending()
    }

    pub fn succeeded(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_blocks_submission() {
        assert!(RequestStatus::<u8>::Idle.can_submit());
        assert!(!RequestStatus::<u8>::Pending.can_submit());
        assert!(RequestStatus::Succeeded(1u8).can_submit());
        assert!(RequestStatus::<u8>::Failed("x".into()).can_submit());
    }

    #[test]
    fn accessors_expose_settled_outcomes() {
        assert_eq!(RequestStatus::Succeeded(3u8).succeeded(), Some(&3));
        assert_eq!(RequestStatus::<u8>::Failed("nope".into()).failure(), Some("nope"));
        assert_eq!(RequestStatus::<u8>::Pending.failure(), None);
        assert_eq!(RequestStatus::<u8>::default(), RequestStatus::Idle);
    }
}
