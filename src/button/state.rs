use super::chain::Step;

/// Lifecycle reported to the observer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DownloadState {
    #[default]
    None,
    Pending,
    Downloading,
    Done,
}

/// Fine-grained choreography behind [`DownloadState`].
///
/// Forward phases run in the order of [`FORWARD_CHAIN`], reverse phases in
/// the order of [`REVERSE_CHAIN`] and only while unwinding a cancel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    #[default]
    None,
    BorderToCircle,
    BorderToCircleReverse,
    CircleRotation,
    CircleRotationReverse,
    Downloading,
    DownloadingReverse,
    RotateToEnd,
    Done,
}

pub(crate) const FORWARD_CHAIN: [AnimationPhase; 5] = [
    AnimationPhase::BorderToCircle,
    AnimationPhase::CircleRotation,
    AnimationPhase::RotateToEnd,
    AnimationPhase::Downloading,
    AnimationPhase::Done,
];

pub(crate) const REVERSE_CHAIN: [AnimationPhase; 3] = [
    AnimationPhase::DownloadingReverse,
    AnimationPhase::CircleRotationReverse,
    AnimationPhase::BorderToCircleReverse,
];

fn next_in(chain: &[AnimationPhase], phase: AnimationPhase) -> Option<AnimationPhase> {
    let index = chain.iter().position(|candidate| *candidate == phase)?;
    chain.get(index + 1).copied()
}

impl AnimationPhase {
    /// Next forward phase, if any.
    pub fn forward_successor(self) -> Option<AnimationPhase> {
        next_in(&FORWARD_CHAIN, self)
    }

    /// Next unwinding phase; `None` once the unwind is complete.
    pub fn reverse_successor(self) -> Option<AnimationPhase> {
        next_in(&REVERSE_CHAIN, self)
    }

    /// Unwinding phase that undoes this forward phase.
    pub fn reverse(self) -> Option<AnimationPhase> {
        match self {
            AnimationPhase::BorderToCircle => Some(AnimationPhase::BorderToCircleReverse),
            AnimationPhase::CircleRotation | AnimationPhase::RotateToEnd => {
                Some(AnimationPhase::CircleRotationReverse)
            }
            AnimationPhase::Downloading => Some(AnimationPhase::DownloadingReverse),
            _ => None,
        }
    }

    pub fn is_reverse(self) -> bool {
        REVERSE_CHAIN.contains(&self)
    }

    /// Step armed when the phase is entered through its chain.
    ///
    /// `Downloading` arms nothing on entry; it waits for progress reports.
    pub(crate) fn entry_step(self) -> Option<Step> {
        match self {
            AnimationPhase::BorderToCircle => Some(Step::BorderToCircle),
            AnimationPhase::CircleRotation => Some(Step::Spin),
            AnimationPhase::RotateToEnd => Some(Step::RotateToEnd),
            AnimationPhase::Done => Some(Step::DownloadEnd),
            AnimationPhase::DownloadingReverse => Some(Step::DownloadingReverse),
            AnimationPhase::CircleRotationReverse => Some(Step::RotationReverse),
            AnimationPhase::BorderToCircleReverse => Some(Step::BorderReverse),
            AnimationPhase::None | AnimationPhase::Downloading => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_chain_has_one_successor_per_phase() {
        assert_eq!(
            AnimationPhase::BorderToCircle.forward_successor(),
            Some(AnimationPhase::CircleRotation)
        );
        assert_eq!(
            AnimationPhase::RotateToEnd.forward_successor(),
            Some(AnimationPhase::Downloading)
        );
        assert_eq!(AnimationPhase::Done.forward_successor(), None);
        assert_eq!(AnimationPhase::None.forward_successor(), None);
    }

    #[test]
    fn reverse_chain_unwinds_towards_the_border() {
        assert_eq!(
            AnimationPhase::DownloadingReverse.reverse_successor(),
            Some(AnimationPhase::CircleRotationReverse)
        );
        assert_eq!(
            AnimationPhase::CircleRotationReverse.reverse_successor(),
            Some(AnimationPhase::BorderToCircleReverse)
        );
        assert_eq!(AnimationPhase::BorderToCircleReverse.reverse_successor(), None);
    }

    #[test]
    fn only_cancellable_phases_have_a_reverse() {
        let cancellable: Vec<_> = [
            AnimationPhase::None,
            AnimationPhase::BorderToCircle,
            AnimationPhase::CircleRotation,
            AnimationPhase::RotateToEnd,
            AnimationPhase::Downloading,
            AnimationPhase::Done,
            AnimationPhase::BorderToCircleReverse,
        ]
        .into_iter()
        .filter(|phase| phase.reverse().is_some())
        .collect();
        assert_eq!(
            cancellable,
            vec![
                AnimationPhase::BorderToCircle,
                AnimationPhase::CircleRotation,
                AnimationPhase::RotateToEnd,
                AnimationPhase::Downloading,
            ]
        );
        assert!(AnimationPhase::DownloadingReverse.is_reverse());
        assert!(!AnimationPhase::Done.is_reverse());
    }
}
