//! Transition policy: which event leads to which phase and side effects.
//!
//! [`transition`] is pure. The control interprets the returned actions in
//! order, which keeps the choreography testable without a driver.

use super::chain::Step;
use super::state::{AnimationPhase, DownloadState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Snapshot {
    pub state: DownloadState,
    pub phase: AnimationPhase,
    pub interrupted: bool,
    pub enabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Event {
    Start,
    DownloadStarted,
    Progress(f32),
    Cancel,
    Reset,
    SetDownloaded,
    Finished(Step),
    PointerDown,
    PointerUp,
    PointerCancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Notification {
    OpenRequested,
    CancelRequested,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Action {
    /// Switch phase and apply its starting layer values.
    EnterPhase(AnimationPhase),
    Arm(Step),
    SetState(DownloadState),
    SetInterrupted(bool),
    CommitProgress(f32),
    /// Fade the background to the highlight (`true`) or main color.
    Highlight(bool),
    /// Fade the normal title/detail labels in or out.
    ShowLabels(bool),
    /// Drop every stroke transition without touching the chain.
    StopStrokes,
    Notify(Notification),
}

pub(crate) fn clamp_progress(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

pub(crate) fn transition(snapshot: &Snapshot, event: Event) -> Vec<Action> {
    use Action::*;
    let Snapshot {
        state,
        phase,
        interrupted,
        enabled,
    } = *snapshot;
    match event {
        Event::Start => {
            if state != DownloadState::None || phase != AnimationPhase::None {
                return Vec::new();
            }
            let mut actions = vec![SetInterrupted(false), ShowLabels(false), Highlight(true)];
            actions.extend(enter(AnimationPhase::BorderToCircle));
            actions
        }
        Event::DownloadStarted => {
            if interrupted || phase != AnimationPhase::CircleRotation {
                return Vec::new();
            }
            enter(AnimationPhase::RotateToEnd)
        }
        Event::Progress(value) => {
            if interrupted
                || state != DownloadState::Downloading
                || phase != AnimationPhase::Downloading
            {
                return Vec::new();
            }
            let value = clamp_progress(value);
            vec![Arm(Step::Progress { value }), CommitProgress(value)]
        }
        Event::Cancel => {
            let Some(reverse) = phase.reverse() else {
                return Vec::new();
            };
            let mut actions = vec![SetInterrupted(true), CommitProgress(0.0)];
            actions.extend(enter(reverse));
            actions
        }
        Event::Reset => {
            if state != DownloadState::Done {
                return Vec::new();
            }
            let mut actions = vec![
                SetState(DownloadState::None),
                EnterPhase(AnimationPhase::None),
            ];
            if interrupted {
                actions.push(SetInterrupted(false));
            }
            actions
        }
        Event::SetDownloaded => {
            if state != DownloadState::None {
                return Vec::new();
            }
            let mut actions = vec![StopStrokes];
            // Stopping the strokes drops any unwind that would clear the flag.
            if interrupted {
                actions.push(SetInterrupted(false));
            }
            if phase != AnimationPhase::None {
                actions.extend([Highlight(false), ShowLabels(true)]);
            }
            actions.extend([
                SetState(DownloadState::Done),
                EnterPhase(AnimationPhase::Done),
            ]);
            actions
        }
        Event::Finished(step) => finished(snapshot, step),
        Event::PointerDown => {
            if !enabled || interrupted {
                return Vec::new();
            }
            match state {
                DownloadState::None | DownloadState::Done => vec![Highlight(true)],
                _ => Vec::new(),
            }
        }
        Event::PointerUp => {
            if !enabled || interrupted {
                return Vec::new();
            }
            match state {
                DownloadState::Done => {
                    vec![Highlight(false), Notify(Notification::OpenRequested)]
                }
                DownloadState::None if phase == AnimationPhase::None => {
                    transition(snapshot, Event::Start)
                }
                // A tap while the forward chain runs asks the host to cancel.
                _ if phase != AnimationPhase::Done => {
                    vec![Notify(Notification::CancelRequested)]
                }
                _ => Vec::new(),
            }
        }
        Event::PointerCancelled => {
            if !enabled || interrupted {
                return Vec::new();
            }
            match state {
                DownloadState::None | DownloadState::Done => vec![Highlight(false)],
                _ => Vec::new(),
            }
        }
    }
}

fn enter(phase: AnimationPhase) -> Vec<Action> {
    let mut actions = vec![Action::EnterPhase(phase)];
    if let Some(step) = phase.entry_step() {
        actions.push(Action::Arm(step));
    }
    actions
}

fn finished(snapshot: &Snapshot, step: Step) -> Vec<Action> {
    use Action::*;
    let Snapshot {
        state,
        phase,
        interrupted,
        ..
    } = *snapshot;
    match step {
        Step::BorderToCircle => {
            if interrupted || phase != AnimationPhase::BorderToCircle {
                return Vec::new();
            }
            let Some(next) = phase.forward_successor() else {
                return Vec::new();
            };
            vec![
                EnterPhase(next),
                SetState(DownloadState::Pending),
                Arm(Step::Spin),
            ]
        }
        Step::RotateToEnd => {
            if interrupted || phase != AnimationPhase::RotateToEnd {
                return Vec::new();
            }
            let Some(next) = phase.forward_successor() else {
                return Vec::new();
            };
            vec![SetState(DownloadState::Downloading), EnterPhase(next)]
        }
        Step::Progress { value } => {
            if interrupted {
                return Vec::new();
            }
            if value < 1.0 {
                return vec![CommitProgress(value)];
            }
            let mut actions = vec![CommitProgress(0.0)];
            if state == DownloadState::Downloading && phase == AnimationPhase::Downloading {
                actions.extend(enter(AnimationPhase::Done));
            }
            actions
        }
        Step::DownloadEnd => {
            if phase != AnimationPhase::Done {
                return Vec::new();
            }
            vec![
                ShowLabels(true),
                Highlight(false),
                SetState(DownloadState::Done),
            ]
        }
        Step::DownloadingReverse | Step::RotationReverse | Step::BorderReverse => {
            if !phase.is_reverse() {
                return Vec::new();
            }
            match phase.reverse_successor() {
                Some(next) => enter(next),
                None => vec![
                    EnterPhase(AnimationPhase::None),
                    SetState(DownloadState::None),
                    Highlight(false),
                    ShowLabels(true),
                    SetInterrupted(false),
                ],
            }
        }
        Step::Spin => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::Action::*;
    use super::*;

    fn snapshot(state: DownloadState, phase: AnimationPhase) -> Snapshot {
        Snapshot {
            state,
            phase,
            interrupted: false,
            enabled: true,
        }
    }

    fn idle() -> Snapshot {
        snapshot(DownloadState::None, AnimationPhase::None)
    }

    #[test]
    fn start_enters_border_to_circle() {
        assert_eq!(
            transition(&idle(), Event::Start),
            vec![
                SetInterrupted(false),
                ShowLabels(false),
                Highlight(true),
                EnterPhase(AnimationPhase::BorderToCircle),
                Arm(Step::BorderToCircle),
            ]
        );
    }

    #[test]
    fn start_is_ignored_outside_rest() {
        let busy = snapshot(DownloadState::None, AnimationPhase::BorderToCircle);
        assert!(transition(&busy, Event::Start).is_empty());
        let done = snapshot(DownloadState::Done, AnimationPhase::Done);
        assert!(transition(&done, Event::Start).is_empty());
    }

    #[test]
    fn border_completion_starts_spinning_and_goes_pending() {
        let current = snapshot(DownloadState::None, AnimationPhase::BorderToCircle);
        assert_eq!(
            transition(&current, Event::Finished(Step::BorderToCircle)),
            vec![
                EnterPhase(AnimationPhase::CircleRotation),
                SetState(DownloadState::Pending),
                Arm(Step::Spin),
            ]
        );
    }

    #[test]
    fn interrupted_completion_does_not_advance() {
        let current = Snapshot {
            interrupted: true,
            ..snapshot(DownloadState::None, AnimationPhase::BorderToCircle)
        };
        assert!(transition(&current, Event::Finished(Step::BorderToCircle)).is_empty());
    }

    #[test]
    fn download_started_needs_circle_rotation() {
        let pending = snapshot(DownloadState::Pending, AnimationPhase::CircleRotation);
        assert_eq!(
            transition(&pending, Event::DownloadStarted),
            vec![
                EnterPhase(AnimationPhase::RotateToEnd),
                Arm(Step::RotateToEnd)
            ]
        );
        let early = snapshot(DownloadState::None, AnimationPhase::BorderToCircle);
        assert!(transition(&early, Event::DownloadStarted).is_empty());
    }

    #[test]
    fn progress_is_clamped_and_committed() {
        let downloading = snapshot(DownloadState::Downloading, AnimationPhase::Downloading);
        assert_eq!(
            transition(&downloading, Event::Progress(1.7)),
            vec![Arm(Step::Progress { value: 1.0 }), CommitProgress(1.0)]
        );
        assert_eq!(
            transition(&downloading, Event::Progress(f32::NAN)),
            vec![Arm(Step::Progress { value: 0.0 }), CommitProgress(0.0)]
        );
    }

    #[test]
    fn progress_is_ignored_while_finishing() {
        let finishing = snapshot(DownloadState::Downloading, AnimationPhase::Done);
        assert!(transition(&finishing, Event::Progress(0.5)).is_empty());
    }

    #[test]
    fn full_progress_completion_enters_done_phase() {
        let downloading = snapshot(DownloadState::Downloading, AnimationPhase::Downloading);
        assert_eq!(
            transition(&downloading, Event::Finished(Step::Progress { value: 1.0 })),
            vec![
                CommitProgress(0.0),
                EnterPhase(AnimationPhase::Done),
                Arm(Step::DownloadEnd)
            ]
        );
    }

    #[test]
    fn cancel_dispatches_on_current_phase() {
        let cases = [
            (
                AnimationPhase::BorderToCircle,
                AnimationPhase::BorderToCircleReverse,
                Step::BorderReverse,
            ),
            (
                AnimationPhase::CircleRotation,
                AnimationPhase::CircleRotationReverse,
                Step::RotationReverse,
            ),
            (
                AnimationPhase::RotateToEnd,
                AnimationPhase::CircleRotationReverse,
                Step::RotationReverse,
            ),
            (
                AnimationPhase::Downloading,
                AnimationPhase::DownloadingReverse,
                Step::DownloadingReverse,
            ),
        ];
        for (phase, reverse, step) in cases {
            let current = snapshot(DownloadState::Pending, phase);
            assert_eq!(
                transition(&current, Event::Cancel),
                vec![
                    SetInterrupted(true),
                    CommitProgress(0.0),
                    EnterPhase(reverse),
                    Arm(step)
                ]
            );
        }
        assert!(transition(&idle(), Event::Cancel).is_empty());
        let done = snapshot(DownloadState::Downloading, AnimationPhase::Done);
        assert!(transition(&done, Event::Cancel).is_empty());
    }

    #[test]
    fn last_reverse_step_ends_the_interruption() {
        let current = Snapshot {
            interrupted: true,
            ..snapshot(DownloadState::Pending, AnimationPhase::BorderToCircleReverse)
        };
        assert_eq!(
            transition(&current, Event::Finished(Step::BorderReverse)),
            vec![
                EnterPhase(AnimationPhase::None),
                SetState(DownloadState::None),
                Highlight(false),
                ShowLabels(true),
                SetInterrupted(false),
            ]
        );
    }

    #[test]
    fn reset_and_set_downloaded_snap_without_animation() {
        let done = snapshot(DownloadState::Done, AnimationPhase::Done);
        assert_eq!(
            transition(&done, Event::Reset),
            vec![
                SetState(DownloadState::None),
                EnterPhase(AnimationPhase::None)
            ]
        );
        assert!(transition(&idle(), Event::Reset).is_empty());
        assert_eq!(
            transition(&idle(), Event::SetDownloaded),
            vec![
                StopStrokes,
                SetState(DownloadState::Done),
                EnterPhase(AnimationPhase::Done)
            ]
        );
        assert!(transition(&done, Event::SetDownloaded).is_empty());
    }

    #[test]
    fn set_downloaded_during_unwind_clears_interruption() {
        let unwinding = Snapshot {
            interrupted: true,
            ..snapshot(DownloadState::None, AnimationPhase::BorderToCircleReverse)
        };
        assert_eq!(
            transition(&unwinding, Event::SetDownloaded),
            vec![
                StopStrokes,
                SetInterrupted(false),
                Highlight(false),
                ShowLabels(true),
                SetState(DownloadState::Done),
                EnterPhase(AnimationPhase::Done)
            ]
        );
        let stuck = Snapshot {
            interrupted: true,
            ..snapshot(DownloadState::Done, AnimationPhase::Done)
        };
        assert_eq!(
            transition(&stuck, Event::Reset).last(),
            Some(&SetInterrupted(false))
        );
    }

    #[test]
    fn pointer_up_dispatches_by_state() {
        let done = snapshot(DownloadState::Done, AnimationPhase::Done);
        assert_eq!(
            transition(&done, Event::PointerUp),
            vec![Highlight(false), Notify(Notification::OpenRequested)]
        );
        assert_eq!(
            transition(&idle(), Event::PointerUp),
            transition(&idle(), Event::Start)
        );
        let animating = snapshot(DownloadState::None, AnimationPhase::BorderToCircle);
        assert_eq!(
            transition(&animating, Event::PointerUp),
            vec![Notify(Notification::CancelRequested)]
        );
        let finishing = snapshot(DownloadState::Downloading, AnimationPhase::Done);
        assert!(transition(&finishing, Event::PointerUp).is_empty());
    }

    #[test]
    fn pointer_input_is_ignored_when_disabled_or_interrupted() {
        let disabled = Snapshot {
            enabled: false,
            ..idle()
        };
        assert!(transition(&disabled, Event::PointerDown).is_empty());
        assert!(transition(&disabled, Event::PointerUp).is_empty());
        let interrupted = Snapshot {
            interrupted: true,
            ..snapshot(DownloadState::Pending, AnimationPhase::CircleRotationReverse)
        };
        assert!(transition(&interrupted, Event::PointerUp).is_empty());
    }

    #[test]
    fn pointer_down_highlights_only_at_rest_states() {
        assert_eq!(transition(&idle(), Event::PointerDown), vec![Highlight(true)]);
        let pending = snapshot(DownloadState::Pending, AnimationPhase::CircleRotation);
        assert!(transition(&pending, Event::PointerDown).is_empty());
    }
}
