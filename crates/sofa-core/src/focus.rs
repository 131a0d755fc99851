//! Directional focus navigation.
//!
//! Targets form a linear sequence in document order. Forward signals
//! (right, down) step to the next target, backward signals (left, up) to the
//! previous one. Stepping off either end reports a boundary instead of
//! wrapping, so the caller can hand focus to a neighbouring region.

use sofa_types::input::Direction;
use sofa_types::target::{FocusableTarget, TargetId};

/// Outcome of one navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation<'a> {
    /// Focus should move to this target.
    Move(&'a FocusableTarget),
    /// The step ran off the end of the sequence.
    BoundaryExceeded,
    /// Nothing is focusable; the signal is consumed.
    Idle,
}

/// Keep only visible, enabled targets, preserving order.
pub fn focusable(targets: impl IntoIterator<Item = FocusableTarget>) -> Vec<FocusableTarget> {
    targets.into_iter().filter(FocusableTarget::is_focusable).collect()
}

/// Compute the next focus target.
///
/// `targets` must already be filtered with [`focusable`]. A `current` that is
/// not in `targets` (or `None`) sits before the first target for forward
/// steps and after the last one for backward steps.
pub fn next<'a>(
    targets: &'a [FocusableTarget],
    current: Option<&TargetId>,
    direction: Direction,
) -> Navigation<'a> {
    if targets.is_empty() {
        return Navigation::Idle;
    }
    let position = current.and_then(|id| targets.iter().position(|t| &t.id == id));
    let index = match (position, direction.is_forward()) {
        (Some(i), true) => Some(i + 1),
        (Some(i), false) => i.checked_sub(1),
        (None, true) => Some(0),
        (None, false) => Some(targets.len() - 1),
    };
    match index.and_then(|i| targets.get(i)) {
        Some(target) => Navigation::Move(target),
        None => Navigation::BoundaryExceeded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sofa_types::target::ToolbarControl;

    fn elements(n: usize) -> Vec<FocusableTarget> {
        (0..n)
            .map(|i| FocusableTarget::new(TargetId::element(format!("e{i}"))))
            .collect()
    }

    fn moved(nav: Navigation<'_>) -> TargetId {
        match nav {
            Navigation::Move(t) => t.id.clone(),
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn empty_is_idle() {
        assert_eq!(next(&[], None, Direction::Right), Navigation::Idle);
        assert_eq!(
            next(&[], Some(&TargetId::Frame), Direction::Up),
            Navigation::Idle
        );
    }

    #[test]
    fn steps_forward_and_backward() {
        let targets = elements(3);
        let e1 = TargetId::element("e1");
        assert_eq!(moved(next(&targets, Some(&e1), Direction::Right)), TargetId::element("e2"));
        assert_eq!(moved(next(&targets, Some(&e1), Direction::Down)), TargetId::element("e2"));
        assert_eq!(moved(next(&targets, Some(&e1), Direction::Left)), TargetId::element("e0"));
        assert_eq!(moved(next(&targets, Some(&e1), Direction::Up)), TargetId::element("e0"));
    }

    #[test]
    fn ends_report_boundary() {
        let targets = elements(2);
        assert_eq!(
            next(&targets, Some(&TargetId::element("e1")), Direction::Right),
            Navigation::BoundaryExceeded
        );
        assert_eq!(
            next(&targets, Some(&TargetId::element("e0")), Direction::Up),
            Navigation::BoundaryExceeded
        );
    }

    #[test]
    fn stranger_starts_at_the_edges() {
        let targets = elements(3);
        let outsider = TargetId::Control(ToolbarControl::Save);
        assert_eq!(
            moved(next(&targets, Some(&outsider), Direction::Down)),
            TargetId::element("e0")
        );
        assert_eq!(moved(next(&targets, None, Direction::Left)), TargetId::element("e2"));
    }

    #[test]
    fn focusable_drops_hidden_and_disabled() {
        let mut hidden = FocusableTarget::new(TargetId::element("hidden"));
        hidden.visible = false;
        let mut disabled = FocusableTarget::new(TargetId::element("disabled"));
        disabled.enabled = false;
        let kept = FocusableTarget::new(TargetId::element("kept"));

        let targets = focusable(vec![hidden, kept.clone(), disabled]);
        assert_eq!(targets, vec![kept]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn walk(targets: &[FocusableTarget], direction: Direction) -> (Vec<usize>, usize) {
            let mut visited = Vec::new();
            let mut boundaries = 0;
            let mut current: Option<TargetId> = None;
            for _ in 0..targets.len() + 1 {
                match next(targets, current.as_ref(), direction) {
                    Navigation::Move(t) => {
                        visited.push(targets.iter().position(|x| x.id == t.id).unwrap());
                        current = Some(t.id.clone());
                    },
                    Navigation::BoundaryExceeded => boundaries += 1,
                    Navigation::Idle => unreachable!("targets are non-empty"),
                }
            }
            (visited, boundaries)
        }

        proptest! {
            #[test]
            fn forward_visits_in_order_then_stops(n in 1usize..24) {
                let targets = elements(n);
                let (visited, boundaries) = walk(&targets, Direction::Right);
                prop_assert_eq!(visited, (0..n).collect::<Vec<_>>());
                prop_assert_eq!(boundaries, 1);
            }

            #[test]
            fn backward_visits_in_reverse_then_stops(n in 1usize..24) {
                let targets = elements(n);
                let (visited, boundaries) = walk(&targets, Direction::Up);
                prop_assert_eq!(visited, (0..n).rev().collect::<Vec<_>>());
                prop_assert_eq!(boundaries, 1);
            }

            #[test]
            fn never_wraps(n in 1usize..24, forward in any::<bool>()) {
                let targets = elements(n);
                let (edge, direction) = if forward {
                    (n - 1, Direction::Right)
                } else {
                    (0, Direction::Left)
                };
                let current = targets[edge].id.clone();
                prop_assert_eq!(
                    next(&targets, Some(&current), direction),
                    Navigation::BoundaryExceeded
                );
            }
        }
    }
}
