// Hover/selection state machine. Pure: (state, event) → (next state, effects).
// The chart applies the effects; nothing here touches the view.

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// Who is hovered and who is selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Interaction {
    #[default]
    Idle,
    Hovering {
        hovered: RecordId,
    },
    Selected {
        selected: RecordId,
    },
    /// A selection exists and a different arc is momentarily hovered.
    HoveringOther {
        selected: RecordId,
        hovered: RecordId,
    },
}

impl Interaction {
    pub fn selected(&self) -> Option<&RecordId> {
        match self {
            Interaction::Selected { selected } | Interaction::HoveringOther { selected, .. } => {
                Some(selected)
            }
            _ => None,
        }
    }

    pub fn hovered(&self) -> Option<&RecordId> {
        match self {
            Interaction::Hovering { hovered } | Interaction::HoveringOther { hovered, .. } => {
                Some(hovered)
            }
            _ => None,
        }
    }

    /// Record that owns the main highlight, if any.
    pub fn focal(&self) -> Option<(&RecordId, bool)> {
        match self {
            Interaction::Idle => None,
            Interaction::Hovering { hovered } => Some((hovered, false)),
            Interaction::Selected { selected } | Interaction::HoveringOther { selected, .. } => {
                Some((selected, true))
            }
        }
    }
}

/// Pointer input, already resolved to record ids by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerEvent {
    Enter(RecordId),
    Leave,
    Click(RecordId),
    BackgroundClick,
    /// Drop any selection (filter or search changed).
    Deselect,
    /// Hovering a sibling in the sidebar's series list.
    PreviewEnter(RecordId),
    PreviewLeave,
}

/// Side effects requested by a transition, applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Highlight arcs around `focal` and draw its overlay.
    Highlight { focal: RecordId, selected: bool },
    ShowSidebar(RecordId),
    ClearSidebar,
    /// Back to filter-based styles, no overlay.
    RestoreFilterView,
    ShowTooltip(RecordId),
    HideTooltip,
    ScheduleTooltipHide,
    CancelTooltipHide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Interaction,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: &Interaction) -> Self {
        Transition {
            next: state.clone(),
            effects: Vec::new(),
        }
    }

    fn to(next: Interaction, effects: Vec<Effect>) -> Self {
        Transition { next, effects }
    }
}

fn select(id: &RecordId) -> Transition {
    Transition::to(
        Interaction::Selected {
            selected: id.clone(),
        },
        vec![
            Effect::CancelTooltipHide,
            Effect::HideTooltip,
            Effect::Highlight {
                focal: id.clone(),
                selected: true,
            },
            Effect::ShowSidebar(id.clone()),
        ],
    )
}

fn deselect() -> Transition {
    Transition::to(
        Interaction::Idle,
        vec![
            Effect::CancelTooltipHide,
            Effect::HideTooltip,
            Effect::RestoreFilterView,
            Effect::ClearSidebar,
        ],
    )
}

/// Advance the state machine. `is_active` is the filter predicate: inactive
/// records never receive hover or click transitions.
pub fn transition(
    state: &Interaction,
    event: &PointerEvent,
    is_active: impl Fn(&RecordId) -> bool,
) -> Transition {
    match event {
        PointerEvent::Enter(id) => {
            if !is_active(id) {
                return Transition::stay(state);
            }
            match state.selected() {
                Some(selected) if selected == id => Transition::to(
                    Interaction::Selected {
                        selected: selected.clone(),
                    },
                    Vec::new(),
                ),
                Some(selected) => Transition::to(
                    Interaction::HoveringOther {
                        selected: selected.clone(),
                        hovered: id.clone(),
                    },
                    vec![Effect::CancelTooltipHide, Effect::ShowTooltip(id.clone())],
                ),
                None => Transition::to(
                    Interaction::Hovering {
                        hovered: id.clone(),
                    },
                    vec![
                        Effect::Highlight {
                            focal: id.clone(),
                            selected: false,
                        },
                        Effect::ShowSidebar(id.clone()),
                    ],
                ),
            }
        }

        PointerEvent::Leave => match state.selected() {
            Some(selected) => Transition::to(
                Interaction::Selected {
                    selected: selected.clone(),
                },
                vec![Effect::ScheduleTooltipHide],
            ),
            None => Transition::to(
                Interaction::Idle,
                vec![
                    Effect::ScheduleTooltipHide,
                    Effect::RestoreFilterView,
                    Effect::ClearSidebar,
                ],
            ),
        },

        PointerEvent::Click(id) => {
            if !is_active(id) {
                return Transition::stay(state);
            }
            match state.selected() {
                Some(selected) if selected == id => deselect(),
                _ => select(id),
            }
        }

        PointerEvent::BackgroundClick | PointerEvent::Deselect => match state.selected() {
            Some(_) => deselect(),
            None => Transition::stay(state),
        },

        PointerEvent::PreviewEnter(id) => match state.selected() {
            Some(_) => Transition::to(
                state.clone(),
                vec![
                    Effect::CancelTooltipHide,
                    Effect::Highlight {
                        focal: id.clone(),
                        selected: false,
                    },
                    Effect::ShowTooltip(id.clone()),
                ],
            ),
            None => Transition::to(state.clone(), vec![Effect::CancelTooltipHide]),
        },

        PointerEvent::PreviewLeave => match state.selected() {
            Some(selected) => Transition::to(
                state.clone(),
                vec![
                    Effect::CancelTooltipHide,
                    Effect::HideTooltip,
                    Effect::Highlight {
                        focal: selected.clone(),
                        selected: true,
                    },
                ],
            ),
            None => Transition::to(
                state.clone(),
                vec![Effect::CancelTooltipHide, Effect::HideTooltip],
            ),
        },
    }
}
