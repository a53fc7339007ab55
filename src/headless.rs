//! Hôte en mémoire pour la barre de toast.
//!
//! Sert au binaire `toastbar` pour jouer des scénarios sans écran, et aux tests
//! pour observer ce que la barre a écrit dans ses slots.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use serde::Serialize;
use tracing::trace;

use crate::animation::AnimationTarget;
use crate::host::{LayoutInflater, Resources, ToastSlots, ToastView};
use crate::types::{DimenId, IconId, LayoutId, Point, Size, StringId, Visibility};

/// Vue à géométrie fixe, hors de l'arbre de rendu au départ.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeadlessView {
    visibility: Visibility,
    alpha: f32,
    origin: Point,
    size: Size,
    bottom_margin: i32,
    attached: bool,
}

impl HeadlessView {
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self {
            visibility: Visibility::Gone,
            alpha: 1.0,
            origin,
            size,
            bottom_margin: 0,
            attached: true,
        }
    }

    pub const fn move_to(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Détacher retire la vue du hit-test sans toucher à sa visibilité, comme
    /// un conteneur parent retiré.
    pub const fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    #[must_use]
    pub const fn bottom_margin(&self) -> i32 {
        self.bottom_margin
    }
}

impl AnimationTarget for HeadlessView {
    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }
}

impl ToastView for HeadlessView {
    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        if self.visibility != visibility {
            trace!(from = %self.visibility, to = %visibility, "view visibility changed");
        }
        self.visibility = visibility;
    }

    fn is_shown(&self) -> bool {
        self.attached && self.visibility == Visibility::Visible
    }

    fn location_on_screen(&self) -> Point {
        self.origin
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_bottom_margin(&mut self, margin: i32) {
        self.bottom_margin = margin;
    }
}

/// Contenu de la ligne du toast, tel que la barre l'a écrit en dernier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SlotState {
    pub description_icon: Option<IconId>,
    pub description_text: String,
    pub action_icon_visible: bool,
    pub action_text: Option<StringId>,
    pub action_clickable: bool,
}

pub struct HeadlessSlots {
    state: Rc<RefCell<SlotState>>,
}

impl ToastSlots for HeadlessSlots {
    fn set_description_icon(&mut self, icon: Option<IconId>) {
        self.state.borrow_mut().description_icon = icon;
    }

    fn set_description_text(&mut self, text: &str) {
        text.clone_into(&mut self.state.borrow_mut().description_text);
    }

    fn set_action_icon_visible(&mut self, visible: bool) {
        self.state.borrow_mut().action_icon_visible = visible;
    }

    fn set_action_text(&mut self, text: StringId) {
        self.state.borrow_mut().action_text = Some(text);
    }

    fn set_action_clickable(&mut self, clickable: bool) {
        self.state.borrow_mut().action_clickable = clickable;
    }
}

/// Fournit des slots qui partagent un même [`SlotState`] avec l'inflater.
#[derive(Default)]
pub struct HeadlessInflater {
    state: Rc<RefCell<SlotState>>,
    inflations: usize,
}

impl HeadlessInflater {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Ref<'_, SlotState> {
        self.state.borrow()
    }

    #[must_use]
    pub const fn inflations(&self) -> usize {
        self.inflations
    }
}

impl LayoutInflater for HeadlessInflater {
    fn inflate(&mut self, layout: LayoutId) -> Box<dyn ToastSlots> {
        self.inflations += 1;
        trace!(layout = layout.0, "inflating toast row");
        Box::new(HeadlessSlots {
            state: Rc::clone(&self.state),
        })
    }
}

/// Table de ressources avec l'unique dimension lue par la barre.
#[derive(Clone, Copy, Debug)]
pub struct StaticResources {
    conversation_bottom_margin: i32,
}

impl StaticResources {
    #[must_use]
    pub const fn new(conversation_bottom_margin: i32) -> Self {
        Self {
            conversation_bottom_margin,
        }
    }
}

impl Resources for StaticResources {
    fn dimension_pixel_size(&self, dimen: DimenId) -> i32 {
        if dimen == DimenId::TOAST_BAR_BOTTOM_MARGIN_IN_CONVERSATION {
            self.conversation_bottom_margin
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HeadlessInflater, HeadlessView};
    use crate::animation::AnimationTarget;
    use crate::host::{LayoutInflater, ToastSlots, ToastView};
    use crate::types::{LayoutId, Point, Size, StringId, Visibility};

    #[test]
    fn view_is_shown_only_when_visible_and_attached() {
        let mut view = HeadlessView::new(Point::new(0, 0), Size::new(10, 10));
        assert!(!view.is_shown());
        view.set_visibility(Visibility::Visible);
        assert!(view.is_shown());
        view.set_attached(false);
        assert!(!view.is_shown());
    }

    #[test]
    fn alpha_is_clamped() {
        let mut view = HeadlessView::new(Point::new(0, 0), Size::new(10, 10));
        view.set_alpha(1.5);
        assert!((view.alpha() - 1.0).abs() < f32::EPSILON);
        view.set_alpha(-0.5);
        assert!(view.alpha().abs() < f32::EPSILON);
    }

    #[test]
    fn inflated_slots_write_through_to_shared_state() {
        let mut inflater = HeadlessInflater::new();
        let mut slots = inflater.inflate(LayoutId::ACTIONABLE_TOAST_ROW);
        slots.set_description_text("Sent");
        slots.set_action_text(StringId(9));

        assert_eq!(inflater.inflations(), 1);
        assert_eq!(inflater.state().description_text, "Sent");
        assert_eq!(inflater.state().action_text, Some(StringId(9)));
    }
}
