//! Barre de toast actionnable.
//!
//! Une barre affiche une description et au plus une action. Le drapeau logique
//! `hidden` bascule dès l'appel à [`ActionableToastBar::hide`], alors que la vue
//! ne quitte l'arbre de rendu qu'à la fin de l'animation de sortie. La garde de
//! [`ActionableToastBar::show`] lit le drapeau logique : après un hide, le show
//! suivant passe toujours, même en plein fondu de sortie.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::animation::{AnimationDef, AnimationEngine, Animator, AnimatorListener, target_ref};
use crate::host::{ActionClickedListener, LayoutInflater, Resources, ToastSlots, ToastView};
use crate::types::{DimenId, IconId, LayoutId, PointerEvent, Rect, RenderPhase, StringId, Visibility};

/// Tout ce qu'il faut pour afficher un toast.
pub struct ShowRequest<O> {
    listener: Box<dyn ActionClickedListener>,
    description_icon: Option<IconId>,
    description: String,
    show_action_icon: bool,
    action_text: StringId,
    replace_visible: bool,
    operation: O,
}

impl<O> ShowRequest<O> {
    /// Requête sans icône de description ni icône d'action, qui cède la place
    /// à un toast déjà visible.
    pub fn new(
        operation: O,
        description: impl Into<String>,
        action_text: StringId,
        listener: impl ActionClickedListener + 'static,
    ) -> Self {
        Self {
            listener: Box::new(listener),
            description_icon: None,
            description: description.into(),
            show_action_icon: false,
            action_text,
            replace_visible: false,
            operation,
        }
    }

    #[must_use]
    pub fn description_icon(mut self, icon: Option<IconId>) -> Self {
        self.description_icon = icon;
        self
    }

    #[must_use]
    pub fn show_action_icon(mut self, show: bool) -> Self {
        self.show_action_icon = show;
        self
    }

    /// Autorise ce toast à remplacer celui qui est visible ou en fondu d'entrée.
    #[must_use]
    pub fn replace_visible(mut self, replace: bool) -> Self {
        self.replace_visible = replace;
        self
    }
}

impl<O: fmt::Debug> fmt::Debug for ShowRequest<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowRequest")
            .field("description_icon", &self.description_icon)
            .field("description", &self.description)
            .field("show_action_icon", &self.show_action_icon)
            .field("action_text", &self.action_text)
            .field("replace_visible", &self.replace_visible)
            .field("operation", &self.operation)
            .finish_non_exhaustive()
    }
}

pub struct ActionableToastBar<V, E, O>
where
    V: ToastView + 'static,
    E: AnimationEngine,
{
    hidden: bool,
    operation: Option<O>,
    view: Rc<RefCell<V>>,
    slots: Box<dyn ToastSlots>,
    engine: E,
    show_animation: Option<E::Animator>,
    hide_animation: Option<E::Animator>,
    action_handler: Option<Box<dyn ActionClickedListener>>,
    bottom_margin_in_conversation: i32,
}

impl<V, E, O> ActionableToastBar<V, E, O>
where
    V: ToastView + 'static,
    E: AnimationEngine,
{
    /// Inflate la ligne du toast une seule fois et lit la marge de conversation.
    ///
    /// La barre démarre cachée ; la visibilité de la vue reste celle posée par
    /// l'hôte.
    pub fn new(
        view: V,
        inflater: &mut dyn LayoutInflater,
        resources: &dyn Resources,
        engine: E,
    ) -> Self {
        let bottom_margin_in_conversation =
            resources.dimension_pixel_size(DimenId::TOAST_BAR_BOTTOM_MARGIN_IN_CONVERSATION);
        let slots = inflater.inflate(LayoutId::ACTIONABLE_TOAST_ROW);
        Self {
            hidden: true,
            operation: None,
            view: Rc::new(RefCell::new(view)),
            slots,
            engine,
            show_animation: None,
            hide_animation: None,
            action_handler: None,
            bottom_margin_in_conversation,
        }
    }

    /// Applique (ou retire) la marge basse du volet de conversation.
    pub fn set_conversation_mode(&mut self, in_conversation: bool) {
        let margin = if in_conversation {
            self.bottom_margin_in_conversation
        } else {
            0
        };
        self.view.borrow_mut().set_bottom_margin(margin);
    }

    /// Affiche un toast, sauf si un autre est déjà affiché et que la requête
    /// n'autorise pas le remplacement.
    pub fn show(&mut self, request: ShowRequest<O>) {
        let ShowRequest {
            listener,
            description_icon,
            description,
            show_action_icon,
            action_text,
            replace_visible,
            operation,
        } = request;

        if !self.hidden && !replace_visible {
            debug!(%description, "toast bar busy, dropping show request");
            return;
        }

        self.operation = Some(operation);
        self.action_handler = Some(listener);
        self.slots.set_action_clickable(true);
        self.slots.set_description_icon(description_icon);
        self.slots.set_description_text(&description);
        self.slots.set_action_icon_visible(show_action_icon);
        self.slots.set_action_text(action_text);

        self.hidden = false;
        debug!(%description, %action_text, replace_visible, "showing toast");
        self.show_animation().start();
    }

    /// Dernière opération passée à un [`show`](Self::show) accepté.
    ///
    /// Un hide ne l'efface pas.
    pub const fn operation(&self) -> Option<&O> {
        self.operation.as_ref()
    }

    /// Cache la barre et vide son contenu.
    pub fn hide(&mut self, animate: bool) {
        self.hidden = true;
        if self.view.borrow().visibility() != Visibility::Visible {
            trace!("hide on a bar that is not rendered");
            return;
        }

        self.slots.set_description_text("");
        self.action_handler = None;
        self.slots.set_action_clickable(false);

        debug!(animate, "hiding toast");
        if animate {
            self.hide_animation().start();
        } else {
            let mut view = self.view.borrow_mut();
            view.set_alpha(0.0);
            view.set_visibility(Visibility::Gone);
        }
    }

    /// Distribue un clic sur la zone tactile de l'action.
    ///
    /// Appelle le listener lié, puis cache avec animation. Retourne `false`
    /// si aucun handler n'est lié : c'est le cas après le premier clic d'un
    /// cycle d'affichage, ou après tout hide d'une barre rendue.
    pub fn click_action(&mut self) -> bool {
        let Some(handler) = self.action_handler.take() else {
            trace!("action clicked with no handler bound");
            return false;
        };
        self.slots.set_action_clickable(false);
        handler.on_action_clicked();
        self.hide(true);
        true
    }

    /// `true` si `event` tombe strictement dans les bornes écran actuelles de la barre.
    pub fn is_event_in_toast_bar(&self, event: &PointerEvent) -> bool {
        let view = self.view.borrow();
        if !view.is_shown() {
            return false;
        }
        Rect::new(view.location_on_screen(), view.size()).contains_strict(event.x, event.y)
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Dérivée d'abord de la visibilité de la vue : un animateur qui tourne
    /// encore sur une vue sortie de l'arbre de rendu ne compte pas.
    pub fn render_phase(&self) -> RenderPhase {
        if self.view.borrow().visibility() != Visibility::Visible {
            RenderPhase::Hidden
        } else if self.hide_animation.as_ref().is_some_and(Animator::is_running) {
            RenderPhase::Exiting
        } else if self.show_animation.as_ref().is_some_and(Animator::is_running) {
            RenderPhase::Entering
        } else {
            RenderPhase::Visible
        }
    }

    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }

    /// Accès mutable pour l'hôte, ex. déplacer la barre après un layout.
    pub fn view_mut(&self) -> RefMut<'_, V> {
        self.view.borrow_mut()
    }

    fn show_animation(&mut self) -> &mut E::Animator {
        let Self {
            show_animation,
            engine,
            view,
            ..
        } = self;
        show_animation.get_or_insert_with(|| {
            let weak = Rc::downgrade(view);
            let mut animator = engine.load(AnimationDef::FadeIn);
            animator.add_listener(
                AnimatorListener::new()
                    .on_start(move || set_visibility(&weak, Visibility::Visible)),
            );
            animator.set_target(target_ref(view));
            animator
        })
    }

    fn hide_animation(&mut self) -> &mut E::Animator {
        let Self {
            hide_animation,
            engine,
            view,
            ..
        } = self;
        hide_animation.get_or_insert_with(|| {
            let weak = Rc::downgrade(view);
            let mut animator = engine.load(AnimationDef::FadeOut);
            animator.add_listener(
                AnimatorListener::new().on_end(move || set_visibility(&weak, Visibility::Gone)),
            );
            animator.set_target(target_ref(view));
            animator
        })
    }
}

fn set_visibility<V: ToastView>(view: &Weak<RefCell<V>>, visibility: Visibility) {
    if let Some(view) = view.upgrade() {
        view.borrow_mut().set_visibility(visibility);
    }
}

impl<V, E, O> fmt::Debug for ActionableToastBar<V, E, O>
where
    V: ToastView + fmt::Debug + 'static,
    E: AnimationEngine,
    O: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionableToastBar")
            .field("hidden", &self.hidden)
            .field("operation", &self.operation)
            .field("view", &self.view)
            .field("show_animation_built", &self.show_animation.is_some())
            .field("hide_animation_built", &self.hide_animation.is_some())
            .field("action_bound", &self.action_handler.is_some())
            .finish_non_exhaustive()
    }
}
