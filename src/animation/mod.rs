//! Contrat du moteur d'animation utilisé par la barre, et un moteur intégré.
//!
//! Un moteur construit un [`Animator`] à partir d'une [`AnimationDef`] nommée.
//! Les animateurs notifient leur cycle de vie à des [`AnimatorListener`] ; la
//! barre ne réagit qu'aux notifications de début et de fin.

use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::{Rc, Weak};

mod timeline;

pub use timeline::{FadeAnimator, FadeTimeline};

/// Cible dont un animateur pilote l'opacité.
pub trait AnimationTarget {
    fn alpha(&self) -> f32;

    fn set_alpha(&mut self, alpha: f32);
}

/// Poignée partagée, non propriétaire, vers une cible d'animation.
pub type TargetRef = Weak<RefCell<dyn AnimationTarget>>;

#[must_use]
pub fn target_ref<T>(target: &Rc<RefCell<T>>) -> TargetRef
where
    T: AnimationTarget + 'static,
{
    let shared: Rc<RefCell<dyn AnimationTarget>> = target.clone();
    Rc::downgrade(&shared)
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AnimationDef {
    FadeIn,
    FadeOut,
}

impl AnimationDef {
    /// Alpha de départ (`None` : "alpha courant de la cible") et alpha final.
    #[must_use]
    pub const fn alpha_range(self) -> (Option<f32>, f32) {
        match self {
            Self::FadeIn => (Some(0.0), 1.0),
            Self::FadeOut => (None, 0.0),
        }
    }
}

impl Display for AnimationDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FadeIn => "fade_in",
            Self::FadeOut => "fade_out",
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnimationEvent {
    Start,
    End,
    Cancel,
    Repeat,
}

type Callback = Box<dyn FnMut()>;

/// Callbacks de cycle de vie d'un animateur. Un callback absent ne fait rien.
#[derive(Default)]
pub struct AnimatorListener {
    on_start: Option<Callback>,
    on_end: Option<Callback>,
    on_cancel: Option<Callback>,
    on_repeat: Option<Callback>,
}

impl AnimatorListener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_end(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_cancel(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_repeat(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_repeat = Some(Box::new(f));
        self
    }

    pub fn notify(&mut self, event: AnimationEvent) {
        let slot = match event {
            AnimationEvent::Start => &mut self.on_start,
            AnimationEvent::End => &mut self.on_end,
            AnimationEvent::Cancel => &mut self.on_cancel,
            AnimationEvent::Repeat => &mut self.on_repeat,
        };
        if let Some(callback) = slot {
            callback();
        }
    }
}

impl fmt::Debug for AnimatorListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatorListener")
            .field("on_start", &self.on_start.is_some())
            .field("on_end", &self.on_end.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .field("on_repeat", &self.on_repeat.is_some())
            .finish()
    }
}

pub trait Animator {
    fn add_listener(&mut self, listener: AnimatorListener);

    fn set_target(&mut self, target: TargetRef);

    /// Lance l'animation, ou la relance si elle tourne déjà.
    fn start(&mut self);

    fn is_running(&self) -> bool;
}

pub trait AnimationEngine {
    type Animator: Animator;

    fn load(&mut self, def: AnimationDef) -> Self::Animator;
}

#[cfg(test)]
mod tests {
    use super::{AnimationEvent, AnimatorListener};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn listener_routes_each_event_to_its_callback() {
        let starts = Rc::new(Cell::new(0));
        let ends = Rc::new(Cell::new(0));
        let mut listener = AnimatorListener::new()
            .on_start({
                let starts = Rc::clone(&starts);
                move || starts.set(starts.get() + 1)
            })
            .on_end({
                let ends = Rc::clone(&ends);
                move || ends.set(ends.get() + 1)
            });

        listener.notify(AnimationEvent::Start);
        listener.notify(AnimationEvent::Cancel);
        listener.notify(AnimationEvent::Repeat);
        listener.notify(AnimationEvent::End);
        listener.notify(AnimationEvent::End);

        assert_eq!(starts.get(), 1);
        assert_eq!(ends.get(), 2);
    }
}
