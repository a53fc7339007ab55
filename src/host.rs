//! Contrats que la barre de toast attend de son hôte.
//!
//! La barre ne charge jamais elle-même layouts, chaînes ou dimensions : l'hôte
//! lui fournit sa vue, un inflater pour les slots enfants et l'accès aux
//! ressources.

use crate::animation::AnimationTarget;
use crate::types::{DimenId, IconId, LayoutId, Point, Size, StringId, Visibility};

/// Surface de rendu de la barre.
///
/// Partagée entre la barre et ses listeners d'animation : chaque méthode doit
/// pouvoir être appelée depuis un listener tant que la barre n'emprunte pas la
/// vue.
pub trait ToastView: AnimationTarget {
    fn visibility(&self) -> Visibility;

    fn set_visibility(&mut self, visibility: Visibility);

    /// `true` si la vue et tous ses ancêtres sont rendus.
    fn is_shown(&self) -> bool;

    /// Coin haut-gauche en coordonnées écran absolues, relu à chaque appel.
    fn location_on_screen(&self) -> Point;

    fn size(&self) -> Size;

    fn set_bottom_margin(&mut self, margin: i32);
}

/// Slots enfants d'une ligne de toast inflatée.
pub trait ToastSlots {
    /// `None` cache le slot d'icône.
    fn set_description_icon(&mut self, icon: Option<IconId>);

    fn set_description_text(&mut self, text: &str);

    fn set_action_icon_visible(&mut self, visible: bool);

    fn set_action_text(&mut self, text: StringId);

    /// Indique si la zone tactile de l'action a un handler de clic lié.
    fn set_action_clickable(&mut self, clickable: bool);
}

/// Construit les slots enfants de la ligne à partir d'un gabarit de layout.
pub trait LayoutInflater {
    fn inflate(&mut self, layout: LayoutId) -> Box<dyn ToastSlots>;
}

pub trait Resources {
    fn dimension_pixel_size(&self, dimen: DimenId) -> i32;
}

/// Reçoit les clics sur l'action du toast.
pub trait ActionClickedListener {
    fn on_action_clicked(&self);
}

impl<F> ActionClickedListener for F
where
    F: Fn(),
{
    fn on_action_clicked(&self) {
        self();
    }
}
