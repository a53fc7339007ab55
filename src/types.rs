use std::fmt::{self, Display};
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Ressource image affichée à côté de la description.
///
/// L'id brut `0` signifie "pas d'icône" et ne construit jamais d'`IconId`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IconId(NonZeroU32);

impl IconId {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// Ressource chaîne utilisée pour le libellé de l'action.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StringId(pub u32);

impl Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "string/{}", self.0)
    }
}

/// Gabarit de layout passé à l'inflater.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LayoutId(pub &'static str);

impl LayoutId {
    pub const ACTIONABLE_TOAST_ROW: Self = Self("actionable_toast_row");
}

/// Ressource de dimension lue via [`crate::host::Resources`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DimenId(pub &'static str);

impl DimenId {
    pub const TOAST_BAR_BOTTOM_MARGIN_IN_CONVERSATION: Self =
        Self("toast_bar_bottom_margin_in_conversation");
}

/// Visibilité d'une vue dans l'arbre de rendu.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    /// Transparente mais toujours mise en page.
    Invisible,
    /// Retirée de l'arbre de rendu.
    #[default]
    Gone,
}

impl Visibility {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Invisible => "invisible",
            Self::Gone => "gone",
        }
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position de la barre dans son cycle show/hide, vue depuis l'écran.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPhase {
    Hidden,
    Entering,
    Visible,
    Exiting,
}

impl Display for RenderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hidden => "hidden",
            Self::Entering => "entering",
            Self::Visible => "visible",
            Self::Exiting => "exiting",
        })
    }
}

/// Position écran absolue, en pixels.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Rectangle écran aligné sur les axes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Inclusion stricte : un point sur un bord est dehors.
    #[must_use]
    pub fn contains_strict(&self, x: f32, y: f32) -> bool {
        let left = f64::from(self.origin.x);
        let top = f64::from(self.origin.y);
        let right = left + f64::from(self.size.width);
        let bottom = top + f64::from(self.size.height);
        let (x, y) = (f64::from(x), f64::from(y));
        x > left && x < right && y > top && y < bottom
    }
}

/// Événement pointeur en coordonnées écran absolues.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
