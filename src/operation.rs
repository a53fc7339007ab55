use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Le toast propose d'annuler l'action qu'il signale.
    #[default]
    Undo,
    /// Le toast signale un échec et peut proposer de réessayer.
    Error,
}

impl OperationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Error => "error",
        }
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Le travail signalé par un toast, ex. "3 conversations archived".
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ToastBarOperation {
    #[serde(default = "Uuid::now_v7")]
    id: Uuid,
    #[serde(default)]
    kind: OperationKind,
    /// Verbe au participe passé décrivant l'action, ex. "archived".
    action: String,
    #[serde(default = "one")]
    count: usize,
    /// L'action a porté sur une sélection multiple plutôt qu'un seul élément.
    #[serde(default)]
    batch: bool,
}

const fn one() -> usize {
    1
}

impl ToastBarOperation {
    pub fn new(kind: OperationKind, action: impl Into<String>, count: usize) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind,
            action: action.into(),
            count,
            batch: false,
        }
    }

    #[must_use]
    pub fn batch(mut self, batch: bool) -> Self {
        self.batch = batch;
        self
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    pub const fn count(&self) -> usize {
        self.count
    }

    /// `true` pour un undo qui couvre une sélection multiple.
    pub const fn is_batch_undo(&self) -> bool {
        self.batch && matches!(self.kind, OperationKind::Undo)
    }

    pub fn description(&self) -> String {
        match (self.kind, self.count) {
            (OperationKind::Error, _) => format!("Couldn't complete: {}", self.action),
            (OperationKind::Undo, 1) => format!("Conversation {}", self.action),
            (OperationKind::Undo, n) => format!("{n} conversations {}", self.action),
        }
    }
}

impl Display for ToastBarOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
