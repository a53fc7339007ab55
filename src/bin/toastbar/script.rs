use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;
use toastbar::config::HumantimeDuration;
use toastbar::error::ScriptError;
use toastbar::operation::ToastBarOperation;
use toastbar::types::{StringId, Visibility};

#[derive(Debug, Deserialize)]
struct Script {
    steps: Vec<Step>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Show(ShowStep),
    Hide {
        #[serde(default = "animate_by_default")]
        animate: bool,
    },
    /// Appuie sur le bouton d'action.
    Click,
    /// Appui n'importe où sur l'écran ; hors de la barre, il ferme le toast.
    Touch { x: f32, y: f32 },
    Wait {
        #[serde_as(as = "HumantimeDuration")]
        duration: Duration,
    },
    ConversationMode { enabled: bool },
    MoveTo { x: i32, y: i32 },
    /// L'hôte change la visibilité de la vue à l'insu de la barre.
    SetVisibility { visibility: Visibility },
}

const fn animate_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ShowStep {
    pub operation: ToastBarOperation,
    /// À défaut, la description de l'opération elle-même.
    #[serde(default)]
    pub description: Option<String>,
    /// Ressource d'icône brute, `0` pour aucune.
    #[serde(default)]
    pub icon: u32,
    #[serde(default)]
    pub action_icon: bool,
    pub action_text: StringId,
    #[serde(default)]
    pub replace: bool,
}

impl Step {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Show(_) => "show",
            Self::Hide { .. } => "hide",
            Self::Click => "click",
            Self::Touch { .. } => "touch",
            Self::Wait { .. } => "wait",
            Self::ConversationMode { .. } => "conversation_mode",
            Self::MoveTo { .. } => "move_to",
            Self::SetVisibility { .. } => "set_visibility",
        }
    }
}

pub fn load(path: &Path) -> Result<Vec<Step>, ScriptError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw, path)
}

fn parse(raw: &str, path: &Path) -> Result<Vec<Step>, ScriptError> {
    let script: Script = serde_json::from_str(raw).map_err(|source| ScriptError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if script.steps.is_empty() {
        return Err(ScriptError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(script.steps)
}

#[cfg(test)]
mod tests {
    use super::{Step, parse};
    use toastbar::types::Visibility;
    use std::path::Path;
    use std::time::Duration;
    use toastbar::error::ScriptError;

    #[test]
    fn parses_every_step_kind() {
        let raw = r#"{
            "steps": [
                { "op": "show", "operation": { "action": "archived" }, "action_text": 4 },
                { "op": "wait", "duration": "200ms" },
                { "op": "touch", "x": 10.0, "y": 20.5 },
                { "op": "click" },
                { "op": "hide" },
                { "op": "hide", "animate": false },
                { "op": "conversation_mode", "enabled": true },
                { "op": "move_to", "x": 0, "y": 40 },
                { "op": "set_visibility", "visibility": "invisible" }
            ]
        }"#;
        let steps = match parse(raw, Path::new("inline.json")) {
            Ok(steps) => steps,
            Err(err) => panic!("script rejected: {err}"),
        };
        let names: Vec<_> = steps.iter().map(Step::name).collect();
        assert_eq!(
            names,
            [
                "show",
                "wait",
                "touch",
                "click",
                "hide",
                "hide",
                "conversation_mode",
                "move_to",
                "set_visibility"
            ]
        );
        assert!(matches!(steps[1], Step::Wait { duration } if duration == Duration::from_millis(200)));
        assert!(matches!(steps[4], Step::Hide { animate: true }));
        assert!(matches!(steps[5], Step::Hide { animate: false }));
        assert!(matches!(
            steps[8],
            Step::SetVisibility {
                visibility: Visibility::Invisible
            }
        ));
        match &steps[0] {
            Step::Show(show) => {
                assert_eq!(show.icon, 0);
                assert!(!show.replace);
                assert!(show.description.is_none());
            }
            other => panic!("expected a show step, got {other:?}"),
        }
    }

    #[test]
    fn empty_script_is_rejected() {
        let err = parse(r#"{ "steps": [] }"#, Path::new("empty.json"));
        assert!(matches!(err, Err(ScriptError::Empty { .. })));
    }

    #[test]
    fn unknown_step_is_a_parse_error() {
        let err = parse(r#"{ "steps": [{ "op": "explode" }] }"#, Path::new("bad.json"));
        assert!(matches!(err, Err(ScriptError::Parse { .. })));
    }
}
