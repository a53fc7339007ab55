use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;
use tokio::signal;
use tokio::time::sleep;
use toastbar::Result;
use toastbar::animation::{AnimationTarget, FadeTimeline};
use toastbar::config::Config;
use toastbar::error::{ConfigError, Error as ToastError};
use toastbar::headless::{HeadlessInflater, HeadlessView, SlotState};
use toastbar::host::ToastView;
use toastbar::operation::ToastBarOperation;
use toastbar::telemetry::{LogFormat, init_tracing};
use toastbar::types::{IconId, Point, PointerEvent, RenderPhase};
use toastbar::{ActionableToastBar, ShowRequest};
use tracing::{debug, info};

use super::cli::Cli;
use super::script::{self, ShowStep, Step};

const DEFAULT_CONFIG: &str = "toastbar.toml";

type Bar = ActionableToastBar<HeadlessView, FadeTimeline, ToastBarOperation>;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), LogFormat::from_json_flag(cli.json_logs))?;

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = Config::from_env_and_file(&config_path)?;

    if let Some(interval) = cli.frame_interval {
        if interval.is_zero() || interval > Duration::from_secs(1) {
            return Err(ToastError::from(ConfigError::InvalidField {
                field: "cli.frame_interval",
                message: "value must be between 1ms and 1s".to_string(),
            }));
        }
        config.animation.frame_interval = interval;
    }

    let steps = script::load(&cli.script)?;
    info!(
        script = %cli.script.display(),
        steps = steps.len(),
        realtime = cli.realtime,
        settle_frames = config.animation.frames_to_settle(),
        "starting toast session"
    );

    let mut session = Session::new(&config, cli.realtime);
    for (index, step) in steps.into_iter().enumerate() {
        tokio::select! {
            biased;
            _ = signal::ctrl_c() => {
                info!("interrupt received, stopping script");
                break;
            }
            () = session.play(index, step) => {}
        }
    }

    if cli.print_state {
        match serde_json::to_string_pretty(&session.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(err) => tracing::warn!(error = %err, "failed to serialize final state"),
        }
    }

    Ok(())
}

/// État observable d'une session, affiché avec `--print-state`.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub phase: RenderPhase,
    pub hidden: bool,
    pub view: HeadlessView,
    pub slots: SlotState,
    pub operation: Option<&'a ToastBarOperation>,
    pub action_clicks: usize,
}

pub struct Session {
    bar: Bar,
    inflater: HeadlessInflater,
    timeline: FadeTimeline,
    frame_interval: Duration,
    realtime: bool,
    action_clicks: Rc<Cell<usize>>,
}

impl Session {
    pub fn new(config: &Config, realtime: bool) -> Self {
        let mut inflater = HeadlessInflater::new();
        let timeline = config.animation.timeline();
        let bar = ActionableToastBar::new(
            config.layout.view(),
            &mut inflater,
            &config.layout.resources(),
            timeline.clone(),
        );
        Self {
            bar,
            inflater,
            timeline,
            frame_interval: config.animation.frame_interval,
            realtime,
            action_clicks: Rc::new(Cell::new(0)),
        }
    }

    pub async fn play(&mut self, index: usize, step: Step) {
        let name = step.name();
        match step {
            Step::Show(show) => self.show(show),
            Step::Hide { animate } => self.bar.hide(animate),
            Step::Click => {
                if !self.bar.click_action() {
                    debug!(step = index, "click ignored, no action bound");
                }
            }
            Step::Touch { x, y } => self.touch(x, y),
            Step::Wait { duration } => self.wait(duration).await,
            Step::ConversationMode { enabled } => self.bar.set_conversation_mode(enabled),
            Step::MoveTo { x, y } => self.bar.view_mut().move_to(Point::new(x, y)),
            Step::SetVisibility { visibility } => self.bar.view_mut().set_visibility(visibility),
        }

        info!(
            step = index,
            op = name,
            phase = %self.bar.render_phase(),
            hidden = self.bar.is_hidden(),
            alpha = self.bar.view().alpha(),
            operation = ?self.bar.operation().map(ToastBarOperation::id),
            "step applied"
        );
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            phase: self.bar.render_phase(),
            hidden: self.bar.is_hidden(),
            view: self.bar.view().clone(),
            slots: self.inflater.state().clone(),
            operation: self.bar.operation(),
            action_clicks: self.action_clicks.get(),
        }
    }

    fn show(&mut self, step: ShowStep) {
        let ShowStep {
            operation,
            description,
            icon,
            action_icon,
            action_text,
            replace,
        } = step;

        let description = description.unwrap_or_else(|| operation.description());
        let clicks = Rc::clone(&self.action_clicks);
        let label = operation.to_string();
        debug!(
            operation = %label,
            batch_undo = operation.is_batch_undo(),
            replace,
            "show requested"
        );
        let listener = move || {
            clicks.set(clicks.get() + 1);
            info!(operation = %label, "toast action requested");
        };

        self.bar.show(
            ShowRequest::new(operation, description, action_text, listener)
                .description_icon(IconId::from_raw(icon))
                .show_action_icon(action_icon)
                .replace_visible(replace),
        );
    }

    /// Un appui en dehors d'une barre affichée la ferme.
    fn touch(&mut self, x: f32, y: f32) {
        let inside = self.bar.is_event_in_toast_bar(&PointerEvent::new(x, y));
        debug!(x, y, inside, "pointer down");
        if !inside && !self.bar.is_hidden() {
            self.bar.hide(true);
        }
    }

    async fn wait(&mut self, duration: Duration) {
        let mut remaining = duration;
        let mut phase = self.bar.render_phase();
        while !remaining.is_zero() {
            let dt = remaining.min(self.frame_interval);
            if self.realtime {
                sleep(dt).await;
            }
            self.timeline.advance(dt);
            remaining = remaining.saturating_sub(dt);

            let next = self.bar.render_phase();
            if next != phase {
                debug!(from = %phase, to = %next, "render phase changed");
                phase = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::Session;
    use crate::script::{ShowStep, Step};
    use std::time::Duration;
    use toastbar::config::Config;
    use toastbar::host::ToastView;
    use toastbar::operation::{OperationKind, ToastBarOperation};
    use toastbar::types::{RenderPhase, StringId, Visibility};

    fn show(action: &str, replace: bool) -> Step {
        Step::Show(ShowStep {
            operation: ToastBarOperation::new(OperationKind::Undo, action, 2),
            description: None,
            icon: 0,
            action_icon: true,
            action_text: StringId(5),
            replace,
        })
    }

    fn wait(ms: u64) -> Step {
        Step::Wait {
            duration: Duration::from_millis(ms),
        }
    }

    #[tokio::test]
    async fn show_wait_click_hides_after_fade_out() {
        let mut session = Session::new(&Config::default(), false);

        session.play(0, show("archived", false)).await;
        session.play(1, wait(200)).await;
        {
            let snapshot = session.snapshot();
            assert_eq!(snapshot.phase, RenderPhase::Visible);
            assert_eq!(snapshot.slots.description_text, "2 conversations archived");
            assert!(snapshot.slots.action_clickable);
        }

        session.play(2, Step::Click).await;
        assert_eq!(session.snapshot().phase, RenderPhase::Exiting);
        assert_eq!(session.snapshot().action_clicks, 1);

        session.play(3, wait(300)).await;
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, RenderPhase::Hidden);
        assert_eq!(snapshot.view.visibility(), Visibility::Gone);
        assert!(snapshot.slots.description_text.is_empty());
    }

    #[tokio::test]
    async fn touch_outside_dismisses_and_inside_keeps() {
        let mut session = Session::new(&Config::default(), false);
        session.play(0, show("deleted", false)).await;
        session.play(1, wait(200)).await;

        session.play(2, Step::Touch { x: 500.0, y: 1750.0 }).await;
        assert!(!session.snapshot().hidden);

        session.play(3, Step::Touch { x: 500.0, y: 100.0 }).await;
        assert!(session.snapshot().hidden);
        assert_eq!(session.snapshot().phase, RenderPhase::Exiting);
    }

    #[tokio::test]
    async fn second_show_without_replace_is_dropped() {
        let mut session = Session::new(&Config::default(), false);
        session.play(0, show("archived", false)).await;
        session.play(1, show("muted", false)).await;
        assert_eq!(
            session.snapshot().slots.description_text,
            "2 conversations archived"
        );

        session.play(2, show("muted", true)).await;
        assert_eq!(
            session.snapshot().slots.description_text,
            "2 conversations muted"
        );
    }

    #[tokio::test]
    async fn invisible_view_is_not_hit_and_hide_only_sets_flag() {
        let mut session = Session::new(&Config::default(), false);
        session.play(0, show("archived", false)).await;
        session.play(1, wait(200)).await;

        session
            .play(
                2,
                Step::SetVisibility {
                    visibility: Visibility::Invisible,
                },
            )
            .await;
        assert_eq!(session.snapshot().phase, RenderPhase::Hidden);

        session.play(3, Step::Touch { x: 500.0, y: 1750.0 }).await;
        let snapshot = session.snapshot();
        assert!(snapshot.hidden);
        assert_eq!(snapshot.view.visibility(), Visibility::Invisible);
        assert_eq!(snapshot.slots.description_text, "2 conversations archived");
    }
}
