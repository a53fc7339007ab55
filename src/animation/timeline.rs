use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{trace, warn};

use super::{
    AnimationDef, AnimationEngine, AnimationEvent, Animator, AnimatorListener, TargetRef,
};

struct Track {
    def: AnimationDef,
    duration: Duration,
    target: Option<TargetRef>,
    listeners: Vec<AnimatorListener>,
    from: f32,
    to: f32,
    elapsed: Duration,
    running: bool,
}

impl Track {
    fn new(def: AnimationDef, duration: Duration) -> Self {
        let (from, to) = def.alpha_range();
        Self {
            def,
            duration,
            target: None,
            listeners: Vec::new(),
            from: from.unwrap_or(to),
            to,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    fn targets(&self, other: &TargetRef) -> bool {
        self.target
            .as_ref()
            .is_some_and(|own| std::ptr::addr_eq(own.as_ptr(), other.as_ptr()))
    }

    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let ratio = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        ratio.min(1.0) as f32
    }

    fn apply(&self, progress: f32) {
        let alpha = (self.to - self.from).mul_add(progress, self.from);
        if let Some(target) = self.target.as_ref().and_then(Weak::upgrade) {
            target.borrow_mut().set_alpha(alpha);
        }
    }

    fn restart(&mut self) {
        let (from, to) = self.def.alpha_range();
        let current = self
            .target
            .as_ref()
            .and_then(Weak::upgrade)
            .map_or(to, |target| target.borrow().alpha());
        self.from = from.unwrap_or(current);
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.running = true;
        self.apply(0.0);
    }
}

#[derive(Default)]
struct Timeline {
    tracks: Vec<Track>,
}

/// Les listeners tournent timeline relâchée : ils peuvent lancer d'autres animateurs.
fn notify(timeline: &Rc<RefCell<Timeline>>, index: usize, event: AnimationEvent) {
    let mut listeners = match timeline.borrow_mut().tracks.get_mut(index) {
        Some(track) => std::mem::take(&mut track.listeners),
        None => return,
    };
    for listener in &mut listeners {
        listener.notify(event);
    }
    if let Some(track) = timeline.borrow_mut().tracks.get_mut(index) {
        let added = std::mem::replace(&mut track.listeners, listeners);
        track.listeners.extend(added);
    }
}

/// Moteur de fondus piloté par frames.
///
/// Un clone est une autre poignée sur la même timeline : la boucle
/// d'événements en garde un pour appeler [`FadeTimeline::advance`], la barre en
/// garde un autre pour construire ses animateurs.
#[derive(Clone)]
pub struct FadeTimeline {
    inner: Rc<RefCell<Timeline>>,
    fade_in: Duration,
    fade_out: Duration,
}

impl FadeTimeline {
    #[must_use]
    pub fn new(fade_in: Duration, fade_out: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Timeline::default())),
            fade_in,
            fade_out,
        }
    }

    /// Avance de `dt` chaque animateur en cours et notifie la fin de ceux qui
    /// se terminent.
    pub fn advance(&self, dt: Duration) {
        let finished: Vec<usize> = {
            let mut timeline = self.inner.borrow_mut();
            let mut finished = Vec::new();
            for (index, track) in timeline.tracks.iter_mut().enumerate() {
                if !track.running {
                    continue;
                }
                track.elapsed = track.elapsed.saturating_add(dt);
                let progress = track.progress();
                track.apply(progress);
                if progress >= 1.0 {
                    track.running = false;
                    finished.push(index);
                }
            }
            finished
        };

        for index in finished {
            trace!(index, "animation finished");
            notify(&self.inner, index, AnimationEvent::End);
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.inner.borrow().tracks.iter().all(|track| !track.running)
    }

    /// Nombre d'animateurs construits sur cette timeline.
    #[must_use]
    pub fn animator_count(&self) -> usize {
        self.inner.borrow().tracks.len()
    }

    const fn duration_for(&self, def: AnimationDef) -> Duration {
        match def {
            AnimationDef::FadeIn => self.fade_in,
            AnimationDef::FadeOut => self.fade_out,
        }
    }
}

impl AnimationEngine for FadeTimeline {
    type Animator = FadeAnimator;

    fn load(&mut self, def: AnimationDef) -> FadeAnimator {
        let mut timeline = self.inner.borrow_mut();
        timeline
            .tracks
            .push(Track::new(def, self.duration_for(def)));
        FadeAnimator {
            index: timeline.tracks.len() - 1,
            timeline: Rc::clone(&self.inner),
        }
    }
}

pub struct FadeAnimator {
    index: usize,
    timeline: Rc<RefCell<Timeline>>,
}

impl FadeAnimator {
    fn with_track<R>(&self, f: impl FnOnce(&mut Track) -> R) -> Option<R> {
        self.timeline.borrow_mut().tracks.get_mut(self.index).map(f)
    }
}

impl Animator for FadeAnimator {
    fn add_listener(&mut self, listener: AnimatorListener) {
        self.with_track(|track| track.listeners.push(listener));
    }

    fn set_target(&mut self, target: TargetRef) {
        self.with_track(|track| track.target = Some(target));
    }

    fn start(&mut self) {
        let cancelled = {
            let mut timeline = self.timeline.borrow_mut();
            let Some(target) = timeline
                .tracks
                .get(self.index)
                .and_then(|track| track.target.clone())
            else {
                warn!(index = self.index, "animator started without a target");
                return;
            };

            let mut cancelled = Vec::new();
            for (index, other) in timeline.tracks.iter_mut().enumerate() {
                if index != self.index && other.running && other.targets(&target) {
                    other.running = false;
                    cancelled.push(index);
                }
            }
            if let Some(track) = timeline.tracks.get_mut(self.index) {
                track.restart();
                trace!(def = %track.def, from = track.from, to = track.to, "animation started");
            }
            cancelled
        };

        for index in cancelled {
            notify(&self.timeline, index, AnimationEvent::Cancel);
        }
        notify(&self.timeline, self.index, AnimationEvent::Start);

        let completed = self
            .with_track(|track| {
                if track.running && track.duration.is_zero() {
                    track.apply(1.0);
                    track.running = false;
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false);
        if completed {
            notify(&self.timeline, self.index, AnimationEvent::End);
        }
    }

    fn is_running(&self) -> bool {
        self.timeline
            .borrow()
            .tracks
            .get(self.index)
            .is_some_and(|track| track.running)
    }
}

#[cfg(test)]
mod tests {
    use super::FadeTimeline;
    use crate::animation::{
        AnimationDef, AnimationEngine, AnimationTarget, Animator, AnimatorListener, target_ref,
    };
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    struct Opacity(f32);

    impl AnimationTarget for Opacity {
        fn alpha(&self) -> f32 {
            self.0
        }

        fn set_alpha(&mut self, alpha: f32) {
            self.0 = alpha;
        }
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        (count, move || handle.set(handle.get() + 1))
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn fade_in_runs_to_completion() {
        let target = Rc::new(RefCell::new(Opacity(1.0)));
        let mut engine = FadeTimeline::new(ms(100), ms(100));
        let mut fade_in = engine.load(AnimationDef::FadeIn);
        let (ends, on_end) = counter();
        fade_in.add_listener(AnimatorListener::new().on_end(on_end));
        fade_in.set_target(target_ref(&target));

        fade_in.start();
        assert!(fade_in.is_running());
        assert!(target.borrow().alpha().abs() < f32::EPSILON);

        engine.advance(ms(50));
        assert!((target.borrow().alpha() - 0.5).abs() < 1e-4);
        assert_eq!(ends.get(), 0);

        engine.advance(ms(60));
        assert!((target.borrow().alpha() - 1.0).abs() < f32::EPSILON);
        assert_eq!(ends.get(), 1);
        assert!(!fade_in.is_running());
        assert!(engine.is_idle());

        engine.advance(ms(100));
        assert_eq!(ends.get(), 1);
    }

    #[test]
    fn fade_out_cancels_running_fade_in_and_starts_from_current_alpha() {
        let target = Rc::new(RefCell::new(Opacity(0.0)));
        let mut engine = FadeTimeline::new(ms(100), ms(100));
        let mut fade_in = engine.load(AnimationDef::FadeIn);
        let mut fade_out = engine.load(AnimationDef::FadeOut);
        let (cancels, on_cancel) = counter();
        fade_in.add_listener(AnimatorListener::new().on_cancel(on_cancel));
        fade_in.set_target(target_ref(&target));
        fade_out.set_target(target_ref(&target));

        fade_in.start();
        engine.advance(ms(40));
        fade_out.start();

        assert_eq!(cancels.get(), 1);
        assert!(!fade_in.is_running());
        assert!(fade_out.is_running());
        assert!((target.borrow().alpha() - 0.4).abs() < 1e-4);

        engine.advance(ms(50));
        assert!((target.borrow().alpha() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn zero_duration_completes_inside_start() {
        let target = Rc::new(RefCell::new(Opacity(1.0)));
        let mut engine = FadeTimeline::new(Duration::ZERO, Duration::ZERO);
        let mut fade_out = engine.load(AnimationDef::FadeOut);
        let (starts, on_start) = counter();
        let (ends, on_end) = counter();
        fade_out.add_listener(AnimatorListener::new().on_start(on_start).on_end(on_end));
        fade_out.set_target(target_ref(&target));

        fade_out.start();

        assert_eq!(starts.get(), 1);
        assert_eq!(ends.get(), 1);
        assert!(!fade_out.is_running());
        assert!(target.borrow().alpha().abs() < f32::EPSILON);
    }

    #[test]
    fn restart_resets_progress() {
        let target = Rc::new(RefCell::new(Opacity(0.0)));
        let mut engine = FadeTimeline::new(ms(100), ms(100));
        let mut fade_in = engine.load(AnimationDef::FadeIn);
        let (starts, on_start) = counter();
        fade_in.add_listener(AnimatorListener::new().on_start(on_start));
        fade_in.set_target(target_ref(&target));

        fade_in.start();
        engine.advance(ms(80));
        fade_in.start();

        assert_eq!(starts.get(), 2);
        assert!(target.borrow().alpha().abs() < f32::EPSILON);
        assert_eq!(engine.animator_count(), 1);
    }

    #[test]
    fn start_without_target_does_nothing() {
        let mut engine = FadeTimeline::new(ms(100), ms(100));
        let mut fade_in = engine.load(AnimationDef::FadeIn);
        let (starts, on_start) = counter();
        fade_in.add_listener(AnimatorListener::new().on_start(on_start));

        fade_in.start();

        assert_eq!(starts.get(), 0);
        assert!(!fade_in.is_running());
    }
}
