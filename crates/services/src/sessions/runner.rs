use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};

use quiz_core::format_clock;
use quiz_core::model::ScoreReport;

use super::presenter::QuizPresenter;
use super::service::{QuizSession, SessionTick};

/// User input delivered to a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    Select { position: usize, option: usize },
    Submit,
}

/// Drive `session` until it is submitted, by the user or by the countdown.
///
/// Timer ticks and user events are handled on this one task, so whichever
/// submit path runs first wins and the other is never observed. The first
/// tick fires immediately. If `events` closes the countdown keeps running
/// until expiry.
pub async fn run_timed<P>(
    session: &mut QuizSession,
    presenter: &mut P,
    events: &mut mpsc::Receiver<QuizEvent>,
) -> ScoreReport
where
    P: QuizPresenter + ?Sized,
{
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut events_open = true;

    while !session.is_submitted() {
        tokio::select! {
            _ = ticker.tick() => match session.tick() {
                SessionTick::Running { displayed } | SessionTick::Expired { displayed } => {
                    presenter.render_countdown(&format_clock(displayed));
                }
                SessionTick::Idle => break,
            },
            event = events.recv(), if events_open => match event {
                Some(QuizEvent::Select { position, option }) => {
                    match session.record_selection(position, option) {
                        Ok(_) => presenter.render_selection(position, option),
                        Err(err) => log::warn!("ignoring selection: {err}"),
                    }
                }
                Some(QuizEvent::Submit) => {
                    let _ = session.submit();
                }
                None => {
                    log::debug!("event channel closed, waiting for time limit");
                    events_open = false;
                }
            },
        }
    }

    let report = session.submit().report().clone();
    presenter.render_report(&report);
    report
}
