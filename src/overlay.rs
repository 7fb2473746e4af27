use crate::constants::HUD_BAR_WIDTH;
use zen_core::{GestureSignal, SessionState};

pub const BANNER_TRACKING: &str = "Hand Tracking Active";
pub const BANNER_WAITING: &str = "Waiting for Hands...";
pub const HINT_TRACKING: &str = "Hands apart: Expand • Fists: Energy";
pub const HINT_WAITING: &str = "Show both hands to camera to interact";

/// Gauge readings shown to the user, as fractions in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gauges {
    pub scale: f32,
    pub energy: f32,
}

#[inline]
pub fn gauges(signal: &GestureSignal) -> Gauges {
    if signal.detected {
        Gauges {
            scale: signal.spread_distance.clamp(0.0, 1.0),
            energy: signal.tension.clamp(0.0, 1.0),
        }
    } else {
        Gauges {
            scale: 0.0,
            energy: 0.0,
        }
    }
}

#[inline]
pub fn bar(fraction: f32, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// One-line status for the log, standing in for the on-screen overlay.
pub fn status_line(session: &SessionState) -> String {
    let signal = session.signal();
    let g = gauges(&signal);
    let (banner, hint) = if signal.detected {
        (BANNER_TRACKING, HINT_TRACKING)
    } else {
        (BANNER_WAITING, HINT_WAITING)
    };
    format!(
        "{} | Scale {} {:>3.0}% | Energy {} {:>3.0}% | {} {} | {}",
        banner,
        bar(g.scale, HUD_BAR_WIDTH),
        g.scale * 100.0,
        bar(g.energy, HUD_BAR_WIDTH),
        g.energy * 100.0,
        session.shape(),
        session.color(),
        hint
    )
}
