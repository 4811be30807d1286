use std::time::Duration;

/// Durée du fondu d'apparition d'une ligne.
pub const FADE_IN_DURATION: Duration = Duration::from_millis(200);

/// Délai supplémentaire par index de ligne avant son fondu.
pub const FADE_IN_STAGGER: Duration = Duration::from_millis(30);

/// Looping horizontal float of one settled row.
///
/// Waveform: `-amplitude → +amplitude → -amplitude` over one `period`, each
/// half eased in and out, starting `phase` after the row settled. Offsets are
/// percentages of the row width.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ar_render::motion::RowMotion;
///
/// let row0 = RowMotion::for_row(0);
/// let row3 = RowMotion::for_row(3);
/// assert_eq!(row0.period, Duration::from_secs(20));
/// assert_eq!(row3.period, Duration::from_secs(26));
/// assert!((row3.amplitude_pct - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowMotion {
    /// Peak displacement, percent of the row width.
    pub amplitude_pct: f64,
    /// Length of one back-and-forth cycle.
    pub period: Duration,
    /// Wait before the first cycle starts.
    pub phase: Duration,
}

impl RowMotion {
    /// Parameters for row `row`: amplitude `2 + (row mod 3) * 0.5` %, period
    /// `20 + (row mod 5) * 2` s, phase `(row * 0.15) mod 2` s.
    #[must_use]
    pub fn for_row(row: usize) -> Self {
        Self {
            amplitude_pct: 2.0 + (row % 3) as f64 * 0.5,
            period: Duration::from_secs(20 + (row % 5) as u64 * 2),
            phase: Duration::from_secs_f64((row as f64 * 0.15) % 2.0),
        }
    }

    /// Displacement in percent, `elapsed` after the row settled.
    ///
    /// Zero until the phase offset has passed.
    #[must_use]
    pub fn offset_pct(&self, elapsed: Duration) -> f64 {
        let Some(t) = elapsed.checked_sub(self.phase) else {
            return 0.0;
        };
        let period = self.period.as_secs_f64();
        if period <= 0.0 {
            return 0.0;
        }
        let cycle = (t.as_secs_f64() % period) / period;
        let a = self.amplitude_pct;
        if cycle < 0.5 {
            -a + 2.0 * a * ease_in_out(cycle * 2.0)
        } else {
            a - 2.0 * a * ease_in_out((cycle - 0.5) * 2.0)
        }
    }
}

/// One-shot fade-in of a freshly revealed row.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ar_render::motion::FadeIn;
///
/// let fade = FadeIn::for_row(2);
/// assert_eq!(fade.delay, Duration::from_millis(60));
/// assert_eq!(fade.opacity(Duration::from_millis(10)), 0.0);
/// assert_eq!(fade.opacity(Duration::from_secs(1)), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeIn {
    /// Wait after the row was revealed.
    pub delay: Duration,
    /// Length of the fade.
    pub duration: Duration,
}

impl FadeIn {
    /// Fade for row `row`, staggered by [`FADE_IN_STAGGER`] per row.
    #[must_use]
    pub fn for_row(row: usize) -> Self {
        Self {
            delay: FADE_IN_STAGGER.saturating_mul(u32::try_from(row).unwrap_or(u32::MAX)),
            duration: FADE_IN_DURATION,
        }
    }

    /// Opacity in [0, 1], `since_reveal` after the row appeared. Ease-out.
    #[must_use]
    pub fn opacity(&self, since_reveal: Duration) -> f32 {
        let Some(t) = since_reveal.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let p = (t.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        1.0 - (1.0 - p) * (1.0 - p)
    }
}

/// Smoothstep, close to CSS `ease-in-out`.
#[inline]
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parameters_follow_row_index() {
        let m = RowMotion::for_row(7);
        assert!(close(m.amplitude_pct, 2.5));
        assert_eq!(m.period, Duration::from_secs(24));
        assert!((m.phase.as_secs_f64() - 1.05).abs() < 1e-6);

        // 14 * 0.15 = 2.1 → wraps to 0.1 s
        assert!((RowMotion::for_row(14).phase.as_secs_f64() - 0.1).abs() < 1e-6);
        assert!(close(RowMotion::for_row(5).amplitude_pct, 3.0));
        // 6 mod 3 = 0 → back to the base amplitude
        assert!(close(RowMotion::for_row(6).amplitude_pct, 2.0));
    }

    #[test]
    fn waveform_is_symmetric_back_and_forth() {
        let m = RowMotion::for_row(0);
        let a = m.amplitude_pct;
        assert!(close(m.offset_pct(Duration::ZERO), -a));
        assert!(close(m.offset_pct(Duration::from_secs(5)), 0.0));
        assert!(close(m.offset_pct(Duration::from_secs(10)), a));
        assert!(close(m.offset_pct(Duration::from_secs(15)), 0.0));
        assert!(close(m.offset_pct(Duration::from_secs(20)), -a));
        assert!(close(
            m.offset_pct(Duration::from_secs(3)),
            m.offset_pct(Duration::from_secs(17))
        ));
    }

    #[test]
    fn motion_waits_for_phase() {
        let m = RowMotion::for_row(1);
        assert_eq!(m.offset_pct(Duration::from_millis(100)), 0.0);
        assert!(close(m.offset_pct(m.phase), -m.amplitude_pct));
    }

    #[test]
    fn offset_never_exceeds_amplitude() {
        for row in 0..15 {
            let m = RowMotion::for_row(row);
            for ms in (0..60_000).step_by(250) {
                let off = m.offset_pct(Duration::from_millis(ms));
                assert!(off.abs() <= m.amplitude_pct + 1e-9);
            }
        }
    }

    #[test]
    fn fade_eases_out() {
        let fade = FadeIn::for_row(0);
        assert_eq!(fade.opacity(Duration::ZERO), 0.0);
        let half = fade.opacity(Duration::from_millis(100));
        assert!((half - 0.75).abs() < 1e-4);
        assert_eq!(fade.opacity(Duration::from_millis(200)), 1.0);
    }
}
