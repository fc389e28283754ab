use std::fmt::{self, Display};

use subcontrols_core::Residual;

/// Severity band of a ballast residual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
pub enum StatusLevel {
    /// Both residuals are zero.
    Stable,
    /// The larger residual magnitude is at most [`StatusLevel::CAUTION_LIMIT`].
    Caution,
    /// Anything worse.
    Danger,
}

impl StatusLevel {
    /// Largest severity still reported as [`Caution`](Self::Caution).
    pub const CAUTION_LIMIT: u32 = 3;

    /// Classifies `residual` by its severity.
    #[must_use]
    pub const fn of(residual: Residual) -> Self {
        match residual.severity() {
            0 => Self::Stable,
            severity if severity <= Self::CAUTION_LIMIT => Self::Caution,
            _ => Self::Danger,
        }
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Caution => "caution",
            Self::Danger => "danger",
        }
    }
}

impl Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Human-readable gauge readings for a ballast residual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallastReport {
    residual: Residual,
    level: StatusLevel,
    message: String,
}

impl BallastReport {
    /// Describes a confirmed residual.
    ///
    /// # Examples
    ///
    /// ```
    /// use subcontrols_core::Residual;
    /// use subcontrols_game::{BallastReport, StatusLevel};
    ///
    /// let report = BallastReport::describe(Residual::new(-2, 1));
    /// assert_eq!(report.level(), StatusLevel::Caution);
    /// assert_eq!(report.tilt_readout(), "2° Port");
    /// assert_eq!(report.depth_readout(), "1m Sinking");
    /// assert_eq!(report.stability_score(), 78);
    /// ```
    #[must_use]
    pub fn describe(residual: Residual) -> Self {
        let Residual { tilt, depth } = residual;
        let mut lines = Vec::with_capacity(3);

        lines.push(match tilt {
            0 => "Trim level across port and starboard.".to_owned(),
            t if t < 0 => format!("Tilting {}° to the port side.", t.unsigned_abs()),
            t => format!("Tilting {t}° to the starboard side."),
        });
        lines.push(match depth {
            0 => "Depth locked at neutral buoyancy.".to_owned(),
            d if d < 0 => format!("Ballast too light, rising {}m.", d.unsigned_abs()),
            d => format!("Ballast heavy, sinking {d}m."),
        });

        let level = StatusLevel::of(residual);
        lines.push(
            match level {
                StatusLevel::Stable => "Creaks fade as the hull steadies. Lights glow green.",
                StatusLevel::Caution => "Pipes groan, but gauges hover near center.",
                StatusLevel::Danger => "Alarm lamps flash crimson; water sloshes through the tanks.",
            }
            .to_owned(),
        );

        Self {
            residual,
            level,
            message: lines.join(" "),
        }
    }

    /// Marks the report as describing unconfirmed lever changes.
    ///
    /// A stable reading is shown as caution until the move is confirmed.
    #[must_use]
    pub fn pending(mut self) -> Self {
        if self.level.is_stable() {
            self.level = StatusLevel::Caution;
        }
        self.message
            .push_str(" Adjustments primed, confirm to engage the ballast tanks.");
        self
    }

    /// Escalates the report after the move budget ran out.
    #[must_use]
    pub fn locked_out(mut self) -> Self {
        if !self.level.is_danger() {
            self.level = StatusLevel::Danger;
            self.message
                .push_str(" Red alarms pulse as the ballast system locks out.");
        }
        self
    }

    /// Returns the residual described.
    #[must_use]
    pub const fn residual(&self) -> Residual {
        self.residual
    }

    /// Returns the severity band.
    #[must_use]
    pub const fn level(&self) -> StatusLevel {
        self.level
    }

    /// Returns the status message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `max(0, 100 - 2 * (4|tilt| + 3|depth|))`.
    #[must_use]
    pub fn stability_score(&self) -> u32 {
        let weighted = self
            .residual
            .tilt
            .unsigned_abs()
            .saturating_mul(4)
            .saturating_add(self.residual.depth.unsigned_abs().saturating_mul(3));
        100u32.saturating_sub(weighted.saturating_mul(2))
    }

    /// Returns the tilt gauge text.
    #[must_use]
    pub fn tilt_readout(&self) -> String {
        match self.residual.tilt {
            0 => "Level Trim".to_owned(),
            t if t < 0 => format!("{}° Port", t.unsigned_abs()),
            t => format!("{t}° Starboard"),
        }
    }

    /// Returns the depth gauge text.
    #[must_use]
    pub fn depth_readout(&self) -> String {
        match self.residual.depth {
            0 => "Neutral Buoyancy".to_owned(),
            d if d < 0 => format!("{}m Rising", d.unsigned_abs()),
            d => format!("{d}m Sinking"),
        }
    }
}

impl Display for BallastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.level, self.message)?;
        writeln!(f, "Tilt: {}", self.tilt_readout())?;
        writeln!(f, "Depth: {}", self.depth_readout())?;
        write!(f, "Stability score: {:03}", self.stability_score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_follow_severity() {
        assert_eq!(StatusLevel::of(Residual::NEUTRAL), StatusLevel::Stable);
        assert_eq!(StatusLevel::of(Residual::new(3, -3)), StatusLevel::Caution);
        assert_eq!(StatusLevel::of(Residual::new(0, 4)), StatusLevel::Danger);
    }

    #[test]
    fn test_base_residual_report() {
        let report = BallastReport::describe(Residual::new(-10, -8));
        assert_eq!(report.level(), StatusLevel::Danger);
        assert_eq!(report.tilt_readout(), "10° Port");
        assert_eq!(report.depth_readout(), "8m Rising");
        assert_eq!(report.stability_score(), 0);
        assert_eq!(
            report.message(),
            "Tilting 10° to the port side. Ballast too light, rising 8m. \
             Alarm lamps flash crimson; water sloshes through the tanks."
        );
    }

    #[test]
    fn test_neutral_report() {
        let report = BallastReport::describe(Residual::NEUTRAL);
        assert!(report.level().is_stable());
        assert_eq!(report.tilt_readout(), "Level Trim");
        assert_eq!(report.depth_readout(), "Neutral Buoyancy");
        assert_eq!(report.stability_score(), 100);
        assert!(report.to_string().ends_with("Stability score: 100"));
    }

    #[test]
    fn test_pending_shows_stable_as_caution() {
        let report = BallastReport::describe(Residual::NEUTRAL).pending();
        assert_eq!(report.level(), StatusLevel::Caution);
        assert!(report.message().ends_with("confirm to engage the ballast tanks."));

        let danger = BallastReport::describe(Residual::new(9, 0)).pending();
        assert_eq!(danger.level(), StatusLevel::Danger);
    }

    #[test]
    fn test_locked_out_escalates_to_danger_once() {
        let report = BallastReport::describe(Residual::new(1, 0)).locked_out();
        assert_eq!(report.level(), StatusLevel::Danger);
        assert!(report.message().contains("locks out"));

        let danger = BallastReport::describe(Residual::new(7, 7)).locked_out();
        assert!(!danger.message().contains("locks out"));
    }

    #[test]
    fn test_starboard_and_sinking_readouts() {
        let report = BallastReport::describe(Residual::new(4, 2));
        assert_eq!(report.tilt_readout(), "4° Starboard");
        assert_eq!(report.depth_readout(), "2m Sinking");
        assert_eq!(report.stability_score(), 100 - 2 * (16 + 6));
        assert!(report.to_string().contains("Stability score: 056"));
    }
}
