//! SVG path data in device coordinates.

use std::fmt;

use glam::DVec2;

/// A single path command. All coordinates are absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Circular arc to `end`. `sweep` follows SVG: true = increasing angle,
    /// which is clockwise on screen.
    Arc {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        end: DVec2,
    },
    Close,
}

/// Builder for the `d` attribute of an SVG path.
///
/// ```
/// use glam::dvec2;
/// use mathdiagrams::render::PathData;
///
/// let d = PathData::new().m(dvec2(0.0, 0.0)).l(dvec2(10.0, 0.0)).z();
/// assert_eq!(d.to_string(), "M0,0L10,0Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn m(mut self, p: DVec2) -> Self {
        self.push(PathCommand::MoveTo(p));
        self
    }

    pub fn l(mut self, p: DVec2) -> Self {
        self.push(PathCommand::LineTo(p));
        self
    }

    pub fn a(mut self, radius: f64, large_arc: bool, sweep: bool, end: DVec2) -> Self {
        self.push(PathCommand::Arc {
            radius,
            large_arc,
            sweep,
            end,
        });
        self
    }

    pub fn z(mut self) -> Self {
        self.push(PathCommand::Close);
        self
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// True when the path would put ink on the page, i.e. it contains more
    /// than bare move-tos.
    pub fn has_segments(&self) -> bool {
        self.commands
            .iter()
            .any(|c| !matches!(c, PathCommand::MoveTo(_)))
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => write!(f, "M{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::LineTo(p) => write!(f, "L{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::Arc {
                    radius,
                    large_arc,
                    sweep,
                    end,
                } => write!(
                    f,
                    "A{r},{r} 0 {} {} {},{}",
                    u8::from(large_arc),
                    u8::from(sweep),
                    fmt_num(end.x),
                    fmt_num(end.y),
                    r = fmt_num(radius)
                )?,
                PathCommand::Close => write!(f, "Z")?,
            }
        }
        Ok(())
    }
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
///
/// Values within 1e-9 of zero print as `0` so `cos(π/2)` noise never
/// reaches the output.
pub(crate) fn fmt_num(value: f64) -> String {
    const SIG_FIGS: i32 = 6;

    if value.abs() < 1e-9 {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(SIG_FIGS - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (SIG_FIGS - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn fmt_num_trims() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(400.0), "400");
        assert_eq!(fmt_num(1_000_000.0), "1000000");
        assert_eq!(fmt_num(2.5), "2.5");
        assert_eq!(fmt_num(-12.25), "-12.25");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
        assert_eq!(fmt_num(6.123e-17), "0");
    }

    #[test]
    fn display_line() {
        let d = PathData::new().m(dvec2(200.0, 200.0)).l(dvec2(400.0, 200.0));
        insta::assert_snapshot!(d, @"M200,200L400,200");
    }

    #[test]
    fn display_arc() {
        let d = PathData::new()
            .m(dvec2(10.0, 0.0))
            .a(10.0, false, true, dvec2(0.0, 10.0));
        insta::assert_snapshot!(d, @"M10,0A10,10 0 0 1 0,10");
    }

    #[test]
    fn has_segments_ignores_moves() {
        let d = PathData::new().m(dvec2(1.0, 1.0));
        assert!(!d.is_empty());
        assert!(!d.has_segments());
        assert!(d.l(dvec2(2.0, 2.0)).has_segments());
    }
}
