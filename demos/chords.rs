//! Chord length on the unit circle: the single angle case and the
//! double angle case.
//!
//! Writes `single_chord.svg` and `double_chord.svg` to the directory given
//! as the first argument (default: current directory).

use std::path::PathBuf;

use mathdiagrams::{
    Diagram, DiagramConfig, DiagramError, NaturalContext, Point, SvgSurface, d2r, render_to_file,
};

const COLORS: [&str; 4] = ["#f00", "#f58", "#ff0", "#08f"];

/// One chord from A (single) or from C (double) to B.
struct Chords {
    double: bool,
}

impl Diagram for Chords {
    fn config(&self) -> DiagramConfig {
        DiagramConfig::default().with_scale(175.0)
    }

    fn draw(&self, ctx: &mut NaturalContext<'_, SvgSurface>) -> Result<(), DiagramError> {
        let origin = Point::ORIGIN;

        ctx.set_color("#666")?.set_line_width(1.0);
        ctx.circle(origin, 1.0).stroke();

        let x = d2r(82.0);
        let y = d2r(30.0);

        let a = Point::ONE;
        let b = Point::polar(1.0, x);
        let c = Point::polar(1.0, y);

        ctx.set_color(COLORS[0])?.line(origin, a);
        ctx.set_color(COLORS[1])?.line(origin, b);
        let chord_start = if self.double {
            ctx.set_color(COLORS[3])?.line(origin, c);
            c
        } else {
            a
        };
        ctx.set_color(COLORS[2])?.line(chord_start, b);

        ctx.set_color("#aaa")?;
        ctx.mark_angle(origin, 0.1, 0.0, x, "x");
        if self.double {
            ctx.mark_angle(origin, 0.2, 0.0, y, "y");
        }

        ctx.mark_dot(origin, "O", (-0.02, -0.02));
        ctx.mark_dot(a, "A", (0.01, 0.02));
        ctx.mark_dot(b, "B", (0.0, 0.02));
        if self.double {
            ctx.mark_dot(c, "C", (0.0, 0.02));
        }
        Ok(())
    }
}

fn main() -> miette::Result<()> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    for (name, double) in [("single_chord.svg", false), ("double_chord.svg", true)] {
        let path = out_dir.join(name);
        render_to_file(&Chords { double }, &path)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
