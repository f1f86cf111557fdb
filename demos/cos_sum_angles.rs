//! Figure for the derivation of cos(x+y) = cos(x)cos(y) - sin(x)sin(y).
//!
//! The chords AC and BD of the unit circle both subtend the angle x+y, so
//! they have the same length. Writes `cos_sum_angles.svg` to the directory
//! given as the first argument (default: current directory).
//!
//! ```text
//! cargo run --example cos_sum_angles --features tracing -- out/
//! ```

use std::path::PathBuf;

use mathdiagrams::{
    Diagram, DiagramConfig, DiagramError, MarkAngle, NaturalContext, Point, SvgSurface, d2r,
    render_to_file,
};

struct CosSumAngles;

impl Diagram for CosSumAngles {
    fn config(&self) -> DiagramConfig {
        DiagramConfig::default().with_scale(175.0)
    }

    fn draw(&self, ctx: &mut NaturalContext<'_, SvgSurface>) -> Result<(), DiagramError> {
        let origin = Point::ORIGIN;

        ctx.set_color("#666")?.set_line_width(1.0);
        ctx.circle(origin, 1.0).stroke();

        let x = d2r(55.0);
        let y = d2r(75.0);
        let z = x + y;

        let a = Point::ONE;
        let b = Point::polar(1.0, x);
        let c = Point::polar(1.0, z);
        let d = Point::polar(1.0, -y);

        // radii
        ctx.set_color("#ca8")?.line(origin, a);
        ctx.line(origin, b).line(origin, c).line(origin, d);
        // the two equal chords
        ctx.set_color("#f33")?.line(a, c);
        ctx.set_color("#3b3")?.line(b, d);

        ctx.set_color("#aaa")?;
        ctx.mark_angle(origin, 0.07, 0.0, x, "x");
        ctx.mark_angle_with(origin, 0.05, x, z, "y", MarkAngle {
            extend: 0.04,
            ..MarkAngle::default()
        });
        ctx.mark_angle_with(origin, 0.05, -y, 0.0, "-y", MarkAngle {
            extend: 0.04,
            turn: -0.4,
        });
        ctx.set_color("#f33")?
            .mark_angle_with(origin, 0.2, 0.0, z, "x+y", MarkAngle {
                extend: 0.03,
                turn: 0.6,
            });
        ctx.set_color("#3b3")?
            .mark_angle_with(origin, 0.18, -y, x, "x+y", MarkAngle {
                extend: 0.03,
                turn: -0.6,
            });

        ctx.set_color("#aaa")?;
        ctx.mark_dot(origin, "O", (-0.02, -0.02));
        ctx.mark_dot(a, "A", (0.01, 0.02));
        ctx.mark_dot(b, "B", (0.0, 0.02));
        ctx.mark_dot(c, "C", (-0.02, 0.02));
        ctx.mark_dot(d, "D", (0.0, -0.02));
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

    let path = out_dir.join("cos_sum_angles.svg");
    render_to_file(&CosSumAngles, &path)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
