//! Diagrams: a page configuration plus a drawing routine.

use std::path::Path;

use crate::config::DiagramConfig;
use crate::errors::DiagramError;
use crate::render::{NaturalContext, Surface, SvgSurface};

/// A single figure.
///
/// Implementors describe the page with [`Diagram::config`] and paint the
/// figure in [`Diagram::draw`]. The background canvas is already on the
/// page when `draw` runs.
pub trait Diagram {
    fn config(&self) -> DiagramConfig {
        DiagramConfig::default()
    }

    fn draw(&self, ctx: &mut NaturalContext<'_, SvgSurface>) -> Result<(), DiagramError>;
}

/// A diagram made from a closure.
///
/// ```
/// use mathdiagrams::{DiagramConfig, FnDiagram, render_to_string};
///
/// let diagram = FnDiagram::new(|ctx| {
///     ctx.set_color("#f00")?.line(0.0, 1.0);
///     Ok(())
/// })
/// .with_config(DiagramConfig::default().with_scale(100.0));
///
/// let svg = render_to_string(&diagram).unwrap();
/// assert!(svg.contains("M200,200L300,200"));
/// ```
pub struct FnDiagram<F> {
    config: DiagramConfig,
    draw: F,
}

impl<F> FnDiagram<F>
where
    F: Fn(&mut NaturalContext<'_, SvgSurface>) -> Result<(), DiagramError>,
{
    pub fn new(draw: F) -> Self {
        Self {
            config: DiagramConfig::default(),
            draw,
        }
    }

    pub fn with_config(mut self, config: DiagramConfig) -> Self {
        self.config = config;
        self
    }
}

impl<F> Diagram for FnDiagram<F>
where
    F: Fn(&mut NaturalContext<'_, SvgSurface>) -> Result<(), DiagramError>,
{
    fn config(&self) -> DiagramConfig {
        self.config.clone()
    }

    fn draw(&self, ctx: &mut NaturalContext<'_, SvgSurface>) -> Result<(), DiagramError> {
        (self.draw)(ctx)
    }
}

/// Paint the canvas and the diagram onto a fresh surface.
pub fn render_surface(diagram: &dyn Diagram) -> Result<SvgSurface, DiagramError> {
    let config = diagram.config();
    config.validate()?;

    crate::log::debug!(
        width = config.width,
        height = config.height,
        scale = config.scale,
        "rendering diagram"
    );

    let mut surface = SvgSurface::new(config.width, config.height);
    surface.set_font_size(config.font_size);
    {
        let mut ctx = NaturalContext::new(
            &mut surface,
            config.shape(),
            config.scale,
            Some(config.center()),
        )?;
        ctx.draw_canvas(&config.canvas)?;
        diagram.draw(&mut ctx)?;
    }

    crate::log::debug!(elements = surface.elements().len(), "diagram drawn");
    Ok(surface)
}

/// Render a diagram to an SVG document.
pub fn render_to_string(diagram: &dyn Diagram) -> Result<String, DiagramError> {
    Ok(render_surface(diagram)?.to_svg_string())
}

/// Render a diagram and write it to `path`, creating missing parent
/// directories. Nothing is written if drawing fails.
pub fn render_to_file(diagram: &dyn Diagram, path: impl AsRef<Path>) -> Result<(), DiagramError> {
    let path = path.as_ref();
    let svg = render_to_string(diagram)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, svg)?;
    crate::log::debug!(path = %path.display(), "wrote diagram");
    Ok(())
}
