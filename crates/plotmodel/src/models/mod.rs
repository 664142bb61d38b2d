//! Bundled plot models.
//!
//! Declaration order matters: a base or an included mixin is built before
//! anything that uses it, and reference targets are registered before the
//! models that point at them.

mod grid;
mod mixins;
mod renderer;
mod ticker;

use plotmodel_core::{
    registry::{SchemaRegistry, registry},
    schema::{ModelSchema, SchemaError},
};
use std::sync::{Arc, LazyLock};

// model names
pub const BASIC_TICKER: &str = "BasicTicker";
pub const FILL_PROPS: &str = "FillProps";
pub const FIXED_TICKER: &str = "FixedTicker";
pub const GRID: &str = "Grid";
pub const GUIDE_RENDERER: &str = "GuideRenderer";
pub const LINE_PROPS: &str = "LineProps";
pub const RENDERER: &str = "Renderer";
pub const TICKER: &str = "Ticker";

///
/// Models
///
/// Built schemas of every bundled model. Mixins are held here only; they
/// are never registered.
///

#[derive(Clone, Debug)]
pub struct Models {
    pub line_props: Arc<ModelSchema>,
    pub fill_props: Arc<ModelSchema>,
    pub renderer: Arc<ModelSchema>,
    pub guide_renderer: Arc<ModelSchema>,
    pub ticker: Arc<ModelSchema>,
    pub basic_ticker: Arc<ModelSchema>,
    pub fixed_ticker: Arc<ModelSchema>,
    pub grid: Arc<ModelSchema>,
}

/// Build every bundled model and register the non-mixin ones in `registry`.
pub fn declare(registry: &SchemaRegistry) -> Result<Models, SchemaError> {
    let line_props = Arc::new(mixins::line_props()?);
    let fill_props = Arc::new(mixins::fill_props()?);

    let renderer = registry.register(renderer::renderer()?)?;
    let guide_renderer = registry.register(renderer::guide_renderer(Arc::clone(&renderer))?)?;

    let ticker = registry.register(ticker::ticker()?)?;
    let basic_ticker = registry.register(ticker::basic_ticker(Arc::clone(&ticker))?)?;
    let fixed_ticker = registry.register(ticker::fixed_ticker(Arc::clone(&ticker))?)?;

    let grid = registry.register(grid::grid(
        Arc::clone(&guide_renderer),
        Arc::clone(&line_props),
        Arc::clone(&fill_props),
    )?)?;

    Ok(Models {
        line_props,
        fill_props,
        renderer,
        guide_renderer,
        ticker,
        basic_ticker,
        fixed_ticker,
        grid,
    })
}

static MODELS: LazyLock<Result<Models, SchemaError>> = LazyLock::new(|| declare(registry()));

/// Bundled models, declared into the process-wide registry on first use.
pub fn models() -> Result<&'static Models, &'static SchemaError> {
    LazyLock::force(&MODELS).as_ref()
}
