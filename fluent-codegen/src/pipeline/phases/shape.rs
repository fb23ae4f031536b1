//! Shape phase - derives the builder contract of every expanded type.

use eyre::Result;
use tracing::info;

use crate::pipeline::{CompilationContext, Phase};

/// Phase that turns expanded definitions into builder shapes.
pub struct ShapePhase;

impl Phase for ShapePhase {
    fn name(&self) -> &'static str {
        "shape"
    }

    fn description(&self) -> &'static str {
        "Derive builder contracts"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let total = ctx.expanded.len();

        for (index, def) in ctx.expanded.iter().enumerate() {
            info!("{}%: {}", progress(index, total), def.fully_qualified_name());
            let shape = ctx.session.shape_of(def);
            ctx.shapes.push(shape);
        }

        info!("100%: builder shape generation complete");
        Ok(())
    }
}

/// Percentage of items done before item `index` starts.
fn progress(index: usize, total: usize) -> usize {
    index * 100 / total
}
