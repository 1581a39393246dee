use clap::Parser;
use log::info;
use ocellus::{
    console::Args,
    error::{OcellusError, OclResult},
    eye::{build_outline, build_surfaces, EyeOutline, EyeSurfaces},
    tracer::{trace_bundle, RayPath},
};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Everything the rendering side needs for one frame: the static geometry plus the
/// traced ray polylines and the score.
#[derive(Serialize)]
struct TraceDump<'a> {
    surfaces: &'a EyeSurfaces,
    outline: &'a EyeOutline,
    paths: &'a [RayPath],
    focus_score: f64,
}

fn write_dump(path: &Path, dump: &TraceDump) -> OclResult<()> {
    let json = serde_json::to_string_pretty(dump)
        .map_err(|e| OcellusError::Other(format!("serializing trace dump failed: {e}")))?;
    fs::write(path, json)
        .map_err(|e| OcellusError::Other(format!("writing {} failed: {e}", path.display())))
}

fn main() -> OclResult<()> {
    env_logger::init();
    let args = Args::parse();

    let params = args.parameters()?;
    let surfaces = build_surfaces(&params)?;
    let bundle = trace_bundle(args.rays, &params, &surfaces)?;

    info!(
        "traced {} rays, {} reached the imaging region",
        bundle.paths.len(),
        bundle
            .paths
            .iter()
            .filter(|p| p.terminal_point().is_some_and(|t| t.x > 0.0))
            .count()
    );
    println!("focus score: {:.1}", bundle.focus_score);

    if let Some(output) = &args.output {
        let outline = build_outline(&params)?;
        let dump = TraceDump {
            surfaces: &surfaces,
            outline: &outline,
            paths: &bundle.paths,
            focus_score: bundle.focus_score,
        };
        write_dump(output, &dump)?;
        println!("trace written to {}", output.display());
    }
    Ok(())
}
