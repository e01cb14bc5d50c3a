use pc_core::RegionShape;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ContainsArgs;
use crate::output::output;

#[derive(Serialize)]
struct ContainsResponse {
    x: f64,
    y: f64,
    r: f64,
    inside: bool,
    /// False when no region is defined for `r` (negative or non-finite).
    region_defined: bool,
}

/// Local membership oracle. The backend stays authoritative for `check`.
pub fn handle(args: &ContainsArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let shape = RegionShape::for_radius(Some(args.r));
    output(
        &ContainsResponse {
            x: args.x,
            y: args.y,
            r: args.r,
            inside: pc_core::contains(args.x, args.y, args.r),
            region_defined: !matches!(shape, RegionShape::Undefined { .. }),
        },
        flags.format,
    )
}
