//! Table disambiguation command

use cellrank::config::{CellRankConfig, ConfigBuilder};
use cellrank::disambiguation::{DisambiguationReport, GraphScope};
use cellrank::CellRankError;

use crate::args::LinkArgs;
use crate::context::CellRankCliContext;
use crate::output::print_report;

/// Fold the table and scope flags of `link` into the loaded configuration.
pub fn apply_link_overrides(
    config: CellRankConfig,
    args: &LinkArgs,
) -> cellrank::Result<CellRankConfig> {
    let mut builder = ConfigBuilder::from_config(config);

    if let Some(scope) = &args.scope {
        let scope: GraphScope = scope.parse().map_err(CellRankError::Configuration)?;
        builder = builder.with_scope(scope);
    }
    if args.header {
        builder = builder.with_header(true);
    }
    if let Some(delimiter) = args.delimiter {
        builder = builder.with_delimiter(delimiter);
    }
    if args.strip_digits {
        builder = builder.with_strip_digits(true);
    }

    Ok(builder.build()?)
}

/// Disambiguate the table named in `args`.
pub fn run_link(ctx: &CellRankCliContext, args: &LinkArgs) -> cellrank::Result<DisambiguationReport> {
    let table = ctx.load_table(&args.input)?;
    Ok(ctx.disambiguator.disambiguate_table(&table))
}

pub fn handle_link_command(
    ctx: &CellRankCliContext,
    args: &LinkArgs,
    output_format: &str,
) -> cellrank::Result<()> {
    let report = run_link(ctx, args)?;

    if output_format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        print_report(&report, args.show_candidates);
    }

    Ok(())
}
