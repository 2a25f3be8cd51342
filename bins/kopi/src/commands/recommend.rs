//! Ranked recommendations

use crate::output::{self, Status};
use crate::{DistanceArg, Format, RatingArg, RecommendArgs};
use anyhow::Result;
use kopi_core::{config::Config, Error as CoreError};
use kopi_ranking::{CafeEntry, DistanceSort, FilterEditor, RatingSort};
use kopi_recommend::LocationState;
use kopi_telemetry::Timer;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Serialize)]
struct JsonOutput<'a> {
    user_id: Option<&'a str>,
    location: LocationState,
    degraded: usize,
    cafes: Vec<CafeEntry>,
}

/// Load, enrich and rank recommendations for one user
pub async fn run(args: RecommendArgs, config: &Config, format: Format) -> Result<()> {
    let location = super::position(args.lat.zip(args.lng), config)?;
    let top_n = args.top.unwrap_or(config.schema.ranking.top_n);
    let mut view = super::orchestrator(config, args.user, location, top_n)?;

    let spinner = (format == Format::Text).then(|| output::spinner("Loading recommendations..."));
    let timer = Timer::start("recommend");
    let loaded = view.load_with_location().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    loaded.map_err(CoreError::from)?;
    let elapsed = timer.stop();

    stage_filters(view.editor_mut(), args.sort, args.distance, &args.facilities);
    view.editor_mut().commit();
    let ranked = view.ranked();

    if format == Format::Json {
        let out = JsonOutput {
            user_id: view.user_id(),
            location: view.location(),
            degraded: view.degraded_count(),
            cafes: ranked,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    Status::header(&format!("Recommended for {}", view.user_id().unwrap_or("you")));
    if ranked.is_empty() {
        println!("{}", "No cafes match the current filters.".dimmed());
    } else {
        output::cafe_table(&ranked);
    }
    println!();

    if !view.location().is_known() && args.distance.is_some() {
        Status::warning("Location unknown, distance sort ignored");
    }
    if view.degraded_count() > 0 {
        Status::warning(&format!(
            "{} cafe(s) shown without details (detail lookup failed)",
            view.degraded_count()
        ));
    }
    eprintln!(
        "{}",
        format!(
            "{} of {} cafes in {}",
            ranked.len(),
            view.entries().len(),
            output::format_duration(elapsed)
        )
        .dimmed()
    );

    Ok(())
}

/// Stage command-line choices in the filter draft
fn stage_filters(
    editor: &mut FilterEditor,
    sort: Option<RatingArg>,
    distance: Option<DistanceArg>,
    facilities: &[String],
) {
    editor.open();
    if let Some(sort) = sort {
        editor.toggle_rating(match sort {
            RatingArg::RatingDesc => RatingSort::Highest,
            RatingArg::RatingAsc => RatingSort::Lowest,
        });
    }
    if let Some(distance) = distance {
        editor.toggle_distance(match distance {
            DistanceArg::Nearest => DistanceSort::Nearest,
            DistanceArg::Farthest => DistanceSort::Farthest,
        });
    }
    for facility in facilities {
        if !editor.draft().is_some_and(|d| d.facilities.contains(facility)) {
            editor.toggle_facility(facility);
        }
    }
}
