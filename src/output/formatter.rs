use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::engine::{NearbyAsset, RankedSite, ScenarioComparison, SiteEvaluation};
use crate::scoring::ScoreBreakdown;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a 0-100 score with one decimal ("75.7")
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Format a distance in km ("12.3 km", "850 km")
pub fn format_distance(km: f64) -> String {
    if km >= 100.0 {
        format!("{:.0} km", km)
    } else {
        format!("{:.1} km", km)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Region/state suffix for a site, or its id when it has neither
fn site_ref(site: &RankedSite) -> String {
    match (&site.state, &site.region) {
        (Some(state), Some(region)) => format!("{} ({})", state, region),
        (Some(state), None) => state.clone(),
        (None, Some(region)) => region.clone(),
        (None, None) => format!("#{}", site.node_id),
    }
}

/// Format ranked sites as a table with columns: Index, Score, Name, Location
/// No headers
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column is right-aligned, 7 chars wide
pub fn format_ranking_table(sites: &[RankedSite], use_colors: bool) -> String {
    if sites.is_empty() {
        return "No sites found.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 3;
    let score_width = 7;
    let separator = "  ";

    sites
        .iter()
        .enumerate()
        .map(|(idx, site)| {
            // 1-based index, right-aligned with trailing dot
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!("{:>width$}", format_score(site.composite_score), width = score_width);
            let location = site_ref(site);

            let fixed_width = index_width + 1 + score_width + separator.len() * 2 + location.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_name(&site.name, width - fixed_width),
                // Very narrow terminal
                Some(_) => truncate_name(&site.name, 20),
                // No terminal (pipe), don't truncate
                None => site.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    name,
                    separator,
                    location.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_padded, separator, name, separator, location
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked sites as tab-separated values for scripting
/// Columns: composite, id, name, clean_gen, transmission, reliability (no headers, no colors)
pub fn format_tsv(sites: &[RankedSite]) -> String {
    if sites.is_empty() {
        return String::new();
    }

    sites
        .iter()
        .map(|site| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                format_score(site.composite_score),
                site.node_id,
                site.name,
                format_score(site.scores.clean_gen),
                format_score(site.scores.transmission_headroom),
                format_score(site.scores.reliability)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a score breakdown: composite line, one line per metric, then the
/// demand adjustment if one was applied
pub fn format_breakdown(breakdown: &ScoreBreakdown, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let composite = format_score(breakdown.composite_score);
    if use_colors {
        lines.push(format!("Composite: {}", composite.bold()));
    } else {
        lines.push(format!("Composite: {}", composite));
    }

    for c in &breakdown.contributions {
        lines.push(format!(
            "  {:<22} {:>5}  x {:.2} = {:>5.1}",
            c.metric.label(),
            format_score(c.score),
            c.weight,
            c.contribution
        ));
    }

    if let Some(adequacy) = &breakdown.adequacy {
        let line = format!(
            "  Demand {:.0} MW vs {:.0} MW clean nearby: {} (x{:.2}, clean gen {} -> {})",
            adequacy.demand_mw,
            adequacy.available_mw,
            adequacy.band.label,
            adequacy.band.factor,
            format_score(adequacy.clean_gen_before),
            format_score(adequacy.clean_gen_after)
        );
        if use_colors && adequacy.band.factor < 1.0 {
            lines.push(line.yellow().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Format nearby assets with columns: Distance, Capacity, Category, Name
pub fn format_nearby_table(assets: &[NearbyAsset], use_colors: bool) -> String {
    if assets.is_empty() {
        return "No assets found.".to_string();
    }

    assets
        .iter()
        .map(|nearby| {
            let distance = format!("{:>8}", format_distance(nearby.distance_km));
            let capacity = format!("{:>9}", format!("{:.0} MW", nearby.asset.capacity_mw));
            let category = format!("{:<13}", nearby.asset.fuel_category.label());

            if use_colors {
                let category = if nearby.asset.clean {
                    category.green().to_string()
                } else {
                    category.dimmed().to_string()
                };
                format!("{}  {}  {}  {}", distance, capacity.bold(), category, nearby.asset.name)
            } else {
                format!("{}  {}  {}  {}", distance, capacity, category, nearby.asset.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a full site evaluation (verbose, multi-section)
pub fn format_evaluation(evaluation: &SiteEvaluation, use_colors: bool) -> String {
    let mut sections = Vec::new();

    let title = format!(
        "{} (#{}) at {:.4}, {:.4}",
        evaluation.name, evaluation.node_id, evaluation.coordinates.latitude, evaluation.coordinates.longitude
    );
    if use_colors {
        sections.push(title.bold().to_string());
    } else {
        sections.push(title);
    }

    sections.push(format_breakdown(&evaluation.breakdown, use_colors));
    sections.push(format!(
        "Better than {}% of candidate sites",
        format_score(evaluation.percentile_rank)
    ));

    if !evaluation.notes.is_empty() {
        let notes = evaluation
            .notes
            .iter()
            .map(|n| format!("  - {}", n))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("Notes:\n{}", notes));
    }

    if !evaluation.alternatives.is_empty() {
        sections.push(format!(
            "Alternatives:\n{}",
            format_ranking_table(&evaluation.alternatives, use_colors)
        ));
    }

    if !evaluation.nearby_assets.is_empty() {
        sections.push(format!(
            "Nearby assets:\n{}",
            format_nearby_table(&evaluation.nearby_assets, use_colors)
        ));
    }

    sections.join("\n\n")
}

/// Format a comparison: one line per site with its delta from the best
pub fn format_comparison(comparison: &ScenarioComparison, use_colors: bool) -> String {
    let mut lines: Vec<String> = comparison
        .entries
        .iter()
        .map(|entry| {
            let score = format!("{:>7}", format_score(entry.composite_score));
            let is_best = entry.node_id == comparison.best_node_id;
            let delta = if is_best {
                "best".to_string()
            } else {
                format!("{:+.1}", entry.delta_from_best)
            };
            let delta = format!("{:>6}", delta);

            if use_colors && is_best {
                format!("{}  {}  {} (#{})", score.bold(), delta.green(), entry.name, entry.node_id)
            } else if use_colors {
                format!("{}  {}  {} (#{})", score, delta.red(), entry.name, entry.node_id)
            } else {
                format!("{}  {}  {} (#{})", score, delta, entry.name, entry.node_id)
            }
        })
        .collect();

    let (low, high) = comparison.score_range;
    lines.push(format!(
        "Range: {} - {}",
        format_score(low),
        format_score(high)
    ));
    lines.join("\n")
}
