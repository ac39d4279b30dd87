use crate::metrics::StatSnapshot;

/// Renders the end-of-run report, one block per stream. Layout follows the
/// fixed-width table the tool has always printed.
pub(crate) fn report_lines(total: &StatSnapshot, success: &StatSnapshot) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("======== response times statistic ========".to_owned());
    lines.push(format!("Total requests: {:5}", total.count));
    lines.push(format!("        lowest: {}", format_seconds(total.min)));
    lines.push(format!("       highest: {}", format_seconds(total.max)));
    lines.push(format!("          mean: {}", format_mean(total)));
    lines.push(format!(
        "       success: {:5} ~ {:6.2} %",
        success.count,
        percent(success.count, total.count)
    ));
    for (name, matches) in &total.predicate_counts {
        lines.push(format!(
            "{:>14}: {:5} ~ {:6.2} %",
            name,
            matches,
            percent(*matches, total.count)
        ));
    }

    lines.push(String::new());
    lines.push(format!("Success requests: {:5}", success.count));
    lines.push(format!("          lowest: {}", format_seconds(success.min)));
    lines.push(format!("         highest: {}", format_seconds(success.max)));
    lines.push(format!("            mean: {}", format_mean(success)));
    for (name, matches) in &success.predicate_counts {
        lines.push(format!(
            "{:>16}: {:5} ~ {:6.2} %",
            name,
            matches,
            percent(*matches, success.count)
        ));
    }

    lines
}

fn format_seconds(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:11.5}s", value),
        None => format!("{:>12}", "n/a"),
    }
}

fn format_mean(snapshot: &StatSnapshot) -> String {
    match snapshot.mean() {
        Ok(mean) => format!("{:11.5}s", mean),
        Err(_) => format!("{:>12}", "n/a"),
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}
