use comfy_table::{Table, presets::UTF8_FULL};
use petal_planner::RouteOutput;

pub fn route_table(output: &RouteOutput) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["", "Route"]);

    table.add_row(vec![
        "Length".to_string(),
        format!("{:.2} km", output.length_m / 1000.0),
    ]);
    table.add_row(vec![
        "Elevation gain".to_string(),
        format!("{:.1} m", output.elevation_gain_m),
    ]);
    table.add_row(vec![
        "Hardened".to_string(),
        format!("{:.1} %", output.hardened_percentage),
    ]);
    table.add_row(vec!["Nodes".to_string(), output.path.len().to_string()]);

    for (surface, kilometers) in &output.surface_distribution {
        table.add_row(vec![format!("Surface {surface}"), format!("{kilometers:.2} km")]);
    }

    if let Some(diagnostics) = &output.diagnostics {
        table.add_row(vec![
            "Candidates".to_string(),
            format!(
                "{} leaves, {} valid, {} scored",
                diagnostics.leaves_generated,
                diagnostics.candidates_valid,
                diagnostics.candidates_scored
            ),
        ]);
        if let Some(score) = diagnostics.winning_score {
            table.add_row(vec!["Score".to_string(), format!("{:.4}", score.value())]);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use petal_planner::PlanDiagnostics;

    use super::*;

    #[test]
    fn lists_route_statistics() {
        let output = RouteOutput {
            start_node: 0,
            end_node: 0,
            path: vec![0, 1, 2, 0],
            length_m: 2013.0,
            elevation_gain_m: 24.5,
            hardened_fraction: 0.8,
            hardened_percentage: 80.0,
            surface_distribution: BTreeMap::from([
                ("asphalt".to_string(), 1.61),
                ("gravel".to_string(), 0.4),
            ]),
            edges: vec![],
            polyline: vec![],
            elevation_profile: vec![],
            diagnostics: Some(PlanDiagnostics {
                leaves_generated: 64,
                candidates_valid: 60,
                candidates_scored: 32,
                ..PlanDiagnostics::default()
            }),
        };

        let rendered = route_table(&output).to_string();
        assert!(rendered.contains("2.01 km"));
        assert!(rendered.contains("24.5 m"));
        assert!(rendered.contains("Surface gravel"));
        assert!(rendered.contains("64 leaves, 60 valid, 32 scored"));
    }
}
