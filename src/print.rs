use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use crate::engine::{BatchOutcome, ProjectionRecord};

pub fn tabulate_projections(records: &[ProjectionRecord]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(24)).with(Left)),
            Col::new(Styles::default().with(MinWidth(11)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Fixture".into(),
                "Score".into(),
                "1".into(),
                "X".into(),
                "2".into(),
                "O2.5".into(),
                "BTTS".into(),
                "Corners".into(),
                "Shots".into(),
            ],
        ));
    for record in records {
        let result = &record.result;
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{} vs {}", record.home, record.away).into(),
                format!("{:.2}–{:.2}", result.home_score, result.away_score).into(),
                format!("{:.1}%", result.home_win_pct).into(),
                format!("{:.1}%", result.draw_pct).into(),
                format!("{:.1}%", result.away_win_pct).into(),
                format!("{:.1}%", result.over_2_5_pct).into(),
                format!("{:.1}%", result.btts_pct).into(),
                format!("{:.2}", result.total_corners).into(),
                format!("{:.2}", result.total_shots).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_failures(outcome: &BatchOutcome) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(14)).with(Left)),
            Col::new(Styles::default().with(MinWidth(40)).with(Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Fixture".into(), "Reason".into()],
        ));
    for failure in &outcome.failures {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!(
                    "{} vs {}",
                    failure.fixture.home_id, failure.fixture.away_id
                )
                .into(),
                failure.error.to_string().into(),
            ],
        ));
    }
    table
}
