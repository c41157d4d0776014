//! Terminal rendering for assessments and reference tables.

use aqi_core::{
    aqi_scale, scale_position, AqiCategory, Assessment, LinearModel, Location, Pollutant,
    PollutantReading, SCALE_AXIS_MAX,
};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

/// Width of the text scale bar in columns.
const BAR_WIDTH: usize = 60;

fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn cell_color(category: AqiCategory) -> Color {
    match category {
        AqiCategory::Good => Color::Green,
        AqiCategory::Moderate => Color::Yellow,
        AqiCategory::UnhealthyForSensitiveGroups => Color::DarkYellow,
        AqiCategory::Unhealthy => Color::Red,
        AqiCategory::VeryUnhealthy => Color::Magenta,
        AqiCategory::Hazardous => Color::DarkRed,
    }
}

/// Machine-readable assessment output.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub location: Option<&'a str>,
    pub readings: &'a PollutantReading,
    #[serde(flatten)]
    pub assessment: &'a Assessment,
    pub color: &'static str,
    pub message: &'static str,
    pub advisory: String,
    pub physically_plausible: bool,
}

impl<'a> Report<'a> {
    pub fn new(
        reading: &'a PollutantReading,
        assessment: &'a Assessment,
        location: Option<&'a Location>,
    ) -> Self {
        Self {
            location: location.map(|l| l.display_name()),
            readings: reading,
            assessment,
            color: assessment.category.color().token(),
            message: assessment.message(),
            advisory: assessment.advisory(location),
            physically_plausible: assessment.is_physically_plausible(),
        }
    }
}

/// Human-readable assessment.
pub fn assessment_text(assessment: &Assessment, location: Option<&Location>) -> String {
    let mut out = String::new();
    if let Some(location) = location {
        out.push_str(&format!("Location:      {location}\n"));
    }
    out.push_str(&format!(
        "Predicted PM2.5: {:.2} µg/m³\n",
        assessment.estimate
    ));
    out.push_str(&format!(
        "AQI category:  {} ({})\n",
        assessment.category,
        assessment.category.color().token()
    ));
    out.push_str(&format!("               {}\n", assessment.message()));
    if !assessment.is_physically_plausible() {
        out.push_str("Note:          the model predicted a negative concentration\n");
    }
    out.push('\n');
    out.push_str(&scale_bar(Some(assessment.estimate)));
    out.push('\n');
    out.push_str(&format!(
        "[{}] {}\n",
        assessment.alert_tier,
        assessment.advisory(location)
    ));
    out
}

/// One-character code per category, used in the scale bar.
fn band_char(category: AqiCategory) -> char {
    match category {
        AqiCategory::Good => 'G',
        AqiCategory::Moderate => 'M',
        AqiCategory::UnhealthyForSensitiveGroups => 'S',
        AqiCategory::Unhealthy => 'U',
        AqiCategory::VeryUnhealthy => 'V',
        AqiCategory::Hazardous => 'H',
    }
}

/// Text bar over `0..=SCALE_AXIS_MAX` with an optional marker line.
pub fn scale_bar(mark: Option<f64>) -> String {
    let bands = aqi_scale();
    let bar: String = (0..BAR_WIDTH)
        .map(|i| {
            let value = (i as f64 + 0.5) / BAR_WIDTH as f64 * SCALE_AXIS_MAX;
            let category = bands
                .iter()
                .find(|b| value <= b.display_upper())
                .map(|b| b.category)
                .unwrap_or(AqiCategory::Hazardous);
            band_char(category)
        })
        .collect();

    let mut out = format!("0 {bar} {SCALE_AXIS_MAX:.0}\n");
    if let Some(pm25) = mark {
        let column = ((scale_position(pm25) * BAR_WIDTH as f64) as usize).min(BAR_WIDTH - 1);
        out.push_str(&format!(
            "  {}^ {:.1}\n",
            " ".repeat(column),
            pm25
        ));
    }
    out
}

/// Table of AQI bands.
pub fn scale_table() -> Table {
    let mut table = table();
    table.set_header(vec!["Rank", "Category", "PM2.5 (µg/m³)", "Color", "Alert"]);
    for band in aqi_scale() {
        let range = match band.upper {
            Some(upper) if band.lower == 0.0 => format!("≤ {upper}"),
            Some(upper) => format!("{} – {}", band.lower, upper),
            None => format!("> {}", band.lower),
        };
        table.add_row(vec![
            Cell::new(band.category.severity_rank()),
            Cell::new(band.category.name()).fg(cell_color(band.category)),
            Cell::new(range),
            Cell::new(band.category.color().token()),
            Cell::new(band.category.alert_tier()),
        ]);
    }
    table
}

/// Table of model inputs.
pub fn pollutant_table() -> Table {
    let mut table = table();
    table.set_header(vec!["#", "Feature", "Name", "Unit", "Default", "Typical max", "Notes"]);
    for p in Pollutant::ALL {
        table.add_row(vec![
            Cell::new(p.index()),
            Cell::new(p.name()),
            Cell::new(p.label()),
            Cell::new(p.unit()),
            Cell::new(p.default_value()),
            Cell::new(p.typical_max()),
            Cell::new(p.description()),
        ]);
    }
    table
}

/// Table of model coefficients.
pub fn model_table(model: &LinearModel) -> Table {
    let mut table = table();
    table.set_header(vec!["Feature", "Unit", "Coefficient"]);
    for p in Pollutant::ALL {
        table.add_row(vec![
            Cell::new(p.name()),
            Cell::new(p.unit()),
            Cell::new(format!("{:+.4}", model.coefficient(p))),
        ]);
    }
    table.add_row(vec![
        Cell::new("(intercept)"),
        Cell::new(""),
        Cell::new(format!("{:+.4}", model.intercept())),
    ]);
    table
}
