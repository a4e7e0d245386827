//! Shot summary: attempts, makes and FG% overall and by court zone

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{
    BASELINE_Y, CORNER_THREE_HEIGHT, CORNER_THREE_X, INNER_BOX_WIDTH, OUTER_BOX_WIDTH, PAINT_HEIGHT,
    RESTRICTED_DIAMETER, THREE_POINT_DIAMETER,
};
use crate::error::{Result, ShotChartError};
use crate::shots::CourtPoint;

/// Court zones, checked in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    RestrictedArea,
    Paint,
    MidRange,
    CornerThree,
    AboveBreakThree,
}

impl Zone {
    pub const ALL: [Zone; 5] = [
        Zone::RestrictedArea,
        Zone::Paint,
        Zone::MidRange,
        Zone::CornerThree,
        Zone::AboveBreakThree,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Zone::RestrictedArea => "Restricted area",
            Zone::Paint => "Paint",
            Zone::MidRange => "Mid-range",
            Zone::CornerThree => "Corner 3",
            Zone::AboveBreakThree => "Above the break 3",
        }
    }

    pub fn is_three(&self) -> bool {
        matches!(self, Zone::CornerThree | Zone::AboveBreakThree)
    }

    /// Classify a point in court units
    pub fn classify(x: f64, y: f64) -> Zone {
        let dist = x.hypot(y);
        if dist <= RESTRICTED_DIAMETER / 2.0 {
            return Zone::RestrictedArea;
        }
        // Corner three: outside the straight sideline segment, below where it meets the arc
        let corner_top = BASELINE_Y + CORNER_THREE_HEIGHT;
        if x.abs() >= CORNER_THREE_X && y <= corner_top {
            return Zone::CornerThree;
        }
        if y > corner_top && dist >= THREE_POINT_DIAMETER / 2.0 {
            return Zone::AboveBreakThree;
        }
        let paint_half = OUTER_BOX_WIDTH.max(INNER_BOX_WIDTH) / 2.0;
        if x.abs() <= paint_half && y <= BASELINE_Y + PAINT_HEIGHT {
            return Zone::Paint;
        }
        Zone::MidRange
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ShotLine {
    pub attempts: usize,
    pub makes: usize,
}

impl ShotLine {
    fn add(&mut self, made: bool) {
        self.attempts += 1;
        if made {
            self.makes += 1;
        }
    }

    /// Field goal percentage, 0 when there were no attempts
    pub fn fg_pct(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.makes as f64 / self.attempts as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneLine {
    pub zone: Zone,
    pub attempts: usize,
    pub makes: usize,
    pub fg_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotSummary {
    pub label: String,
    pub generated_at: DateTime<Utc>,
    pub attempts: usize,
    pub makes: usize,
    pub fg_pct: f64,
    /// Effective FG%: threes count one and a half makes
    pub efg_pct: f64,
    pub zones: Vec<ZoneLine>,
}

impl ShotSummary {
    pub fn from_points(label: impl Into<String>, points: &[CourtPoint]) -> Self {
        let mut total = ShotLine::default();
        let mut zones = [ShotLine::default(); Zone::ALL.len()];
        let mut three_makes = 0usize;

        for p in points {
            let zone = Zone::classify(p.x, p.y);
            total.add(p.made);
            zones[zone as usize].add(p.made);
            if p.made && zone.is_three() {
                three_makes += 1;
            }
        }

        let efg_pct = if total.attempts == 0 {
            0.0
        } else {
            (total.makes as f64 + 0.5 * three_makes as f64) / total.attempts as f64 * 100.0
        };

        Self {
            label: label.into(),
            generated_at: Utc::now(),
            attempts: total.attempts,
            makes: total.makes,
            fg_pct: total.fg_pct(),
            efg_pct,
            zones: Zone::ALL
                .iter()
                .map(|&zone| {
                    let line = zones[zone as usize];
                    ZoneLine {
                        zone,
                        attempts: line.attempts,
                        makes: line.makes,
                        fg_pct: line.fg_pct(),
                    }
                })
                .collect(),
        }
    }

    pub fn zone(&self, zone: Zone) -> Option<&ZoneLine> {
        self.zones.iter().find(|z| z.zone == zone)
    }

    /// One-line subtitle for the chart band
    pub fn subtitle(&self) -> String {
        format!(
            "{}/{} FG ({:.1}%)  eFG {:.1}%",
            self.makes, self.attempts, self.fg_pct, self.efg_pct
        )
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ShotChartError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn print(&self) {
        println!();
        println!("  {}", self.label);
        println!("  {}", self.subtitle());
        println!();
        println!("  {:<20} {:>5} {:>5} {:>7}", "Zone", "FGM", "FGA", "FG%");
        for z in &self.zones {
            if z.attempts == 0 {
                continue;
            }
            println!(
                "  {:<20} {:>5} {:>5} {:>6.1}%",
                z.zone.label(),
                z.makes,
                z.attempts,
                z.fg_pct
            );
        }
    }
}
