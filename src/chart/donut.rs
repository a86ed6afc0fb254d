use serde::Serialize;
use tracing::trace;

use crate::core::services::SummaryService;
use crate::currency::{coerce_amount, format_currency, sum_amounts};
use crate::ledger::{Ledger, YearMonth};
use crate::utils::color::mix_muted;

use super::geometry::{arc_path, DonutLayout, Point};

/// Fill for the part of the income no category has claimed.
pub const UNALLOCATED_COLOR: &str = "#2F3940";

const MUTED_ALPHA: f64 = 0.4;
const FULL_TURN: f64 = 360.0;
const SNAP_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SegmentKind {
    Category { id: String },
    Unallocated,
}

/// One wedge of the allocation ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcSegment {
    pub kind: SegmentKind,
    pub start: f64,
    pub end: f64,
    /// CSS color, already muted for category wedges.
    pub color: String,
}

impl ArcSegment {
    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }

    pub fn category_id(&self) -> Option<&str> {
        match &self.kind {
            SegmentKind::Category { id } => Some(id),
            SegmentKind::Unallocated => None,
        }
    }

    pub fn contains_angle(&self, angle: f64) -> bool {
        angle >= self.start && angle < self.end
    }

    pub fn path(&self, layout: &DonutLayout) -> String {
        arc_path(layout.center, layout.radius, self.start, self.end)
    }
}

/// Bright sub-arc inside a category wedge showing spend against budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressArc {
    pub category_id: String,
    pub start: f64,
    pub end: f64,
    pub color: String,
    /// `min(spent, budget) / budget`.
    pub fraction: f64,
}

impl ProgressArc {
    pub fn path(&self, layout: &DonutLayout) -> String {
        arc_path(layout.center, layout.radius, self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Positive,
    Negative,
}

/// Remaining income printed in the hole of the donut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterLabel {
    pub remaining: f64,
    pub text: String,
    pub tone: Tone,
}

impl CenterLabel {
    pub fn new(remaining: f64, symbol: &str) -> Self {
        let tone = if remaining >= 0.0 {
            Tone::Positive
        } else {
            Tone::Negative
        };
        Self {
            remaining,
            text: format_currency(remaining, symbol),
            tone,
        }
    }
}

/// Detail shown when a category is tapped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInspection {
    pub category_id: String,
    pub name: String,
    pub spent: f64,
    pub budget: f64,
    /// `budget - spent`.
    pub difference: f64,
    pub over: bool,
}

/// The allocation ring, its progress overlay and the center label for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutChart {
    pub month: YearMonth,
    pub layout: DonutLayout,
    pub segments: Vec<ArcSegment>,
    pub progress: Vec<ProgressArc>,
    pub center: CenterLabel,
}

impl DonutChart {
    pub fn for_month(ledger: &Ledger, month: YearMonth, layout: DonutLayout) -> Self {
        let income = coerce_amount(ledger.income());
        let remaining = SummaryService::remaining(ledger, month);
        let mut chart = Self {
            month,
            layout,
            segments: Vec::new(),
            progress: Vec::new(),
            center: CenterLabel::new(remaining, "$"),
        };

        if income <= 0.0 {
            chart.segments.push(unallocated(0.0));
            return chart;
        }

        // Budgets above income (income lowered after budgeting) are scaled to fill the ring.
        let budgeted = sum_amounts(ledger.categories.iter().map(|category| category.budget));
        let denominator = income.max(budgeted);

        let mut covered = 0.0;
        for category in &ledger.categories {
            let budget = coerce_amount(category.budget);
            let share = budget / denominator;
            if share <= 0.0 {
                continue;
            }
            let start = covered * FULL_TURN;
            covered += share;
            let segment = ArcSegment {
                kind: SegmentKind::Category {
                    id: category.id.clone(),
                },
                start,
                end: covered * FULL_TURN,
                color: mix_muted(&category.color, MUTED_ALPHA).to_string(),
            };

            let spent = SummaryService::spent_by_category(ledger, &category.id, month);
            let fraction = (spent.min(budget) / budget).clamp(0.0, 1.0);
            if fraction > 0.0 {
                chart.progress.push(ProgressArc {
                    category_id: category.id.clone(),
                    start: segment.start,
                    end: segment.start + segment.sweep() * fraction,
                    color: category.color.clone(),
                    fraction,
                });
            }
            chart.segments.push(segment);
        }

        if 1.0 - covered > SNAP_EPSILON {
            chart.segments.push(unallocated(covered * FULL_TURN));
        } else if let Some(last) = chart.segments.last_mut() {
            let stretch = FULL_TURN - last.end;
            last.end = FULL_TURN;
            if let Some(arc) = chart
                .progress
                .last_mut()
                .filter(|arc| arc.fraction >= 1.0 && Some(arc.category_id.as_str()) == last.category_id())
            {
                arc.end += stretch;
            }
        }
        trace!(%month, segments = chart.segments.len(), "donut computed");
        chart
    }

    /// Re-renders the center label with another currency symbol.
    pub fn with_currency(mut self, symbol: &str) -> Self {
        self.center = CenterLabel::new(self.center.remaining, symbol);
        self
    }

    /// Sum of all wedge sweeps; always a full turn.
    pub fn total_sweep(&self) -> f64 {
        self.segments.iter().map(ArcSegment::sweep).sum()
    }

    /// Wedge under a pointer position, if the pointer is on the ring band.
    pub fn hit_test(&self, point: Point) -> Option<&ArcSegment> {
        if !self.layout.band_contains(point) {
            return None;
        }
        let angle = self.layout.angle_of(point);
        self.segments
            .iter()
            .find(|segment| segment.contains_angle(angle))
    }

    /// Spend details for one category in `month`; `None` for unknown ids.
    pub fn inspect_category(
        ledger: &Ledger,
        category_id: &str,
        month: YearMonth,
    ) -> Option<CategoryInspection> {
        let category = ledger.category(category_id)?;
        let spent = SummaryService::spent_by_category(ledger, category_id, month);
        Some(CategoryInspection {
            category_id: category.id.clone(),
            name: category.name.clone(),
            spent,
            budget: category.budget,
            difference: category.budget - spent,
            over: spent > category.budget,
        })
    }
}

fn unallocated(start: f64) -> ArcSegment {
    ArcSegment {
        kind: SegmentKind::Unallocated,
        start,
        end: FULL_TURN,
        color: UNALLOCATED_COLOR.to_string(),
    }
}
