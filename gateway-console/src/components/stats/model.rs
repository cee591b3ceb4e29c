use std::cmp::Ordering;

use shared_types::StatRow;

use crate::api::ApiError;
use crate::lifecycle::RenderSlot;

use super::chart::PercentileChart;

// ── Columns ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatColumn {
    Path,
    Count,
    ErrorRate,
    Avg,
    Min,
    Max,
    P30,
    P50,
    P75,
    P90,
    P95,
    P99,
}

impl StatColumn {
    pub const ALL: [Self; 12] = [
        Self::Path,
        Self::Count,
        Self::ErrorRate,
        Self::Avg,
        Self::Min,
        Self::Max,
        Self::P30,
        Self::P50,
        Self::P75,
        Self::P90,
        Self::P95,
        Self::P99,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Path => "Path",
            Self::Count => "Count",
            Self::ErrorRate => "Error Rate",
            Self::Avg => "Avg",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::P30 => "P30",
            Self::P50 => "P50",
            Self::P75 => "P75",
            Self::P90 => "P90",
            Self::P95 => "P95",
            Self::P99 => "P99",
        }
    }

    fn sort_key(self, row: &StatRow) -> SortKey<'_> {
        let number = |value: Option<i64>| SortKey::Number(value.unwrap_or(0) as f64);
        match self {
            Self::Path => SortKey::Text(&row.path),
            Self::Count => number(row.count),
            Self::ErrorRate => SortKey::Number(row.error_rate.unwrap_or(0.0)),
            Self::Avg => number(row.avg),
            Self::Min => number(row.min),
            Self::Max => number(row.max),
            Self::P30 => number(row.p30),
            Self::P50 => number(row.p50),
            Self::P75 => number(row.p75),
            Self::P90 => number(row.p90),
            Self::P95 => number(row.p95),
            Self::P99 => number(row.p99),
        }
    }
}

enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
}

impl SortKey<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
        }
    }
}

// ── Sorting ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: StatColumn,
    pub ascending: bool,
}

impl Default for SortState {
    /// Busiest paths first
    fn default() -> Self {
        Self {
            column: StatColumn::Count,
            ascending: false,
        }
    }
}

impl SortState {
    /// Same column flips direction, a different column starts ascending.
    pub fn toggle(self, column: StatColumn) -> Self {
        if self.column == column {
            Self {
                column,
                ascending: !self.ascending,
            }
        } else {
            Self {
                column,
                ascending: true,
            }
        }
    }

    pub fn indicator(self, column: StatColumn) -> &'static str {
        match (self.column == column, self.ascending) {
            (false, _) => "",
            (true, true) => "\u{25B2}",
            (true, false) => "\u{25BC}",
        }
    }
}

/// Missing numbers sort as 0. Ties break on path ascending regardless of
/// direction, so equal keys render in the same order on every pass.
pub fn sort_rows(rows: &[StatRow], sort: SortState) -> Vec<StatRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let primary = sort.column.sort_key(a).compare(&sort.column.sort_key(b));
        let primary = if sort.ascending {
            primary
        } else {
            primary.reverse()
        };
        primary.then_with(|| a.path.cmp(&b.path))
    });
    sorted
}

// ── Table model ──────────────────────────────────────────────────────────────

/// Rows in fetch order plus the current sorted projection and selection.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsTable {
    rows: Vec<StatRow>,
    sorted: Vec<StatRow>,
    sort: SortState,
    selected: usize,
}

impl StatsTable {
    pub fn new(rows: Vec<StatRow>, sort: SortState) -> Self {
        let sorted = sort_rows(&rows, sort);
        Self {
            rows,
            sorted,
            sort,
            selected: 0,
        }
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn sorted(&self) -> &[StatRow] {
        &self.sorted
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&StatRow> {
        self.sorted.get(self.selected)
    }

    /// Re-sort and fall back to the first row of the new order.
    fn sort_by(&mut self, column: StatColumn) {
        self.sort = self.sort.toggle(column);
        self.sorted = sort_rows(&self.rows, self.sort);
        self.selected = 0;
    }

    fn select(&mut self, index: usize) -> bool {
        if index >= self.sorted.len() {
            return false;
        }
        self.selected = index;
        true
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatsState {
    Loading,
    Failed(String),
    Empty,
    Loaded(StatsTable),
}

// ── Panel (table + chart) ────────────────────────────────────────────────────

/// Everything one stats view owns for its lifetime.
#[derive(Debug)]
pub struct StatsPanel {
    pub state: StatsState,
    pub chart: RenderSlot<PercentileChart>,
    sort: SortState,
}

impl Default for StatsPanel {
    fn default() -> Self {
        Self {
            state: StatsState::Loading,
            chart: RenderSlot::new(),
            sort: SortState::default(),
        }
    }
}

impl StatsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) {
        self.state = StatsState::Loading;
    }

    /// Build the next state completely, then swap it in and redraw.
    pub fn apply_fetch(&mut self, result: Result<Vec<StatRow>, ApiError>) {
        let next = match result {
            Ok(rows) if rows.is_empty() => StatsState::Empty,
            Ok(rows) => StatsState::Loaded(StatsTable::new(rows, self.sort)),
            Err(err) => {
                dioxus_logger::tracing::error!("Failed to load stats: {}", err);
                StatsState::Failed(err.user_message("Failed to load stats"))
            }
        };
        self.state = next;
        self.redraw_chart();
    }

    pub fn sort_by(&mut self, column: StatColumn) {
        if let StatsState::Loaded(table) = &mut self.state {
            table.sort_by(column);
            self.sort = table.sort();
            self.redraw_chart();
        }
    }

    pub fn select(&mut self, index: usize) {
        if let StatsState::Loaded(table) = &mut self.state {
            if table.select(index) {
                self.redraw_chart();
            }
        }
    }

    fn redraw_chart(&mut self) {
        match &self.state {
            StatsState::Loaded(table) => match table.selected_row() {
                Some(row) => {
                    self.chart.mount(PercentileChart::from_row(row));
                }
                None => self.chart.clear(),
            },
            _ => self.chart.clear(),
        }
    }
}
