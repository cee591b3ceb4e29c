use chrono::{Duration, NaiveDateTime};
use dioxus::prelude::*;

use crate::time_codec::{decode, to_input_value, TimeRange, WireRange};

// ── Presets ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeriodPreset {
    Hour1,
    Hours6,
    Hours24,
    Days7,
    Days30,
}

impl PeriodPreset {
    pub const ALL: [Self; 5] = [
        Self::Hour1,
        Self::Hours6,
        Self::Hours24,
        Self::Days7,
        Self::Days30,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Hour1 => "1h",
            Self::Hours6 => "6h",
            Self::Hours24 => "24h",
            Self::Days7 => "7d",
            Self::Days30 => "30d",
        }
    }

    pub fn hours(self) -> i64 {
        match self {
            Self::Hour1 => 1,
            Self::Hours6 => 6,
            Self::Hours24 => 24,
            Self::Days7 => 168,
            Self::Days30 => 720,
        }
    }

    /// `[now - duration, now]`, resolved at selection time
    pub fn window_at(self, now: NaiveDateTime) -> TimeRange {
        TimeRange::ending_at(now, Duration::hours(self.hours()))
    }
}

// ── Selection model ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    #[error("Invalid start time: {0}")]
    InvalidFrom(String),
    #[error("Invalid end time: {0}")]
    InvalidTo(String),
    #[error("Start must not be after end")]
    Inverted,
}

/// Preset highlight plus the two custom `datetime-local` inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodSelection {
    pub active_preset: Option<PeriodPreset>,
    pub custom_from: String,
    pub custom_to: String,
    pub custom_error: Option<String>,
}

impl PeriodSelection {
    /// Selection and window a view mounts with: the preset is highlighted and
    /// the custom inputs carry the same window, so applying them unedited
    /// reproduces it at minute precision.
    pub fn initial(preset: PeriodPreset, now: NaiveDateTime) -> (Self, WireRange) {
        let mut selection = Self {
            active_preset: None,
            custom_from: String::new(),
            custom_to: String::new(),
            custom_error: None,
        };
        let window = selection.select_preset(preset, now);
        (selection, window)
    }

    pub fn select_preset(&mut self, preset: PeriodPreset, now: NaiveDateTime) -> WireRange {
        let range = preset.window_at(now);
        self.active_preset = Some(preset);
        self.custom_from = to_input_value(range.from);
        self.custom_to = to_input_value(range.to);
        self.custom_error = None;
        range.encode()
    }

    /// On failure the previous window stays in effect and the error is kept
    /// for display; the preset highlight is untouched.
    pub fn apply_custom(&mut self) -> Result<WireRange, PeriodError> {
        match self.parse_custom() {
            Ok(range) => {
                self.active_preset = None;
                self.custom_error = None;
                Ok(range.encode())
            }
            Err(err) => {
                self.custom_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn parse_custom(&self) -> Result<TimeRange, PeriodError> {
        let from = decode(&self.custom_from)
            .map_err(|_| PeriodError::InvalidFrom(self.custom_from.clone()))?;
        let to =
            decode(&self.custom_to).map_err(|_| PeriodError::InvalidTo(self.custom_to.clone()))?;
        if from > to {
            return Err(PeriodError::Inverted);
        }
        Ok(TimeRange { from, to })
    }
}

// ── PeriodSelector component ─────────────────────────────────────────────────

/// Emits already-encoded windows; never talks to the network itself.
#[component]
pub fn PeriodSelector(
    initial: PeriodSelection,
    on_apply: EventHandler<WireRange>,
) -> Element {
    let mut selection = use_signal(|| initial.clone());
    let current = selection();

    rsx! {
        div {
            class: "period-picker",
            for preset in PeriodPreset::ALL {
                button {
                    class: if current.active_preset == Some(preset) {
                        "period-btn active"
                    } else {
                        "period-btn"
                    },
                    onclick: move |_| {
                        let window = selection
                            .write()
                            .select_preset(preset, crate::time_codec::now_local());
                        on_apply.call(window);
                    },
                    "{preset.label()}"
                }
            }
            div {
                class: "period-custom",
                input {
                    r#type: "datetime-local",
                    value: "{current.custom_from}",
                    oninput: move |e| selection.write().custom_from = e.value(),
                }
                span { "~" }
                input {
                    r#type: "datetime-local",
                    value: "{current.custom_to}",
                    oninput: move |e| selection.write().custom_to = e.value(),
                }
                button {
                    class: "search-btn",
                    onclick: move |_| {
                        let applied = selection.write().apply_custom();
                        match applied {
                            Ok(window) => on_apply.call(window),
                            Err(err) => {
                                dioxus_logger::tracing::warn!("Rejected custom period: {}", err);
                            }
                        }
                    },
                    "Apply"
                }
            }
            if let Some(message) = current.custom_error.as_ref() {
                span { class: "period-error", "{message}" }
            }
        }
    }
}
