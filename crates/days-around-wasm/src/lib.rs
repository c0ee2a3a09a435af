//! WASM bindings for days-around.
//!
//! Exposes day-window generation and swimlane layout to the JavaScript
//! rendering layer via `wasm-bindgen`. All complex types are passed as JSON
//! strings. Each export is a thin wrapper over a plain Rust function returning
//! `Result<String, String>`, so the JSON contract is testable off-wasm.
//!
//! The caller's grouping function cannot cross the boundary, so events arrive
//! already labelled: `{id, start, end, label}`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p days-around-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/days-around-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/days_around_wasm.wasm
//! ```

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use days_around::{ConcreteEvent, DayColumn, DayWindow, GroupedDays, Scheduled, Swimlane};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DayColumnDto {
    index: usize,
    offset: i64,
    date: String,
    key: String,
    alternate: bool,
}

impl From<&DayColumn<Tz>> for DayColumnDto {
    fn from(c: &DayColumn<Tz>) -> Self {
        Self {
            index: c.index,
            offset: c.offset,
            date: c.date.to_rfc3339(),
            key: c.key.clone(),
            alternate: c.alternate,
        }
    }
}

#[derive(Serialize)]
struct EventDto {
    id: String,
    start: String,
    end: String,
}

#[derive(Serialize)]
struct SwimlaneDto {
    label: String,
    events: Vec<EventDto>,
}

impl From<&Swimlane<'_, LabelledEvent>> for SwimlaneDto {
    fn from(lane: &Swimlane<'_, LabelledEvent>) -> Self {
        Self {
            label: lane.label().to_string(),
            events: lane
                .iter()
                .map(|e| EventDto {
                    id: e.event.id().to_string(),
                    start: e.event.start().to_rfc3339(),
                    end: e.event.end().to_rfc3339(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct GroupedDaysDto {
    columns: Vec<DayColumnDto>,
    swimlanes: Vec<SwimlaneDto>,
    /// Event id → swimlane index.
    lanes: BTreeMap<String, usize>,
}

/// Input format for events passed from JavaScript.
#[derive(Deserialize)]
struct EventInput {
    id: String,
    start: String,
    end: String,
    label: String,
}

/// Request body for [`layout_grouped_days`].
#[derive(Deserialize)]
struct GroupedDaysRequest {
    date: String,
    timezone: String,
    #[serde(default)]
    before: i64,
    #[serde(default)]
    after: i64,
    #[serde(default)]
    events: Vec<EventInput>,
}

/// An event paired with the label JavaScript assigned to it.
struct LabelledEvent {
    label: String,
    event: ConcreteEvent,
}

impl Scheduled for LabelledEvent {
    fn start(&self) -> DateTime<Utc> {
        self.event.start()
    }

    fn end(&self) -> DateTime<Utc> {
        self.event.end()
    }
}

fn label_of(e: &LabelledEvent) -> String {
    e.label.clone()
}

// ---------------------------------------------------------------------------
// Helpers: parsing and JSON plumbing
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string as an instant in `tz`.
///
/// Accepts RFC 3339 (with offset) and naive local time
/// (e.g. "2000-12-31T23:59:59"), which is read as wall-clock time in `tz`.
fn parse_datetime_in<T: TimeZone>(s: &str, tz: &T) -> Result<DateTime<T>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(tz));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| format!("Datetime '{}' does not exist in the requested timezone", s))
}

/// Parse labelled events, rejecting repeated ids: the grouped layout reports
/// lanes per id, so a repeated id would hide one event's lane.
fn parse_events(inputs: Vec<EventInput>) -> Result<Vec<LabelledEvent>, String> {
    let mut seen = HashSet::new();
    inputs
        .into_iter()
        .map(|input| {
            if !seen.insert(input.id.clone()) {
                return Err(format!("Duplicate event id '{}'", input.id));
            }
            let start = parse_datetime_in(&input.start, &Utc)?;
            let end = parse_datetime_in(&input.end, &Utc)?;
            let event = ConcreteEvent::new(input.id, start, end).map_err(|e| e.to_string())?;
            Ok(LabelledEvent {
                label: input.label,
                event,
            })
        })
        .collect()
}

fn parse_events_json(json: &str) -> Result<Vec<LabelledEvent>, String> {
    let inputs: Vec<EventInput> =
        serde_json::from_str(json).map_err(|e| format!("Invalid events JSON: {}", e))?;
    parse_events(inputs)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn focal_in(date: &str, timezone: &str) -> Result<DateTime<Tz>, String> {
    let tz = days_around::parse_timezone(timezone).map_err(|e| e.to_string())?;
    parse_datetime_in(date, &tz)
}

fn day_window(before: i64, after: i64) -> Result<DayWindow, String> {
    DayWindow::new(before, after).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// Plain-Rust entry points
// ---------------------------------------------------------------------------

fn day_window_json(date: &str, timezone: &str, before: i64, after: i64) -> Result<String, String> {
    let focal = focal_in(date, timezone)?;
    let columns = days_around::day_columns(&focal, day_window(before, after)?)
        .map_err(|e| e.to_string())?;

    let dtos: Vec<DayColumnDto> = columns.iter().map(DayColumnDto::from).collect();
    to_json(&dtos)
}

fn swimlanes_json(events_json: &str) -> Result<String, String> {
    let events = parse_events_json(events_json)?;
    let lanes = days_around::calculate_swimlanes(&events, label_of);

    let dtos: Vec<SwimlaneDto> = lanes.iter().map(SwimlaneDto::from).collect();
    to_json(&dtos)
}

fn grouped_days_json(request_json: &str) -> Result<String, String> {
    let request: GroupedDaysRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid request JSON: {}", e))?;
    let focal = focal_in(&request.date, &request.timezone)?;
    let window = day_window(request.before, request.after)?;
    let events = parse_events(request.events)?;

    let grouped =
        GroupedDays::compute(&focal, window, &events, label_of).map_err(|e| e.to_string())?;

    let mut lanes = BTreeMap::new();
    for labelled in &events {
        let position = grouped.position_of(labelled).map_err(|e| e.to_string())?;
        lanes.insert(labelled.event.id().to_string(), position);
    }

    to_json(&GroupedDaysDto {
        columns: grouped.columns().iter().map(DayColumnDto::from).collect(),
        swimlanes: grouped.swimlanes().iter().map(SwimlaneDto::from).collect(),
        lanes,
    })
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate the day columns around a focal date.
///
/// Returns a JSON array of `{index, offset, date, key, alternate}` objects,
/// where `date` is the civil midnight in `timezone` (RFC 3339) and `key` its
/// UTC ISO string.
///
/// # Arguments
/// - `date` -- Focal datetime (RFC 3339, or naive local time in `timezone`)
/// - `timezone` -- IANA timezone (e.g., "Europe/Madrid")
/// - `before` -- Days to show before the focal day (non-negative)
/// - `after` -- Days to show after the focal day (non-negative)
#[wasm_bindgen(js_name = "generateDayWindow")]
pub fn generate_day_window(
    date: &str,
    timezone: &str,
    before: i32,
    after: i32,
) -> Result<String, JsValue> {
    day_window_json(date, timezone, i64::from(before), i64::from(after))
        .map_err(|e| JsValue::from_str(&e))
}

/// Partition labelled events into swimlanes.
///
/// `events_json` must be a JSON array of `{id, start, end, label}` objects
/// with distinct ids.
/// Returns a JSON array of `{label, events: [{id, start, end}]}` in
/// first-occurrence order of the labels.
#[wasm_bindgen(js_name = "calculateSwimlanes")]
pub fn calculate_swimlanes(events_json: &str) -> Result<String, JsValue> {
    swimlanes_json(events_json).map_err(|e| JsValue::from_str(&e))
}

/// Compute day columns and the shared swimlane layout in one call.
///
/// `request_json` is `{date, timezone, before?, after?, events?}`; event ids
/// must be distinct. Returns
/// `{columns, swimlanes, lanes}` where `lanes` maps each event id to its
/// swimlane index.
#[wasm_bindgen(js_name = "layoutGroupedDays")]
pub fn layout_grouped_days(request_json: &str) -> Result<String, JsValue> {
    grouped_days_json(request_json).map_err(|e| JsValue::from_str(&e))
}

/// Whether the day column at `index` takes the alternate stripe.
#[wasm_bindgen(js_name = "isAlternate")]
pub fn is_alternate(index: u32) -> bool {
    days_around::is_alternate(index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn day_window_around_new_year() {
        let json = day_window_json("2000-12-31T12:00:00Z", "UTC", 2, 2).unwrap();
        let columns: Value = serde_json::from_str(&json).unwrap();

        let keys: Vec<&str> = columns
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["key"].as_str().unwrap())
            .collect();
        assert_eq!(
            keys,
            vec![
                "2000-12-29T00:00:00.000Z",
                "2000-12-30T00:00:00.000Z",
                "2000-12-31T00:00:00.000Z",
                "2001-01-01T00:00:00.000Z",
                "2001-01-02T00:00:00.000Z",
            ]
        );
        assert_eq!(columns[0]["alternate"], false);
        assert_eq!(columns[1]["alternate"], true);
        assert_eq!(columns[2]["offset"], 0);
    }

    #[test]
    fn naive_focal_date_is_local_to_timezone() {
        let json = day_window_json("2001-01-01T00:30:00", "Europe/Madrid", 0, 0).unwrap();
        let columns: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(columns[0]["date"], "2001-01-01T00:00:00+01:00");
        assert_eq!(columns[0]["key"], "2000-12-31T23:00:00.000Z");
    }

    #[test]
    fn negative_window_is_rejected() {
        let err = day_window_json("2000-12-31T12:00:00Z", "UTC", -1, 0).unwrap_err();
        assert!(err.contains("non-negative"), "unexpected error: {}", err);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let err = day_window_json("2000-12-31T12:00:00Z", "Nowhere/City", 0, 0).unwrap_err();
        assert!(err.contains("Nowhere/City"), "unexpected error: {}", err);
    }

    #[test]
    fn swimlanes_keep_overlapping_events_together() {
        let events = r#"[
            {"id":"1","label":"A","start":"2026-03-01T09:00:00Z","end":"2026-03-01T10:00:00Z"},
            {"id":"2","label":"A","start":"2026-03-01T09:30:00Z","end":"2026-03-01T10:30:00Z"},
            {"id":"3","label":"B","start":"2026-03-01T09:00:00Z","end":"2026-03-01T09:30:00Z"}
        ]"#;

        let lanes: Value = serde_json::from_str(&swimlanes_json(events).unwrap()).unwrap();

        assert_eq!(lanes.as_array().unwrap().len(), 2);
        assert_eq!(lanes[0]["label"], "A");
        assert_eq!(lanes[0]["events"][0]["id"], "1");
        assert_eq!(lanes[0]["events"][1]["id"], "2");
        assert_eq!(lanes[1]["label"], "B");
        assert_eq!(lanes[1]["events"][0]["id"], "3");
    }

    #[test]
    fn event_ending_before_start_is_rejected() {
        let events = r#"[
            {"id":"1","label":"A","start":"2026-03-01T10:00:00Z","end":"2026-03-01T09:00:00Z"}
        ]"#;

        let err = swimlanes_json(events).unwrap_err();
        assert!(err.contains("Invalid event"), "unexpected error: {}", err);
    }

    #[test]
    fn grouped_days_maps_events_to_lanes() {
        let request = r#"{
            "date": "2026-03-02T08:00:00Z",
            "timezone": "UTC",
            "before": 1,
            "after": 1,
            "events": [
                {"id":"x","label":"B","start":"2026-03-01T09:00:00","end":"2026-03-01T10:00:00"},
                {"id":"y","label":"A","start":"2026-03-02T09:00:00","end":"2026-03-02T10:00:00"},
                {"id":"z","label":"B","start":"2026-03-03T09:00:00","end":"2026-03-03T10:00:00"}
            ]
        }"#;

        let out: Value = serde_json::from_str(&grouped_days_json(request).unwrap()).unwrap();

        assert_eq!(out["columns"].as_array().unwrap().len(), 3);
        assert_eq!(out["swimlanes"][0]["label"], "B");
        assert_eq!(out["swimlanes"][1]["label"], "A");
        assert_eq!(out["lanes"]["x"], 0);
        assert_eq!(out["lanes"]["y"], 1);
        assert_eq!(out["lanes"]["z"], 0);
    }

    #[test]
    fn repeated_event_id_is_rejected() {
        let request = r#"{
            "date": "2026-03-02T08:00:00Z",
            "timezone": "UTC",
            "events": [
                {"id":"x","label":"A","start":"2026-03-02T09:00:00Z","end":"2026-03-02T10:00:00Z"},
                {"id":"x","label":"B","start":"2026-03-02T11:00:00Z","end":"2026-03-02T12:00:00Z"}
            ]
        }"#;

        let err = grouped_days_json(request).unwrap_err();
        assert!(err.contains("Duplicate event id 'x'"), "unexpected error: {}", err);
    }

    #[test]
    fn huge_window_is_rejected() {
        let err =
            day_window_json("2026-03-02T08:00:00Z", "UTC", 0, i64::from(i32::MAX)).unwrap_err();
        assert!(err.contains("out of range"), "unexpected error: {}", err);
    }

    #[test]
    fn grouped_days_defaults_to_focal_day_without_events() {
        let request = r#"{"date": "2026-03-02T08:00:00Z", "timezone": "UTC"}"#;

        let out: Value = serde_json::from_str(&grouped_days_json(request).unwrap()).unwrap();

        assert_eq!(out["columns"].as_array().unwrap().len(), 1);
        assert!(out["swimlanes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn alternate_stripes() {
        assert!(!is_alternate(0));
        assert!(is_alternate(1));
    }
}
