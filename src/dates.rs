// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Date helpers for the report window, bucketing keys, and display formatting (short numeric + long localized)
// role: utilities/dates
// inputs: "now" instant (optionally overridden), day offsets, report timezone and language
// outputs: NaiveDate values and display strings
// invariants:
// - window_start(today, n) is exactly n calendar days before today
// - bucket keys are %Y-%m-%d in the report timezone
// - format_short pads to MM/DD; chart_label does not pad (M/D)
// errors: parse_now_override and ReportTz::from_str surface invalid input with the offending value
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::str::FromStr;

use anyhow::{Result, bail};
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Language used for long dates and the standalone document's static text.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Lang {
  Ja,
  En,
}

/// Timezone in which merge timestamps are turned into calendar days.
#[derive(Clone, Debug, PartialEq)]
pub enum ReportTz {
  Local,
  Utc,
  Named(chrono_tz::Tz),
}

impl FromStr for ReportTz {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self> {
    if s.eq_ignore_ascii_case("local") {
      return Ok(ReportTz::Local);
    }

    if s.eq_ignore_ascii_case("utc") {
      return Ok(ReportTz::Utc);
    }

    match s.parse::<chrono_tz::Tz>() {
      Ok(zone) => Ok(ReportTz::Named(zone)),
      Err(_) => bail!("unknown timezone {:?}; use local, utc, or an IANA name like Asia/Tokyo", s),
    }
  }
}

impl ReportTz {
  /// Calendar day of `instant` as observed in this timezone.
  pub fn date_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
    match self {
      ReportTz::Local => instant.with_timezone(&Local).date_naive(),
      ReportTz::Utc => instant.date_naive(),
      ReportTz::Named(zone) => instant.with_timezone(zone).date_naive(),
    }
  }

  pub fn label(&self) -> String {
    match self {
      ReportTz::Local => "local".to_string(),
      ReportTz::Utc => "utc".to_string(),
      ReportTz::Named(zone) => zone.name().to_string(),
    }
  }
}

/// Returns the effective "now" given an optional override.
///
/// Tests pin the clock through `--now-override`; everything else reads the
/// system clock here and nowhere else.
pub fn effective_now(override_now: Option<DateTime<Utc>>) -> DateTime<Utc> {
  override_now.unwrap_or_else(Utc::now)
}

/// Parse a `--now-override` value.
/// Accepts RFC3339 (e.g. 2025-08-15T12:00:00Z) or a naive `%Y-%m-%dT%H:%M:%S`
/// timestamp, which is taken as UTC.
pub fn parse_now_override(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  let Some(raw) = raw else { return Ok(None) };

  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Ok(Some(dt.with_timezone(&Utc)));
  }

  match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
    Ok(ndt) => Ok(Some(ndt.and_utc())),
    Err(_) => bail!("invalid --now-override {:?}; expected RFC3339", raw),
  }
}

/// Longest look-back accepted on the command line (about a century).
pub const MAX_DAYS: u32 = 36_500;

/// First day of a window covering the past `days` days.
/// Saturates at the earliest representable date instead of overflowing.
pub fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
  today.checked_sub_days(Days::new(u64::from(days))).unwrap_or(NaiveDate::MIN)
}

/// `YYYY-MM-DD`; also the key format of the date buckets.
pub fn iso_date(d: NaiveDate) -> String {
  d.format("%Y-%m-%d").to_string()
}

pub fn iso_timestamp(dt: &DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Short numeric form used in the work table, e.g. `08/05`.
pub fn format_short(d: NaiveDate) -> String {
  d.format("%m/%d").to_string()
}

/// Chart axis label, e.g. `8/5`.
pub fn chart_label(d: NaiveDate) -> String {
  format!("{}/{}", d.month(), d.day())
}

/// Long localized form used in headers and placeholders.
pub fn format_long(d: NaiveDate, lang: Lang) -> String {
  match lang {
    Lang::Ja => format!("{}年{}月{}日", d.year(), d.month(), d.day()),
    Lang::En => d.format("%B %-d, %Y").to_string(),
  }
}
