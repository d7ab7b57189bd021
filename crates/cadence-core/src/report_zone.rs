//! Civil-time zone used for report rendering and day boundaries.

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

const INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z %Z";
const FIXED_INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Host civil-time zone.
///
/// `Named` carries an IANA zone so instants render with the zone's own
/// abbreviation (`JST`, `CET`). `Posix` comes from a POSIX `TZ` string such as
/// `JST-9` and renders the abbreviations spelled in it. `HostOffset` is the
/// fallback when the host zone cannot be resolved; it renders the numeric
/// offset in place of the abbreviation.
pub enum ReportZone {
    Named(Tz),
    Posix(PosixZone),
    HostOffset,
}

impl ReportZone {
    /// Resolves the host zone: `TZ` wins when set, otherwise the system zone
    /// reported by the OS.
    pub fn host() -> Self {
        let tz_env = std::env::var("TZ").ok();
        Self::resolve(tz_env.as_deref(), || {
            iana_time_zone::get_timezone()
                .inspect_err(|error| debug!(%error, "system zone lookup failed"))
                .ok()
        })
    }

    fn resolve(tz_env: Option<&str>, system_zone: impl FnOnce() -> Option<String>) -> Self {
        if let Some(value) = tz_env {
            return Self::from_tz_env(value).unwrap_or_else(|| {
                debug!(tz = value, "TZ names no known zone, rendering numeric offsets");
                Self::HostOffset
            });
        }
        let name = system_zone();
        match name.as_deref().and_then(Self::from_iana) {
            Some(zone) => zone,
            None => {
                debug!(zone = ?name, "host zone has no IANA name, rendering numeric offsets");
                Self::HostOffset
            }
        }
    }

    pub fn from_iana(name: &str) -> Option<Self> {
        name.parse::<Tz>().ok().map(Self::Named)
    }

    /// Interprets a `TZ` value: empty means UTC, then an IANA name (optionally
    /// `:`-prefixed or given as a zoneinfo path), then a POSIX zone string.
    pub fn from_tz_env(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let spec = trimmed.strip_prefix(':').unwrap_or(trimmed);
        if spec.is_empty() {
            return Some(Self::Named(Tz::UTC));
        }
        Self::from_iana(spec)
            .or_else(|| zone_name_from_zoneinfo_path(spec).and_then(|name| Self::from_iana(&name)))
            .or_else(|| PosixZone::parse(spec).map(Self::Posix))
    }

    /// Renders an instant as `2017-12-01 08:52:30 +0900 JST`.
    pub fn format_instant(&self, instant: DateTime<Utc>) -> String {
        match self {
            Self::Named(zone) => instant.with_timezone(zone).format(INSTANT_FORMAT).to_string(),
            Self::Posix(zone) => {
                let local = zone.localize(instant);
                format_fixed(local, zone.abbreviation_for(*local.offset()))
            }
            Self::HostOffset => {
                let local = instant.with_timezone(&Local).fixed_offset();
                let offset = local.format("%z").to_string();
                format_fixed(local, &offset)
            }
        }
    }

    /// First valid instant of the civil day containing `now`.
    pub fn start_of_day(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Named(zone) => start_of_local_day(zone, now),
            Self::Posix(zone) if zone.daylight.is_none() => {
                start_of_local_day(&zone.standard_offset, now)
            }
            Self::Posix(_) | Self::HostOffset => start_of_local_day(&Local, now),
        }
    }
}

/// Zone described by a POSIX `TZ` string (`std offset [dst [offset][,rules]]`).
///
/// Only the abbreviations and the standard offset are kept. When a daylight
/// part is present the transition rules are left to the host's `Local`
/// conversion, which reads the same `TZ` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosixZone {
    standard: String,
    standard_offset: FixedOffset,
    daylight: Option<String>,
}

impl PosixZone {
    pub fn parse(spec: &str) -> Option<Self> {
        let (standard, rest) = take_abbreviation(spec)?;
        let (seconds_west, rest) = take_offset(rest)?;
        // POSIX offsets count west of Greenwich.
        let standard_offset = FixedOffset::west_opt(seconds_west)?;
        let daylight = if rest.is_empty() || rest.starts_with(',') {
            None
        } else {
            Some(take_abbreviation(rest)?.0)
        };
        Some(Self {
            standard,
            standard_offset,
            daylight,
        })
    }

    fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self.daylight {
            None => instant.with_timezone(&self.standard_offset),
            Some(_) => instant.with_timezone(&Local).fixed_offset(),
        }
    }

    fn abbreviation_for(&self, offset: FixedOffset) -> &str {
        match &self.daylight {
            Some(daylight) if offset != self.standard_offset => daylight,
            _ => &self.standard,
        }
    }
}

fn format_fixed(local: DateTime<FixedOffset>, abbreviation: &str) -> String {
    format!("{} {abbreviation}", local.format(FIXED_INSTANT_FORMAT))
}

fn take_abbreviation(input: &str) -> Option<(String, &str)> {
    if let Some(quoted) = input.strip_prefix('<') {
        let (name, rest) = quoted.split_once('>')?;
        return (name.len() >= 3).then(|| (name.to_string(), rest));
    }
    let end = input
        .find(|ch: char| !ch.is_ascii_alphabetic())
        .unwrap_or(input.len());
    (end >= 3).then(|| (input[..end].to_string(), &input[end..]))
}

fn take_offset(input: &str) -> Option<(i32, &str)> {
    let (sign, body) = match input.as_bytes().first()? {
        b'+' => (1, &input[1..]),
        b'-' => (-1, &input[1..]),
        _ => (1, input),
    };
    let end = body
        .find(|ch: char| !(ch.is_ascii_digit() || ch == ':'))
        .unwrap_or(body.len());
    let mut fields = body[..end].split(':');
    let hours: i32 = fields.next()?.parse().ok()?;
    let minutes: i32 = fields.next().map_or(Some(0), |field| field.parse().ok())?;
    let seconds: i32 = fields.next().map_or(Some(0), |field| field.parse().ok())?;
    if fields.next().is_some() || hours > 24 || minutes > 59 || seconds > 59 {
        return None;
    }
    Some((sign * (hours * 3600 + minutes * 60 + seconds), &body[end..]))
}

fn start_of_local_day<Z: TimeZone>(zone: &Z, now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.with_timezone(zone).date_naive();
    // Midnight can be skipped by a DST jump; take the first hour that exists.
    (0..24)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|local| zone.from_local_datetime(&local).earliest())
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or(now)
}

fn zone_name_from_zoneinfo_path(path: &str) -> Option<String> {
    path.split_once("zoneinfo/")
        .map(|(_, name)| name.trim_matches('/').to_string())
        .filter(|name| !name.is_empty())
}
