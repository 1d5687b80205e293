//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::{NaiveDate, TimeDelta};
use netcdf::AttributeValue;
use sdcmap_calendar::parse_date;

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return values_as_f64(&var);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a `(time, lat, lon)` variable as unpacked `f64` values with the
/// shape `[nt, ny, nx]`.
///
/// Values equal to `_FillValue` or `missing_value` become NaN, and
/// `scale_factor`/`add_offset` are applied to the rest. A 4-D variable is
/// accepted when its second dimension (typically a single level) has
/// length 1.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<f64>, [usize; 3]), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    let shape = match dims {
        [t, y, x] => [t.len(), y.len(), x.len()],
        [t, level, y, x] if level.len() == 1 => [t.len(), y.len(), x.len()],
        _ => {
            return Err(IoError::DimensionMismatch {
                name: format!("{var_name} dimensions"),
                expected: 3,
                got: dims.len(),
            });
        }
    };

    let scale = numeric_attribute(&var, "scale_factor").unwrap_or(1.0);
    let offset = numeric_attribute(&var, "add_offset").unwrap_or(0.0);
    let sentinels: Vec<f64> = ["_FillValue", "missing_value"]
        .into_iter()
        .filter_map(|name| numeric_attribute(&var, name))
        .collect();

    let mut data = values_as_f64(&var)?;
    for v in &mut data {
        *v = if sentinels.contains(v) {
            f64::NAN
        } else {
            *v * scale + offset
        };
    }
    Ok((data, shape))
}

/// Read every value of a numeric variable widened to `f64`.
///
/// Tries the common on-disk types in turn; the final attempt's error is
/// returned when none applies.
fn values_as_f64(var: &netcdf::Variable<'_>) -> Result<Vec<f64>, IoError> {
    if let Ok(v) = var.get_values::<f64, _>(..) {
        return Ok(v);
    }
    if let Ok(v) = var.get_values::<f32, _>(..) {
        return Ok(v.into_iter().map(f64::from).collect());
    }
    if let Ok(v) = var.get_values::<i32, _>(..) {
        return Ok(v.into_iter().map(f64::from).collect());
    }
    let v = var.get_values::<i16, _>(..)?;
    Ok(v.into_iter().map(f64::from).collect())
}

/// First numeric element of an attribute, if present and numeric.
fn numeric_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    let value = var.attribute_value(name)?.ok()?;
    match value {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        AttributeValue::Uint(v) => Some(f64::from(v)),
        AttributeValue::Short(v) => Some(f64::from(v)),
        AttributeValue::Ushort(v) => Some(f64::from(v)),
        AttributeValue::Schar(v) => Some(f64::from(v)),
        AttributeValue::Uchar(v) => Some(f64::from(v)),
        AttributeValue::Longlong(v) => Some(v as f64),
        AttributeValue::Ulonglong(v) => Some(v as f64),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().map(|&x| f64::from(x)),
        AttributeValue::Ints(v) => v.first().map(|&x| f64::from(x)),
        AttributeValue::Shorts(v) => v.first().map(|&x| f64::from(x)),
        _ => None,
    }
}

/// Unit of a CF `"<unit> since <date>"` time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "days" | "day" | "d" => Some(Self::Days),
            "hours" | "hour" | "hrs" | "hr" | "h" => Some(Self::Hours),
            "minutes" | "minute" | "mins" | "min" => Some(Self::Minutes),
            "seconds" | "second" | "secs" | "sec" | "s" => Some(Self::Seconds),
            _ => None,
        }
    }

    fn seconds(self) -> f64 {
        match self {
            Self::Days => 86_400.0,
            Self::Hours => 3_600.0,
            Self::Minutes => 60.0,
            Self::Seconds => 1.0,
        }
    }
}

/// Calendars whose offsets can be added with plain Gregorian arithmetic.
const SUPPORTED_CALENDARS: &[&str] = &["standard", "gregorian", "proleptic_gregorian"];

/// Read the `units` and optional `calendar` attributes from a time variable.
///
/// Parses CF strings like `"hours since 1800-01-01 00:00:0.0"` and returns
/// the unit together with the base date. The time of day on the base is
/// ignored. Calendars other than the Gregorian family are rejected.
pub(crate) fn read_time_units(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<(TimeUnit, NaiveDate), IoError> {
    let var = file
        .variable(time_var)
        .ok_or_else(|| IoError::MissingVariable {
            name: time_var.to_string(),
            path: path.to_path_buf(),
        })?;

    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    let calendar = var
        .attribute_value("calendar")
        .and_then(|res| res.ok())
        .and_then(|av| match av {
            AttributeValue::Str(s) => Some(s.to_ascii_lowercase()),
            _ => None,
        })
        .unwrap_or_else(|| "standard".to_string());
    if !SUPPORTED_CALENDARS.contains(&calendar.as_str()) {
        return Err(IoError::InvalidTime {
            reason: format!("unsupported calendar '{calendar}'"),
        });
    }

    parse_time_units(&units_str)
}

/// Parse `"<unit> since <date>[ <time>]"`.
pub(crate) fn parse_time_units(units: &str) -> Result<(TimeUnit, NaiveDate), IoError> {
    let parts: Vec<&str> = units.trim().splitn(3, ' ').collect();
    let &[unit, since, base] = parts.as_slice() else {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units}'"),
        });
    };
    if !since.eq_ignore_ascii_case("since") {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units}'"),
        });
    }
    let unit = TimeUnit::parse(unit).ok_or_else(|| IoError::InvalidTime {
        reason: format!("unsupported time unit '{unit}'"),
    })?;
    let base_date = parse_date(base).map_err(|e| IoError::InvalidTime {
        reason: format!("failed to parse base date: {e}"),
    })?;
    Ok((unit, base_date))
}

/// Convert offsets from `base_date` into calendar dates.
///
/// Offsets are rounded to the nearest second before being added.
pub(crate) fn time_offsets_to_dates(
    base_date: NaiveDate,
    unit: TimeUnit,
    offsets: &[f64],
) -> Result<Vec<NaiveDate>, IoError> {
    let base = base_date.and_time(chrono::NaiveTime::MIN);
    offsets
        .iter()
        .map(|&offset| {
            let seconds = (offset * unit.seconds()).round();
            if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
                return Err(IoError::InvalidTime {
                    reason: format!("time offset {offset} is not representable"),
                });
            }
            TimeDelta::try_seconds(seconds as i64)
                .and_then(|delta| base.checked_add_signed(delta))
                .map(|dt| dt.date())
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("date overflow adding {offset} {unit:?} to {base_date}"),
                })
        })
        .collect()
}
