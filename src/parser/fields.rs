//! Lenient typed field extraction over one section's lines.
//!
//! Every logical field is an ordered list of candidate spellings tried in
//! priority order; the first matching line wins. Lookups are
//! case-insensitive, values may be double-quoted, and numbers may carry a
//! `px` unit suffix whose handling is governed by [`PixelUnit`].

use super::section::Section;
use crate::types::{ClipRect, Color, GridCoordinate, GridType, PixelPoint, ScaleSpec, SizeSpec};

/// How a numeric field treats the `px` unit suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelUnit {
    /// Every number must carry the suffix (pixel dimensions).
    Required,
    /// No number may carry the suffix (grid dimensions).
    Forbidden,
    /// The suffix is stripped when present.
    Optional,
}

impl Section {
    /// The first value for any of the given keys: `key=value`, key matched
    /// case-insensitively, value dequoted and trimmed. Empty values count
    /// as absent.
    pub fn string(&self, keys: &[&str]) -> Option<String> {
        let raw = self
            .lines
            .iter()
            .find_map(|line| keys.iter().find_map(|key| value_after_key(line, key)))?;
        let value = dequote(raw.trim()).trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// The first whole line satisfying the predicate, dequoted and trimmed.
    pub fn bare_line<F>(&self, predicate: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        let line = self.lines.iter().find(|line| predicate(line))?;
        let value = dequote(line.trim()).trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// An image url: the `url=` field, or a bare `http(s)://` line.
    pub fn url(&self) -> Option<String> {
        self.string(&["url"]).or_else(|| {
            self.bare_line(|line| {
                let lower = line.trim_start().to_ascii_lowercase();
                lower.starts_with("http://") || lower.starts_with("https://")
            })
        })
    }

    /// A single integer, with any `px` suffix stripped.
    pub fn number(&self, keys: &[&str]) -> Option<i64> {
        let value = self.string(keys)?;
        strip_px(&value).trim().parse().ok()
    }

    /// Two or four integers separated by `x` or `,`, each optionally
    /// `px`-suffixed per `unit`. Wrong arity or a bad token is absent.
    pub fn numbers(&self, keys: &[&str], unit: PixelUnit) -> Option<Vec<i64>> {
        let value = self.string(keys)?;
        parse_dimension_list(&value, unit)
    }

    pub fn boolean(&self, keys: &[&str]) -> Option<bool> {
        let value = self.string(keys)?;
        match value.to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "0" => Some(false),
            _ => None,
        }
    }

    pub fn color(&self, keys: &[&str]) -> Option<Color> {
        Color::parse(&self.string(keys)?)
    }

    /// `NN%` becomes `NN / 100`; a bare number is taken literally.
    pub fn percent(&self, keys: &[&str]) -> Option<f64> {
        let value = self.string(keys)?;
        if let Some(head) = value.strip_suffix('%') {
            let digits = head.trim();
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                return digits.parse::<f64>().ok().map(|n| n / 100.0);
            }
            return None;
        }
        value.parse().ok()
    }

    pub fn grid_type(&self, keys: &[&str]) -> Option<GridType> {
        self.string(keys)?.parse().ok()
    }

    /// A grid placement: `pos`/`position` pair first, else `col` + `row`.
    pub fn grid_offset(&self) -> Option<GridCoordinate> {
        if let Some(pair) = self.numbers(&["pos", "position"], PixelUnit::Forbidden) {
            return Some(GridCoordinate::new(pair[0], pair[1]));
        }
        let col = self.number(&["col"])?;
        let row = self.number(&["row"])?;
        Some(GridCoordinate::new(col, row))
    }

    /// A pixel placement: px-suffixed `pos`/`position` pair first, else
    /// `x`/`left` + `y`/`top`.
    pub fn pixel_offset(&self) -> Option<PixelPoint> {
        if let Some(pair) = self.numbers(&["pos", "position"], PixelUnit::Required) {
            return Some(PixelPoint {
                x: pair[0],
                y: pair[1],
            });
        }
        let x = self.number(&["x", "left"])?;
        let y = self.number(&["y", "top"])?;
        Some(PixelPoint { x, y })
    }

    /// Scale multipliers, percent or decimal; present only when at least one
    /// axis resolves to a non-zero value.
    pub fn scale(&self) -> Option<ScaleSpec> {
        let spec = ScaleSpec {
            scale: self.scale_value(&["scale"]),
            scale_x: self.scale_value(&["scalex"]),
            scale_y: self.scale_value(&["scaley"]),
        };
        spec.is_some().then_some(spec)
    }

    fn scale_value(&self, keys: &[&str]) -> Option<f64> {
        let value = self.string(keys)?;
        if let Some(idx) = value.find('%') {
            let head = value[..idx].trim_end();
            let digits = trailing_digits(head);
            if !digits.is_empty() {
                return digits.parse::<f64>().ok().map(|n| n / 100.0);
            }
        }
        value.trim().parse().ok()
    }

    /// Entity dimensions, merging the pixel half (`size=WxH` with px, else
    /// `width`+`height`) and the grid half (`grid=CxR`, else `size=CxR`
    /// without px, else `cols`+`rows`). A half only counts when both of its
    /// numbers are non-zero.
    pub fn size(&self) -> SizeSpec {
        let mut spec = SizeSpec::default();

        let pixel_pair = self.numbers(&["size"], PixelUnit::Required);
        let width = pixel_pair
            .as_ref()
            .map(|pair| pair[0])
            .or_else(|| self.number(&["width"]));
        let height = pixel_pair
            .as_ref()
            .map(|pair| pair[1])
            .or_else(|| self.number(&["height"]));
        if let (Some(width), Some(height)) = (width, height) {
            if width != 0 && height != 0 {
                spec.width = Some(width);
                spec.height = Some(height);
            }
        }

        let grid_pair = self
            .numbers(&["grid"], PixelUnit::Optional)
            .or_else(|| self.numbers(&["size"], PixelUnit::Forbidden));
        let cols = grid_pair
            .as_ref()
            .map(|pair| pair[0])
            .or_else(|| self.number(&["cols"]));
        let rows = grid_pair
            .as_ref()
            .map(|pair| pair[1])
            .or_else(|| self.number(&["rows"]));
        if let (Some(cols), Some(rows)) = (cols, rows) {
            if cols != 0 && rows != 0 {
                spec.cols = Some(cols);
                spec.rows = Some(rows);
            }
        }

        spec
    }

    /// Grid extent for a grid definition: `grid=CxR` pair, else
    /// `cols` + `rows`.
    pub fn cols_and_rows(&self) -> Option<(i64, i64)> {
        if let Some(pair) = self.numbers(&["grid"], PixelUnit::Optional) {
            return Some((pair[0], pair[1]));
        }
        let cols = self.number(&["cols"])?;
        let rows = self.number(&["rows"])?;
        Some((cols, rows))
    }

    /// A clip rectangle: exactly four numbers.
    pub fn clip(&self) -> Option<ClipRect> {
        let values = self.numbers(&["clip"], PixelUnit::Optional)?;
        if values.len() != 4 {
            return None;
        }
        Some(ClipRect {
            x: values[0],
            y: values[1],
            width: values[2],
            height: values[3],
        })
    }
}

/// Match `key=` at the start of a line, case-insensitively, and return the
/// raw right-hand side. Whitespace may sit between key and `=`; a longer
/// identifier never matches a shorter key.
fn value_after_key<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    if line.len() < key.len() || !line.is_char_boundary(key.len()) {
        return None;
    }
    let (head, rest) = line.split_at(key.len());
    if !head.eq_ignore_ascii_case(key) {
        return None;
    }
    rest.trim_start().strip_prefix('=')
}

/// `"value"` becomes `value`; anything else passes through.
fn dequote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

fn strip_px(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.to_ascii_lowercase().find("px") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

fn trailing_digits(value: &str) -> &str {
    let count = value
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .count();
    &value[value.len() - count..]
}

fn parse_dimension_list(value: &str, unit: PixelUnit) -> Option<Vec<i64>> {
    let parts = split_dimensions(value);
    if parts.len() != 2 && parts.len() != 4 {
        return None;
    }

    let mut numbers = Vec::with_capacity(parts.len());
    for part in parts {
        let part = part.trim();
        let lower = part.to_ascii_lowercase();
        let (digits, has_px) = match lower.strip_suffix("px") {
            Some(head) => (part[..head.len()].trim_end(), true),
            None => (part, false),
        };
        match unit {
            PixelUnit::Required if !has_px => return None,
            PixelUnit::Forbidden if has_px => return None,
            _ => {}
        }
        numbers.push(digits.parse().ok()?);
    }
    Some(numbers)
}

/// Split a dimension value on `,` and on `x` where the `x` is not part of a
/// `px` unit suffix.
fn split_dimensions(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    for (i, c) in value.char_indices() {
        let is_separator = c == ','
            || ((c == 'x' || c == 'X') && !matches!(prev, Some('p') | Some('P')));
        if is_separator {
            parts.push(&value[start..i]);
            start = i + c.len_utf8();
        }
        if !c.is_whitespace() {
            prev = Some(c);
        }
    }
    parts.push(&value[start..]);
    parts
}
