//! Stylesheet parser using lightningcss
//!
//! Reads custom properties out of style rules and turns them into
//! [`FieldOverrides`]. Only custom properties are read; standard
//! declarations belong to the page and are left alone.

use std::collections::HashMap;
use thiserror::Error;

use lightningcss::printer::PrinterOptions;
use lightningcss::properties::Property;
use lightningcss::properties::custom::{Token, TokenList, TokenOrValue};
use lightningcss::rules::CssRule;
use lightningcss::rules::style::StyleRule;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::traits::{Parse, ToCss};
use lightningcss::values::color::CssColor;

use crate::{BoundsOverride, FieldOverrides, LayerOverride};

#[derive(Error, Debug)]
pub enum ThemeParseError {
    #[error("CSS parse error: {0}")]
    CssError(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid number for {0}: {1}")]
    InvalidNumber(String, String),

    #[error("Invalid range for {0}: {1} .. {2}")]
    InvalidSpan(String, f64, f64),

    #[error("Missing required property: {0}")]
    MissingProperty(String),
}

/// Selectors whose custom properties apply to the whole page
const ROOT_SELECTORS: &[&str] = &[":root", "html", "body"];

/// Helper to get PrinterOptions (since it doesn't implement Copy)
fn opts() -> PrinterOptions<'static> {
    PrinterOptions::default()
}

/// Custom properties of one rule, keyed by name, as parsed token lists
type CustomProperties<'a, 'i> = HashMap<String, &'a TokenList<'i>>;

/// Extract custom properties from a style rule's declarations
fn extract_custom_properties<'a, 'i>(rule: &'a StyleRule<'i>) -> CustomProperties<'a, 'i> {
    rule.declarations
        .declarations
        .iter()
        .filter_map(|decl| match decl {
            Property::Custom(prop) => Some((prop.name.as_ref().to_string(), &prop.value)),
            _ => None,
        })
        .collect()
}

fn token_text(token: &TokenOrValue) -> Option<String> {
    match token {
        TokenOrValue::Token(token) => token.to_css_string(opts()).ok(),
        TokenOrValue::Color(color) => color.to_css_string(opts()).ok(),
        TokenOrValue::Length(len) => len.to_css_string(opts()).ok(),
        _ => None,
    }
}

/// Serialize a token list back to text
fn value_text(tokens: &TokenList) -> String {
    let mut text = String::new();
    for token in &tokens.0 {
        match token_text(token) {
            Some(s) => text.push_str(&s),
            None => log::debug!("Skipping unsupported token in custom property"),
        }
    }
    text.trim().to_string()
}

fn color_string(color: &CssColor) -> Result<String, ThemeParseError> {
    color
        .to_css_string(opts())
        .map_err(|e| ThemeParseError::InvalidColor(format!("{:?}", e)))
}

/// Read a comma separated color list, one color per entry
fn parse_palette(tokens: &TokenList) -> Result<Vec<String>, ThemeParseError> {
    let mut colors = Vec::new();
    let mut entry: Option<String> = None;

    for token in &tokens.0 {
        let color = match token {
            TokenOrValue::Token(Token::WhiteSpace(_)) => continue,
            TokenOrValue::Token(Token::Comma) => {
                colors.extend(entry.take());
                continue;
            }
            TokenOrValue::Color(color) => Some(color_string(color)?),
            TokenOrValue::Token(Token::Ident(name)) => CssColor::parse_string(name)
                .ok()
                .map(|color| color_string(&color))
                .transpose()?,
            _ => None,
        };

        match color {
            Some(color) if entry.is_none() => entry = Some(color),
            _ => {
                let text = token_text(token).unwrap_or_default();
                return Err(ThemeParseError::InvalidColor(text));
            }
        }
    }

    colors.extend(entry);
    Ok(colors)
}

/// Get selector string from a style rule
fn get_selector_string(rule: &StyleRule) -> String {
    rule.selectors.to_css_string(opts()).unwrap_or_default()
}

fn parse_number(custom: &CustomProperties, name: &str) -> Result<Option<f64>, ThemeParseError> {
    let Some(tokens) = custom.get(name) else {
        return Ok(None);
    };
    let text = value_text(tokens);
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or(ThemeParseError::InvalidNumber(name.to_string(), text))
}

fn parse_bounds(custom: &CustomProperties, field: &str) -> Result<BoundsOverride, ThemeParseError> {
    Ok(BoundsOverride {
        min: parse_number(custom, &format!("--{field}-min"))?,
        max: parse_number(custom, &format!("--{field}-max"))?,
    })
}

fn parse_layer_override(custom: &CustomProperties) -> Result<LayerOverride, ThemeParseError> {
    let count = match parse_number(custom, "--count")? {
        Some(n) if n >= 0.0 && n <= u32::MAX as f64 => Some(n.round() as u32),
        Some(_) => {
            return Err(ThemeParseError::InvalidNumber(
                "--count".to_string(),
                value_text(custom["--count"]),
            ));
        }
        None => None,
    };

    Ok(LayerOverride {
        count,
        x: parse_bounds(custom, "x")?,
        y: parse_bounds(custom, "y")?,
        duration: parse_bounds(custom, "duration")?,
        delay: parse_bounds(custom, "delay")?,
        size: parse_bounds(custom, "size")?,
        opacity: parse_bounds(custom, "opacity")?,
    })
}

fn apply_root_properties(
    overrides: &mut FieldOverrides,
    custom: &CustomProperties,
) -> Result<(), ThemeParseError> {
    if let Some(tokens) = custom.get("--palette") {
        let colors = parse_palette(tokens)?;
        if !colors.is_empty() {
            overrides.palette = Some(colors);
        }
    }

    if let Some(tokens) = custom.get("--density-scales") {
        overrides.density_scales = Some(parse_density_scales(&value_text(tokens))?);
    }

    Ok(())
}

/// Four positive scales, non-decreasing from the narrowest band up
fn parse_density_scales(value: &str) -> Result<[f64; 4], ThemeParseError> {
    let invalid = || ThemeParseError::InvalidNumber("--density-scales".to_string(), value.to_string());
    let numbers = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok().filter(|n| n.is_finite() && *n > 0.0))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(invalid)?;
    if !numbers.windows(2).all(|pair| pair[0] <= pair[1]) {
        return Err(invalid());
    }
    numbers.try_into().map_err(|_| invalid())
}

/// Parse field overrides from a stylesheet
pub fn parse_overrides(css: &str) -> Result<FieldOverrides, ThemeParseError> {
    let stylesheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| ThemeParseError::CssError(format!("{:?}", e)))?;

    let mut overrides = FieldOverrides::default();

    for rule in &stylesheet.rules.0 {
        if let CssRule::Style(style_rule) = rule {
            let custom = extract_custom_properties(style_rule);
            if custom.is_empty() {
                continue;
            }

            for selector in get_selector_string(style_rule).split(',').map(str::trim) {
                if ROOT_SELECTORS.contains(&selector) {
                    apply_root_properties(&mut overrides, &custom)?;
                } else {
                    let layer = parse_layer_override(&custom)?;
                    if layer != LayerOverride::default() {
                        overrides.layers.insert(selector.to_string(), layer);
                    }
                }
            }
        }
    }

    log::debug!(
        "Parsed stylesheet overrides for {} layers",
        overrides.layers.len()
    );
    Ok(overrides)
}
