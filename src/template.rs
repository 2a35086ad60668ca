//! Output format templates
//!
//! A template is literal text with `%` directives that substitute fields of a
//! [`Region`]:
//!
//! | directive | field                                 |
//! |-----------|---------------------------------------|
//! | `%x` `%y` | offset from the left / top edge       |
//! | `%X` `%Y` | offset from the right / bottom edge   |
//! | `%w` `%h` | width / height                        |
//! | `%b` `%d` | border width / depth of the root      |
//! | `%%`      | a literal `%`                         |
//!
//! A directive may carry a rounding clause, `%[N]w`, which rounds the value
//! down to a multiple of `N`. Unknown directives produce no output.

use crate::domain::Region;
use crate::error::TemplateError;

/// Template used when none is configured
pub const DEFAULT_FORMAT: &str = "%wx%h+%x+%y\n";

/// Region field a directive refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    X,
    Y,
    Right,
    Bottom,
    Width,
    Height,
    Border,
    Depth,
}

impl Field {
    /// Map a directive character to its field
    pub fn from_directive(c: char) -> Option<Self> {
        match c {
            'x' => Some(Field::X),
            'y' => Some(Field::Y),
            'X' => Some(Field::Right),
            'Y' => Some(Field::Bottom),
            'w' => Some(Field::Width),
            'h' => Some(Field::Height),
            'b' => Some(Field::Border),
            'd' => Some(Field::Depth),
            _ => None,
        }
    }

    fn format(self, region: &Region, rounding: u32) -> String {
        match self {
            Field::X => round_signed(region.x(), rounding).to_string(),
            Field::Y => round_signed(region.y(), rounding).to_string(),
            Field::Right => round_signed(region.right(), rounding).to_string(),
            Field::Bottom => round_signed(region.bottom(), rounding).to_string(),
            Field::Width => round_unsigned(region.width(), rounding).to_string(),
            Field::Height => round_unsigned(region.height(), rounding).to_string(),
            Field::Border => round_unsigned(region.border(), rounding).to_string(),
            Field::Depth => round_unsigned(region.depth(), rounding).to_string(),
        }
    }
}

fn round_unsigned(value: u32, rounding: u32) -> u32 {
    if rounding == 0 {
        value
    } else {
        (value / rounding) * rounding
    }
}

/// Signed rounding truncates toward zero, like integer division does
fn round_signed(value: i32, rounding: u32) -> i64 {
    let value = i64::from(value);
    if rounding == 0 {
        value
    } else {
        let rounding = i64::from(rounding);
        (value / rounding) * rounding
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Percent,
    Field { field: Field, rounding: u32 },
    /// Directive with no matching field; renders as nothing
    Unknown(Option<char>),
}

/// A parsed output template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `format`, rejecting malformed rounding clauses
    pub fn parse(format: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = format.char_indices().peekable();

        while let Some((_, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }

            let mut rounding = 0;
            if let Some(&(start, '[')) = chars.peek() {
                chars.next();
                rounding = parse_rounding(&mut chars, start)?;
            }

            let segment = match chars.next() {
                Some((_, '%')) => Segment::Percent,
                Some((_, c)) => match Field::from_directive(c) {
                    Some(field) => Segment::Field { field, rounding },
                    None => Segment::Unknown(Some(c)),
                },
                None => Segment::Unknown(None),
            };
            if let Segment::Unknown(c) = &segment {
                log::debug!("Unknown format directive {:?}, producing no output", c);
            }
            segments.push(segment);
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Substitute the fields of `region` into the template
    pub fn render(&self, region: &Region) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Percent => out.push('%'),
                Segment::Field { field, rounding } => {
                    out.push_str(&field.format(region, *rounding));
                }
                Segment::Unknown(_) => {}
            }
        }
        out
    }
}

/// Read the digits of a rounding clause up to and including the closing `]`
fn parse_rounding(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    start: usize,
) -> Result<u32, TemplateError> {
    let mut value: u32 = 0;
    loop {
        match chars.next() {
            Some((_, ']')) => return Ok(value),
            Some((position, c)) => {
                let digit = c
                    .to_digit(10)
                    .ok_or(TemplateError::InvalidDigit { found: c, position })?;
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or(TemplateError::RoundingOverflow { position: start })?;
            }
            None => return Err(TemplateError::MalformedRounding { position: start }),
        }
    }
}

/// Render `format` against `region` in one step
pub fn render(format: &str, region: &Region) -> Result<String, TemplateError> {
    Ok(Template::parse(format)?.render(region))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rect, RootGeometry};

    fn region(x: i32, y: i32, w: u32, h: u32) -> Region {
        let root = RootGeometry {
            root: 1,
            width: 1920,
            height: 1080,
            border: 0,
            depth: 24,
            ..Default::default()
        };
        Region::new(Rect::new(x, y, w, h), &root)
    }

    #[test]
    fn test_default_format() {
        let out = render(DEFAULT_FORMAT, &region(10, 20, 100, 50)).unwrap();
        assert_eq!(out, "100x50+10+20\n");
    }

    #[test]
    fn test_all_fields() {
        let out = render("%x %y %X %Y %w %h %b %d", &region(10, 20, 100, 50)).unwrap();
        assert_eq!(out, "10 20 1810 1010 100 50 0 24");
    }

    #[test]
    fn test_rounding_down() {
        let r = region(0, 0, 47, 50);
        assert_eq!(render("%[10]w", &r).unwrap(), "40");
        assert_eq!(render("%w", &r).unwrap(), "47");
        assert_eq!(render("%[0]w", &r).unwrap(), "47");
        assert_eq!(render("%[]w", &r).unwrap(), "47");
    }

    #[test]
    fn test_rounding_signed_truncates_toward_zero() {
        // right = 800 - 700 - 207 = -107
        let root = RootGeometry {
            width: 800,
            height: 600,
            ..Default::default()
        };
        let r = Region::new(Rect::new(700, 0, 207, 10), &root);
        assert_eq!(render("%X", &r).unwrap(), "-107");
        assert_eq!(render("%[10]X", &r).unwrap(), "-100");
    }

    #[test]
    fn test_rounding_larger_than_value() {
        assert_eq!(render("%[1000]x", &region(999, 0, 1, 1)).unwrap(), "0");
    }

    #[test]
    fn test_percent_literal() {
        assert_eq!(render("%%", &region(0, 0, 1, 1)).unwrap(), "%");
        assert_eq!(render("100%%", &region(0, 0, 1, 1)).unwrap(), "100%");
    }

    #[test]
    fn test_unknown_directive_is_silent() {
        let r = region(5, 6, 7, 8);
        assert_eq!(render("a%qb", &r).unwrap(), "ab");
        assert_eq!(render("%[5]z|%w", &r).unwrap(), "|7");
    }

    #[test]
    fn test_trailing_percent_is_silent() {
        assert_eq!(render("%w%", &region(0, 0, 3, 3)).unwrap(), "3");
        assert_eq!(render("%w%[4]", &region(0, 0, 3, 3)).unwrap(), "3");
    }

    #[test]
    fn test_literal_text_passes_through() {
        let out = render("geometry: {ä} %wx%h\t", &region(0, 0, 2, 3)).unwrap();
        assert_eq!(out, "geometry: {ä} 2x3\t");
    }

    #[test]
    fn test_unterminated_rounding() {
        let err = render("%[5w", &region(0, 0, 1, 1)).unwrap_err();
        assert_eq!(err, TemplateError::InvalidDigit { found: 'w', position: 3 });

        let err = render("size %[15", &region(0, 0, 1, 1)).unwrap_err();
        assert_eq!(err, TemplateError::MalformedRounding { position: 6 });
    }

    #[test]
    fn test_invalid_digit() {
        let err = Template::parse("%[1x0]w").unwrap_err();
        assert_eq!(err, TemplateError::InvalidDigit { found: 'x', position: 3 });
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_rounding_overflow() {
        let err = Template::parse("%[99999999999]w").unwrap_err();
        assert_eq!(err, TemplateError::RoundingOverflow { position: 1 });
    }

    #[test]
    fn test_parse_once_render_many() {
        let template = Template::parse("%[8]w").unwrap();
        assert_eq!(template.render(&region(0, 0, 17, 1)), "16");
        assert_eq!(template.render(&region(0, 0, 31, 1)), "24");
    }

    #[test]
    fn test_field_from_directive() {
        assert_eq!(Field::from_directive('X'), Some(Field::Right));
        assert_eq!(Field::from_directive('d'), Some(Field::Depth));
        assert_eq!(Field::from_directive('%'), None);
    }
}
