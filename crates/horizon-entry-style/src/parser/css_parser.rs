//! CSS syntax parser using the `cssparser` crate.
//!
//! The parser tokenizes a stylesheet and builds [`StyleRule`]s. Properties
//! with a dedicated field in [`StyleProperties`] get a typed parse; every
//! other declaration is kept by name in `extra`, typed by the shape of its
//! value, so widgets can register their own style properties.

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};
use horizon_entry_core::Color;
use horizon_entry_core::logging::targets;

use crate::rules::StyleRule;
use crate::selector::{Combinator, PseudoClass, Selector, SelectorPart, TypeSelector};
use crate::style::StyleProperties;
use crate::types::{EdgeValues, LengthValue, PropertyValue, StyleValue};
use crate::{Error, Result};

type ValueResult<'i, T> = std::result::Result<T, CssParseError<'i, ()>>;

/// Parse a CSS stylesheet string into a list of style rules.
///
/// Rules that fail to parse are skipped with a warning; the remaining rules
/// are returned in source order, each with an incrementing `order`.
///
/// # Example
///
/// ```
/// use horizon_entry_style::parser::parse_css;
///
/// let rules = parse_css("Entry { color: red; } Entry:focus { color: blue; }").unwrap();
/// assert_eq!(rules.len(), 2);
/// ```
pub fn parse_css(css: &str) -> Result<Vec<StyleRule>> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rules = vec![];
    let mut order = 0u32;

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        match parse_rule(&mut parser, order) {
            Ok(rule) => {
                rules.push(rule);
                order += 1;
            }
            Err(e) => {
                tracing::warn!(target: targets::STYLE, "skipping CSS rule: {}", e);
                skip_to_next_rule(&mut parser);
            }
        }
    }

    Ok(rules)
}

/// Parse a standalone selector such as `"Panel > Entry:focus"`.
pub fn parse_selector_str(text: &str) -> Result<Selector> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    parse_selector(&mut parser)
}

/// Parse a single CSS rule: selector { declarations }
fn parse_rule<'i>(parser: &mut Parser<'i, '_>, order: u32) -> Result<StyleRule> {
    let location = parser.current_source_location();
    let mut selector_error = None;
    let selector = parser
        .parse_until_before(cssparser::Delimiter::CurlyBracketBlock, |p| {
            parse_selector(p).map_err(|e| {
                selector_error = Some(e);
                p.new_custom_error(())
            })
        })
        .map_err(|_: CssParseError<'_, ()>| {
            selector_error.take().unwrap_or_else(|| {
                Error::parse("invalid selector", location.line + 1, location.column)
            })
        })?;

    let properties = match parser.next() {
        Ok(Token::CurlyBracketBlock) => parser
            .parse_nested_block(|block_parser| parse_declarations(block_parser))
            .map_err(|e: CssParseError<'_, ()>| {
                Error::parse(
                    format!("failed to parse declaration block: {:?}", e.kind),
                    e.location.line + 1,
                    e.location.column,
                )
            })?,
        _ => {
            let location = parser.current_source_location();
            return Err(Error::parse(
                "expected '{' after selector",
                location.line + 1,
                location.column,
            ));
        }
    };

    Ok(StyleRule::new(selector, properties, order))
}

/// Parse a CSS selector.
///
/// Whitespace between compound selectors is a descendant combinator, `>` a
/// child combinator.
fn parse_selector<'i>(parser: &mut Parser<'i, '_>) -> Result<Selector> {
    let mut parts = vec![];
    let mut combinators = vec![];
    let mut current = SelectorPart::default();
    let mut pending: Option<Combinator> = None;

    parser.skip_whitespace();

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) => {
                if !current.is_empty() && pending.is_none() {
                    pending = Some(Combinator::Descendant);
                }
            }

            Token::Delim('>') => {
                if current.is_empty() {
                    return Err(Error::invalid_selector(">", "combinator without a left-hand side"));
                }
                pending = Some(Combinator::Child);
            }

            token => {
                if let Some(combinator) = pending.take() {
                    parts.push(std::mem::take(&mut current));
                    combinators.push(combinator);
                }

                match token {
                    Token::Ident(name) => {
                        if current.type_selector.is_some() {
                            return Err(Error::invalid_selector(
                                name.to_string(),
                                "unexpected identifier",
                            ));
                        }
                        current.type_selector = Some(TypeSelector::Type(name.to_string()));
                    }

                    Token::Delim('*') => {
                        current.type_selector.get_or_insert(TypeSelector::Universal);
                    }

                    Token::Delim('.') => {
                        let class = parser
                            .expect_ident()
                            .map_err(|_| Error::invalid_selector(".", "expected class name after '.'"))?
                            .to_string();
                        current.classes.push(class);
                    }

                    Token::IDHash(id) => {
                        if current.id.is_some() {
                            return Err(Error::invalid_selector(
                                format!("#{}", id),
                                "a compound selector has at most one id",
                            ));
                        }
                        current.id = Some(id.to_string());
                    }

                    Token::Colon => {
                        let name = parser
                            .expect_ident()
                            .map_err(|_| {
                                Error::invalid_selector(":", "expected pseudo-class name after ':'")
                            })?
                            .to_string();
                        let pseudo = PseudoClass::from_css(&name).ok_or_else(|| {
                            Error::invalid_selector(format!(":{}", name), "unknown pseudo-class")
                        })?;
                        current.pseudo_classes.push(pseudo);
                    }

                    other => {
                        return Err(Error::invalid_selector(
                            format!("{:?}", other),
                            "unexpected token in selector",
                        ));
                    }
                }
            }
        }
    }

    if pending == Some(Combinator::Child) {
        return Err(Error::invalid_selector(">", "combinator without a right-hand side"));
    }

    if !current.is_empty() {
        parts.push(current);
    }

    if parts.is_empty() {
        return Err(Error::invalid_selector("", "empty selector"));
    }

    Ok(Selector { parts, combinators })
}

/// Parse CSS declarations.
fn parse_declarations<'i>(parser: &mut Parser<'i, '_>) -> ValueResult<'i, StyleProperties> {
    let mut props = StyleProperties::default();

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        let property_name = match parser.expect_ident() {
            Ok(name) => name.to_ascii_lowercase(),
            Err(_) => {
                skip_declaration(parser);
                continue;
            }
        };

        if parser.expect_colon().is_err() {
            skip_declaration(parser);
            continue;
        }

        if let Err(e) = parse_property_value(parser, &property_name, &mut props) {
            tracing::warn!(
                target: targets::STYLE,
                "failed to parse property '{}': {:?}",
                property_name,
                e.kind
            );
            skip_declaration(parser);
            continue;
        }

        let _ = parser.try_parse(|p| p.expect_semicolon());
    }

    Ok(props)
}

#[derive(Clone, Copy)]
enum Keyword {
    Inherit,
    Initial,
    Unset,
}

impl Keyword {
    fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "inherit" => Some(Self::Inherit),
            "initial" => Some(Self::Initial),
            "unset" => Some(Self::Unset),
            _ => None,
        }
    }

    fn value<T>(self) -> StyleValue<T> {
        match self {
            Self::Inherit => StyleValue::Inherit,
            Self::Initial => StyleValue::Initial,
            Self::Unset => StyleValue::Unset,
        }
    }
}

/// Parse a single property value.
fn parse_property_value<'i>(
    parser: &mut Parser<'i, '_>,
    name: &str,
    props: &mut StyleProperties,
) -> ValueResult<'i, ()> {
    parser.skip_whitespace();

    let state = parser.state();
    if let Ok(Token::Ident(ident)) = parser.next()
        && let Some(keyword) = Keyword::from_ident(&ident.to_ascii_lowercase())
    {
        set_keyword(name, keyword, props);
        return Ok(());
    }
    parser.reset(&state);

    match name {
        "color" => props.color = StyleValue::Set(parse_color(parser)?),
        "background-color" | "background" => {
            props.background_color = StyleValue::Set(parse_color(parser)?)
        }
        "font-family" => props.font_family = StyleValue::Set(parse_font_family(parser)?),
        "font-size" => props.font_size = StyleValue::Set(parse_length(parser)?),
        "padding" => props.padding = StyleValue::Set(parse_edge_values(parser)?),
        "padding-top" => {
            let length = parse_length(parser)?;
            update_edge(&mut props.padding, |e| e.top = length);
        }
        "padding-right" => {
            let length = parse_length(parser)?;
            update_edge(&mut props.padding, |e| e.right = length);
        }
        "padding-bottom" => {
            let length = parse_length(parser)?;
            update_edge(&mut props.padding, |e| e.bottom = length);
        }
        "padding-left" => {
            let length = parse_length(parser)?;
            update_edge(&mut props.padding, |e| e.left = length);
        }
        _ => {
            let value = parse_extra_value(parser)?;
            tracing::trace!(target: targets::STYLE, property = name, ?value, "extra property");
            props.extra.insert(name.to_string(), StyleValue::Set(value));
        }
    }
    Ok(())
}

fn update_edge<F: FnOnce(&mut EdgeValues)>(value: &mut StyleValue<EdgeValues>, f: F) {
    let mut edges = value.as_set().cloned().unwrap_or_else(EdgeValues::zero);
    f(&mut edges);
    *value = StyleValue::Set(edges);
}

fn set_keyword(name: &str, keyword: Keyword, props: &mut StyleProperties) {
    match name {
        "color" => props.color = keyword.value(),
        "background-color" | "background" => props.background_color = keyword.value(),
        "font-family" => props.font_family = keyword.value(),
        "font-size" => props.font_size = keyword.value(),
        "padding" => props.padding = keyword.value(),
        _ => {
            props.extra.insert(name.to_string(), keyword.value());
        }
    }
}

/// Parse a value whose property has no typed field, going by token shape.
fn parse_extra_value<'i>(parser: &mut Parser<'i, '_>) -> ValueResult<'i, PropertyValue> {
    parser.skip_whitespace();

    let state = parser.state();
    if let Ok(color) = parse_color(parser) {
        return Ok(PropertyValue::Color(color));
    }
    parser.reset(&state);

    match parser.next()?.clone() {
        Token::Dimension { value, unit, .. } => Ok(PropertyValue::Length(length_with_unit(value, &unit))),
        Token::Number { value, .. } => Ok(PropertyValue::Number(value)),
        Token::QuotedString(s) => Ok(PropertyValue::String(s.to_string())),
        Token::Ident(s) => Ok(PropertyValue::Ident(s.to_string())),
        _ => Err(parser.new_custom_error(())),
    }
}

fn length_with_unit(value: f32, unit: &str) -> LengthValue {
    match unit.to_ascii_lowercase().as_str() {
        "em" => LengthValue::Em(value),
        "rem" => LengthValue::Rem(value),
        "pt" => LengthValue::Px(value * 96.0 / 72.0),
        _ => LengthValue::Px(value),
    }
}

/// Parse a length value. Bare numbers are pixels.
fn parse_length<'i>(parser: &mut Parser<'i, '_>) -> ValueResult<'i, LengthValue> {
    parser.skip_whitespace();
    let token = parser.next()?.clone();

    match token {
        Token::Number { value, .. } if value == 0.0 => Ok(LengthValue::Zero),
        Token::Number { value, .. } => Ok(LengthValue::Px(value)),
        Token::Dimension { value, unit, .. } => Ok(length_with_unit(value, &unit)),
        Token::Ident(s) if s.eq_ignore_ascii_case("auto") => Ok(LengthValue::Auto),
        _ => Err(parser.new_custom_error(())),
    }
}

/// Parse edge values (1-4 values for the padding shorthand).
fn parse_edge_values<'i>(parser: &mut Parser<'i, '_>) -> ValueResult<'i, EdgeValues> {
    let mut values = vec![];

    while values.len() < 4 {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        let state = parser.state();
        if let Ok(Token::Semicolon) | Ok(Token::CloseCurlyBracket) = parser.next() {
            parser.reset(&state);
            break;
        }
        parser.reset(&state);

        match parse_length(parser) {
            Ok(len) => values.push(len),
            Err(_) => {
                parser.reset(&state);
                break;
            }
        }
    }

    match values.as_slice() {
        [all] => Ok(EdgeValues::uniform(*all)),
        [vertical, horizontal] => Ok(EdgeValues::symmetric(*vertical, *horizontal)),
        [top, horizontal, bottom] => Ok(EdgeValues::new(*top, *horizontal, *bottom, *horizontal)),
        [top, right, bottom, left] => Ok(EdgeValues::new(*top, *right, *bottom, *left)),
        _ => Err(parser.new_custom_error(())),
    }
}

/// Parse a color value: hex, a named color, or `rgb()`/`rgba()`.
fn parse_color<'i>(parser: &mut Parser<'i, '_>) -> ValueResult<'i, Color> {
    parser.skip_whitespace();
    let token = parser.next()?.clone();

    match token {
        Token::Hash(hash) | Token::IDHash(hash) => {
            Color::from_hex(&hash).ok_or_else(|| parser.new_custom_error(()))
        }
        Token::Ident(name) => named_color(&name).ok_or_else(|| parser.new_custom_error(())),
        Token::Function(name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            let (r, g, b, a) = parser.parse_nested_block(|p| {
                let r = parse_color_component(p)?;
                p.expect_comma()?;
                let g = parse_color_component(p)?;
                p.expect_comma()?;
                let b = parse_color_component(p)?;
                let a = if p.try_parse(|p| p.expect_comma()).is_ok() {
                    parse_alpha_component(p)?
                } else {
                    1.0
                };
                Ok::<_, CssParseError<'_, ()>>((r, g, b, a))
            })?;
            Ok(Color::from_rgba(r, g, b, a))
        }
        _ => Err(parser.new_custom_error(())),
    }
}

fn named_color(name: &str) -> Option<Color> {
    match name.to_ascii_lowercase().as_str() {
        "transparent" => Some(Color::TRANSPARENT),
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "red" => Some(Color::RED),
        "green" => Some(Color::GREEN),
        "blue" => Some(Color::BLUE),
        "yellow" => Some(Color::YELLOW),
        "cyan" => Some(Color::CYAN),
        "magenta" => Some(Color::MAGENTA),
        "gray" | "grey" => Some(Color::GRAY),
        _ => None,
    }
}

fn parse_color_component<'i>(parser: &mut Parser<'i, '_>) -> ValueResult<'i, f32> {
    parser.skip_whitespace();
    match parser.next()? {
        Token::Number { value, .. } => Ok(*value / 255.0),
        Token::Percentage { unit_value, .. } => Ok(*unit_value),
        _ => Err(parser.new_custom_error(())),
    }
}

fn parse_alpha_component<'i>(parser: &mut Parser<'i, '_>) -> ValueResult<'i, f32> {
    parser.skip_whitespace();
    match parser.next()? {
        Token::Number { value, .. } => Ok(value.clamp(0.0, 1.0)),
        Token::Percentage { unit_value, .. } => Ok(*unit_value),
        _ => Err(parser.new_custom_error(())),
    }
}

/// Parse font-family: a comma separated list of names.
fn parse_font_family<'i>(parser: &mut Parser<'i, '_>) -> ValueResult<'i, Vec<String>> {
    let mut families: Vec<String> = vec![];
    let mut pending_words: Vec<String> = vec![];

    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        let state = parser.state();
        match parser.next()?.clone() {
            // Unquoted names may span several identifiers ("DejaVu Sans").
            Token::Ident(word) => pending_words.push(word.to_string()),
            Token::QuotedString(name) => families.push(name.to_string()),
            Token::Comma => {
                if !pending_words.is_empty() {
                    families.push(pending_words.join(" "));
                    pending_words.clear();
                }
            }
            _ => {
                parser.reset(&state);
                break;
            }
        }
    }

    if !pending_words.is_empty() {
        families.push(pending_words.join(" "));
    }

    if families.is_empty() {
        return Err(parser.new_custom_error(()));
    }
    Ok(families)
}

/// Skip to the next rule (error recovery).
fn skip_to_next_rule(parser: &mut Parser<'_, '_>) {
    let mut depth = 0;
    loop {
        match parser.next() {
            Ok(Token::CurlyBracketBlock) => {
                depth += 1;
                if depth == 1 {
                    let _ = parser.parse_nested_block(|p| {
                        while !p.is_exhausted() {
                            let _ = p.next();
                        }
                        Ok::<_, CssParseError<'_, ()>>(())
                    });
                    return;
                }
            }
            Ok(Token::CloseCurlyBracket) => {
                if depth > 0 {
                    depth -= 1;
                }
                if depth == 0 {
                    return;
                }
            }
            Err(_) => return,
            _ => {}
        }
    }
}

/// Skip to the end of the current declaration (error recovery).
fn skip_declaration(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::Semicolon) | Err(_) => return,
            Ok(Token::CloseCurlyBracket) => return,
            _ => {}
        }
    }
}
