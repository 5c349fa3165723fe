//! Unit string parsing - parse expressions like "joule / (gram * kelvin)"

use crate::units::UNITS;
use crate::{Quantity, Unit};
use thermo_core::CalcError;

/// Parse a unit expression into a Unit
///
/// Supported formats:
/// - Names, symbols and aliases: "m", "kelvin", "delta_degree_Celsius"
/// - Products: "kg*m", "N·m", "gram kelvin"
/// - Quotients (left-associative): "m/s", "J/kg/K"
/// - Parentheses: "joule / (gram * kelvin)"
/// - Powers: "meter ** 3", "s^-1", "m³", "s⁻¹"
/// - The dimensionless one: "1 / kelvin"
pub fn parse_unit(s: &str) -> Result<Unit, CalcError> {
    let s = s.trim();

    if s.is_empty() {
        return Ok(Unit::dimensionless());
    }

    // Simple lookup first keeps the kind of bare temperature units
    if let Some(unit) = UNITS.get(s) {
        return Ok(unit.clone());
    }

    let tokens = tokenize(s)?;
    let mut parser = Parser { source: s, tokens, pos: 0 };
    let unit = parser.parse_expression()?;

    if let Some(token) = parser.peek() {
        return Err(CalcError::unit_parse(s, format!("unexpected {}", token.describe())));
    }
    Ok(unit)
}

/// Parse a quantity string like "5 m", "100kg" or "-3.5 delta_degC"
pub fn parse_quantity_string(s: &str) -> Result<Quantity, CalcError> {
    let s = s.trim();

    let numeric_len: usize = s
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .map(|(_, c)| c.len_utf8())
        .sum();

    // Longest numeric prefix wins, so "5eV" is 5 electronvolts
    let (value, unit_str) = (1..=numeric_len)
        .rev()
        .find_map(|end| s[..end].parse::<f64>().ok().map(|v| (v, &s[end..])))
        .ok_or_else(|| CalcError::unit_parse(s, "no number found"))?;

    Quantity::parse(value, unit_str)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Name(String),
    Number(String),
    Superscript(i32),
    Mul,
    Div,
    Pow,
    Minus,
    Plus,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Name(n) => format!("name '{}'", n),
            Token::Number(n) => format!("number '{}'", n),
            Token::Superscript(e) => format!("superscript {}", e),
            Token::Mul => "'*'".to_string(),
            Token::Div => "'/'".to_string(),
            Token::Pow => "'**'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Plus => "'+'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
        }
    }
}

fn superscript_digit(c: char) -> Option<i32> {
    "⁰¹²³⁴⁵⁶⁷⁸⁹".chars().position(|d| d == c).map(|p| p as i32)
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '_' | '°' | 'Δ' | 'μ')
}

fn tokenize(s: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = s.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Pow);
                i += 2;
            }
            '*' | '·' => {
                tokens.push(Token::Mul);
                i += 1;
            }
            '^' => {
                tokens.push(Token::Pow);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Div);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '⁻' | '⁰'..='⁹' | '¹' | '²' | '³' => {
                let negative = c == '⁻';
                if negative {
                    i += 1;
                }
                let mut exp = 0i32;
                let start = i;
                while let Some(d) = chars.get(i).copied().and_then(superscript_digit) {
                    exp = exp
                        .checked_mul(10)
                        .and_then(|e| e.checked_add(d))
                        .ok_or_else(|| CalcError::unit_parse(s, "superscript exponent is too large"))?;
                    i += 1;
                }
                if i == start {
                    return Err(CalcError::unit_parse(s, "superscript exponent without digits"));
                }
                tokens.push(Token::Superscript(if negative { -exp } else { exp }));
            }
            c if c.is_ascii_digit() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                tokens.push(Token::Number(chars[start..i].iter().collect()));
            }
            c if is_name_start(c) => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_alphanumeric() || is_name_start(chars[i]))
                    && superscript_digit(chars[i]).is_none()
                {
                    i += 1;
                }
                tokens.push(Token::Name(chars[start..i].iter().collect()));
            }
            other => {
                return Err(CalcError::unit_parse(s, format!("unexpected character '{}'", other)));
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn error(&self, reason: impl Into<String>) -> CalcError {
        CalcError::unit_parse(self.source, reason)
    }

    /// Turn algebra failures (offset units in a product) into parse failures
    fn algebra(&self, result: Result<Unit, CalcError>) -> Result<Unit, CalcError> {
        result.map_err(|e| self.error(e.to_string()))
    }

    /// expression := power (('*' | '/' | juxtaposition) power)*
    fn parse_expression(&mut self) -> Result<Unit, CalcError> {
        let mut result = self.parse_power()?;

        loop {
            match self.peek() {
                Some(Token::Mul) => {
                    self.next();
                    let rhs = self.parse_power()?;
                    result = self.algebra(result.multiply(&rhs))?;
                }
                Some(Token::Div) => {
                    self.next();
                    let rhs = self.parse_power()?;
                    result = self.algebra(result.divide(&rhs))?;
                }
                Some(Token::Name(_)) | Some(Token::Number(_)) | Some(Token::LParen) => {
                    let rhs = self.parse_power()?;
                    result = self.algebra(result.multiply(&rhs))?;
                }
                _ => return Ok(result),
            }
        }
    }

    /// power := atom (('**' | '^') exponent | superscript)?
    fn parse_power(&mut self) -> Result<Unit, CalcError> {
        let base = self.parse_atom()?;

        match self.peek() {
            Some(Token::Pow) => {
                self.next();
                let exp = self.parse_exponent()?;
                self.algebra(base.power(exp))
            }
            Some(Token::Superscript(exp)) => {
                let exp = *exp;
                self.next();
                self.algebra(base.power(exp))
            }
            _ => Ok(base),
        }
    }

    /// exponent := ['+' | '-'] integer | '(' exponent ')'
    fn parse_exponent(&mut self) -> Result<i32, CalcError> {
        match self.next() {
            Some(Token::LParen) => {
                let exp = self.parse_exponent()?;
                match self.next() {
                    Some(Token::RParen) => Ok(exp),
                    _ => Err(self.error("unclosed parenthesis in exponent")),
                }
            }
            Some(Token::Minus) => Ok(-self.parse_exponent()?),
            Some(Token::Plus) => self.parse_exponent(),
            Some(Token::Number(n)) => n
                .parse::<i32>()
                .map_err(|_| self.error(format!("invalid exponent: {}", n))),
            Some(other) => Err(self.error(format!("invalid exponent: {}", other.describe()))),
            None => Err(self.error("missing exponent")),
        }
    }

    /// atom := name | '1' | '(' expression ')'
    fn parse_atom(&mut self) -> Result<Unit, CalcError> {
        match self.next() {
            Some(Token::Name(name)) => UNITS
                .get(&name)
                .cloned()
                .ok_or_else(|| self.error(format!("unknown unit '{}'", name))),
            Some(Token::Number(n)) if n == "1" => Ok(Unit::dimensionless()),
            Some(Token::Number(n)) => Err(self.error(format!(
                "numeric factor '{}' is not a unit (only 1 is allowed)",
                n
            ))),
            Some(Token::LParen) => {
                let inner = self.parse_expression()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(self.error("unbalanced parentheses")),
                }
            }
            Some(other) => Err(self.error(format!("unexpected {}", other.describe()))),
            None => Err(self.error("unexpected end of expression")),
        }
    }
}
