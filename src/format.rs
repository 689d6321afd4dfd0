//! Constrained printf-style formatting.
//!
//! [`format`] understands a small directive grammar:
//!
//! ```text
//!   %%                      literal '%'
//!   %[flags][pad][width]conv
//!
//!   flags  '-' left-justify, '+' force a sign on non-negative d/x
//!   pad    '0', or any character that is neither a digit nor a conversion
//!   width  decimal digits
//!   conv   'd' decimal, 'x' hexadecimal, 's' string
//! ```
//!
//! A `%` that does not start a valid directive consumes the next argument,
//! which is written as a plain string in front of the remaining text.
//! Missing arguments render as nothing. Formatting never fails.
//!
//! Zero padding keeps the sign in front of the zeros (`%05d` of `-42` is
//! `-0042`). Negative hexadecimal renders as a signed magnitude (`-ff`).
//!
//! ## Example Usage
//!
//! ```
//! use shufflekit::mini_format;
//!
//! assert_eq!(mini_format!("%5d|%-5d|", 3, 3), "    3|3    |");
//! assert_eq!(mini_format!("seed %04x", 255), "seed 00ff");
//! assert_eq!(mini_format!("%+d%%", 3), "+3%");
//! assert_eq!(mini_format!("%*6s", "ab"), "****ab");
//! ```

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// Argument accepted by [`format`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatArg {
    Int(i64),
    Str(String),
}

impl FormatArg {
    /// Numeric value: integers as-is, strings if they parse as an integer.
    fn as_int(&self) -> Option<i64> {
        match self {
            FormatArg::Int(n) => Some(*n),
            FormatArg::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Int(n) => write!(f, "{n}"),
            FormatArg::Str(s) => f.write_str(s),
        }
    }
}

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FormatArg {
                fn from(value: $ty) -> Self {
                    FormatArg::Int(i64::from(value))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for FormatArg {
    fn from(value: usize) -> Self {
        FormatArg::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Str(value.to_owned())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Str(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        FormatArg::Str(value.clone())
    }
}

impl From<char> for FormatArg {
    fn from(value: char) -> Self {
        FormatArg::Str(value.to_string())
    }
}

/// Formats `args` into `template`. See the module docs for the grammar.
///
/// ```
/// use shufflekit::format::{format, FormatArg};
///
/// let args = [FormatArg::from(-42), FormatArg::from("ok")];
/// assert_eq!(format("[%05d] %s", &args), "[-0042] ok");
/// ```
pub fn format(template: &str, args: &[FormatArg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut lookahead = chars.clone();
        match Directive::parse(&mut lookahead) {
            Some(directive) => {
                chars = lookahead;
                directive.render(args.next(), &mut out);
            },
            None => {
                if let Some(arg) = args.next() {
                    out.push_str(&arg.to_string());
                }
            },
        }
    }
    out
}

/// Formats with `format`, converting each argument via [`FormatArg::from`].
#[macro_export]
macro_rules! mini_format {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::format::format(
            $template,
            &[$($crate::format::FormatArg::from($arg)),*],
        )
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Decimal,
    Hex,
    Str,
}

impl Conversion {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(Conversion::Decimal),
            'x' => Some(Conversion::Hex),
            's' => Some(Conversion::Str),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Directive {
    left: bool,
    plus: bool,
    pad: char,
    width: usize,
    conversion: Conversion,
}

impl Directive {
    /// Parses the text after a `%`. Leaves `chars` past the directive on success.
    fn parse(chars: &mut Peekable<Chars<'_>>) -> Option<Self> {
        let mut left = false;
        let mut plus = false;
        while let Some(&flag @ ('-' | '+')) = chars.peek() {
            match flag {
                '-' => left = true,
                _ => plus = true,
            }
            chars.next();
        }

        let mut pad = ' ';
        if let Some(&c) = chars.peek()
            && c != '%'
            && (c == '0' || (!c.is_ascii_digit() && Conversion::from_char(c).is_none()))
        {
            pad = c;
            chars.next();
        }

        let mut width = 0usize;
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            width = width.saturating_mul(10).saturating_add(digit as usize);
            chars.next();
        }

        let conversion = chars.next().and_then(Conversion::from_char)?;
        Some(Self {
            left,
            plus,
            pad,
            width,
            conversion,
        })
    }

    fn render(&self, arg: Option<&FormatArg>, out: &mut String) {
        let Some(arg) = arg else {
            self.pad_into(out, "", "");
            return;
        };

        let number = match self.conversion {
            Conversion::Str => None,
            Conversion::Decimal | Conversion::Hex => arg.as_int(),
        };
        let Some(n) = number else {
            self.pad_into(out, "", &arg.to_string());
            return;
        };

        let sign = if n < 0 {
            "-"
        } else if self.plus {
            "+"
        } else {
            ""
        };
        let digits = match self.conversion {
            Conversion::Hex => format!("{:x}", n.unsigned_abs()),
            _ => n.unsigned_abs().to_string(),
        };
        self.pad_into(out, sign, &digits);
    }

    fn pad_into(&self, out: &mut String, sign: &str, body: &str) {
        let used = sign.chars().count() + body.chars().count();
        let fill = self.width.saturating_sub(used);

        if self.left {
            let pad = if self.pad == '0' { ' ' } else { self.pad };
            out.push_str(sign);
            out.push_str(body);
            out.extend(std::iter::repeat_n(pad, fill));
        } else if self.pad == '0' {
            out.push_str(sign);
            out.extend(std::iter::repeat_n('0', fill));
            out.push_str(body);
        } else {
            out.extend(std::iter::repeat_n(self.pad, fill));
            out.push_str(sign);
            out.push_str(body);
        }
    }
}
