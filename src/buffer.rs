//! A growable byte buffer with a printf-style formatted append.
//!
//! Grounded in the source tool's `mget_buffer_t` / `buffer_printf.c`: the
//! request builder and the Digest-auth code compose their output by
//! nested formatted appends, so the flag/width/precision semantics here
//! are load-bearing and are kept byte-for-byte compatible with a C
//! `vsnprintf` subset rather than reimplemented against `std::fmt`.

use std::fmt;

/// One formatted argument. Rust has no varargs, so call sites build this
/// slice explicitly instead of passing a `...` pack.
#[derive(Debug, Clone)]
pub enum Arg<'a> {
    Str(Option<&'a str>),
    Int(i64),
    UInt(u64),
    Ptr(usize),
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(Some(s))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    fn from(s: Option<&'a str>) -> Self {
        Arg::Str(s)
    }
}

impl From<i64> for Arg<'_> {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}

impl From<i32> for Arg<'_> {
    fn from(v: i32) -> Self {
        Arg::Int(v as i64)
    }
}

impl From<u64> for Arg<'_> {
    fn from(v: u64) -> Self {
        Arg::UInt(v)
    }
}

impl From<usize> for Arg<'_> {
    fn from(v: usize) -> Self {
        Arg::UInt(v as u64)
    }
}

const FLAG_ZERO_PADDED: u32 = 1;
const FLAG_LEFT_ADJUST: u32 = 2;
const FLAG_SIGNED: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    pub fn new() -> Self {
        ByteBuffer { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ByteBuffer {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn append_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    pub fn append_byte_repeated(&mut self, byte: u8, count: usize) {
        self.data.resize(self.data.len() + count, byte);
    }

    pub fn append_other_buffer(&mut self, other: &ByteBuffer) {
        self.append_bytes(&other.data);
    }

    /// Appends the result of a C-`printf`-style format string.
    ///
    /// Supports `%s %d %i %u %x %X %o %p %%`, the `0 - #` flags, a
    /// literal or `*`-supplied field width and precision, and ignores
    /// (but correctly consumes) the `h hh l ll L z` length modifiers
    /// since every `Arg` already carries its own width.
    pub fn printf_append(&mut self, fmt: &str, args: &[Arg]) {
        let bytes = fmt.as_bytes();
        let mut i = 0;
        let mut argi = 0;
        let mut next_arg = || -> Arg {
            let a = args.get(argi).cloned().unwrap_or(Arg::Int(0));
            argi += 1;
            a
        };

        while i < bytes.len() {
            let start = i;
            while i < bytes.len() && bytes[i] != b'%' {
                i += 1;
            }
            if i > start {
                self.append_bytes(&bytes[start..i]);
            }
            if i >= bytes.len() {
                break;
            }

            let percent_pos = i;
            i += 1; // consume '%'
            if i >= bytes.len() {
                self.append_bytes(b"%");
                break;
            }

            if bytes[i] == b'%' {
                self.append_bytes(b"%");
                i += 1;
                continue;
            }

            // Flags.
            let mut flags = 0u32;
            while i < bytes.len() {
                match bytes[i] {
                    b'0' => flags |= FLAG_ZERO_PADDED,
                    b'-' => flags |= FLAG_LEFT_ADJUST,
                    b'#' => {}
                    _ => break,
                }
                i += 1;
            }

            // Field width.
            let field_width = if i < bytes.len() && bytes[i] == b'*' {
                i += 1;
                match next_arg() {
                    Arg::Int(v) => {
                        if v < 0 {
                            flags |= FLAG_LEFT_ADJUST;
                            (-v) as usize
                        } else {
                            v as usize
                        }
                    }
                    Arg::UInt(v) => v as usize,
                    _ => 0,
                }
            } else {
                let mut w = 0usize;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    w = w * 10 + (bytes[i] - b'0') as usize;
                    i += 1;
                }
                w
            };

            // Precision.
            let precision: Option<usize> = if i < bytes.len() && bytes[i] == b'.' {
                i += 1;
                if i < bytes.len() && bytes[i] == b'*' {
                    i += 1;
                    match next_arg() {
                        Arg::Int(v) => Some(v.max(0) as usize),
                        Arg::UInt(v) => Some(v as usize),
                        _ => Some(0),
                    }
                } else {
                    let mut p = 0usize;
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        p = p * 10 + (bytes[i] - b'0') as usize;
                        i += 1;
                    }
                    Some(p)
                }
            } else {
                None
            };

            // Length modifiers: consumed but otherwise ignored.
            while i < bytes.len() && matches!(bytes[i], b'h' | b'l' | b'L' | b'z') {
                i += 1;
            }

            if i >= bytes.len() {
                // Unterminated conversion: treat like an unknown specifier.
                self.append_bytes(b"%");
                i = percent_pos + 1;
                continue;
            }

            let conv = bytes[i];
            i += 1;

            match conv {
                b's' => {
                    let s = match next_arg() {
                        Arg::Str(s) => s.map(|s| s.to_string()),
                        _ => None,
                    };
                    copy_string(self, flags, field_width, precision, s.as_deref());
                }
                b'p' => {
                    let p = match next_arg() {
                        Arg::UInt(v) => v as usize,
                        Arg::Int(v) => v as usize,
                        Arg::Ptr(v) => v,
                        _ => 0,
                    };
                    convert_pointer(self, p);
                }
                b'd' | b'i' => {
                    let v = match next_arg() {
                        Arg::Int(v) => v,
                        Arg::UInt(v) => v as i64,
                        _ => 0,
                    };
                    convert_dec(self, flags | FLAG_SIGNED, field_width, precision, v, 10, false);
                }
                b'u' => {
                    let v = match next_arg() {
                        Arg::UInt(v) => v as i64,
                        Arg::Int(v) => v,
                        _ => 0,
                    };
                    convert_dec(self, flags, field_width, precision, v, 10, false);
                }
                b'x' => {
                    let v = match next_arg() {
                        Arg::UInt(v) => v as i64,
                        Arg::Int(v) => v,
                        _ => 0,
                    };
                    convert_dec(self, flags, field_width, precision, v, 16, false);
                }
                b'X' => {
                    let v = match next_arg() {
                        Arg::UInt(v) => v as i64,
                        Arg::Int(v) => v,
                        _ => 0,
                    };
                    convert_dec(self, flags, field_width, precision, v, 16, true);
                }
                b'o' => {
                    let v = match next_arg() {
                        Arg::UInt(v) => v as i64,
                        Arg::Int(v) => v,
                        _ => 0,
                    };
                    convert_dec(self, flags, field_width, precision, v, 8, false);
                }
                _ => {
                    // Unknown specifier: emit literal '%' and rewind to
                    // just after it.
                    self.append_bytes(b"%");
                    i = percent_pos + 1;
                }
            }
        }
    }

    /// Like `printf_append` but clears the buffer first.
    pub fn printf_reset(&mut self, fmt: &str, args: &[Arg]) {
        self.clear();
        self.printf_append(fmt, args);
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn copy_string(
    buf: &mut ByteBuffer,
    flags: u32,
    field_width: usize,
    precision: Option<usize>,
    arg: Option<&str>,
) {
    let s = match arg {
        Some(s) => s,
        None => {
            buf.append_str("(null)");
            return;
        }
    };

    let mut length = s.len();
    if let Some(p) = precision {
        if length > p {
            length = p;
        }
    }
    let slice = &s.as_bytes()[..length];

    if field_width > length {
        let pad = field_width - length;
        if flags & FLAG_LEFT_ADJUST != 0 {
            buf.append_bytes(slice);
            buf.append_byte_repeated(b' ', pad);
        } else {
            buf.append_byte_repeated(b' ', pad);
            buf.append_bytes(slice);
        }
    } else {
        buf.append_bytes(slice);
    }
}

fn convert_pointer(buf: &mut ByteBuffer, ptr: usize) {
    if ptr == 0 {
        buf.append_str("0x0");
        return;
    }
    buf.append_str("0x");
    let hex = format!("{:x}", ptr);
    buf.append_str(&hex);
}

/// Mirrors `_convert_dec` from `buffer_printf.c`: precision controls the
/// minimum digit count (zero-padded), field width controls total width,
/// and the `0` flag is ignored whenever a precision was given.
fn convert_dec(
    buf: &mut ByteBuffer,
    flags: u32,
    field_width: usize,
    precision: Option<usize>,
    value: i64,
    radix: u32,
    upper: bool,
) {
    let (minus, mag) = if flags & FLAG_SIGNED != 0 && value < 0 {
        (true, (value as i128).unsigned_abs() as u64)
    } else {
        (false, value as u64)
    };

    let mut digits = String::new();
    if mag == 0 {
        digits.push('0');
        digits.clear(); // an explicit zero is only emitted via precision/length below
    }
    let mut v = mag;
    if v == 0 {
        // fall through: length 0 is valid, precision governs zero-fill
    } else {
        let mut tmp = Vec::new();
        while v > 0 {
            let d = (v % radix as u64) as u32;
            let c = std::char::from_digit(d, radix).unwrap();
            tmp.push(if upper { c.to_ascii_uppercase() } else { c });
            v /= radix as u64;
        }
        tmp.reverse();
        digits.extend(tmp);
    }

    let length = digits.len();
    let (precision, zero_flag) = match precision {
        Some(p) => (p, flags & !FLAG_ZERO_PADDED),
        None => (1, flags),
    };

    let digit_part_len = length.max(precision);
    let total_len = digit_part_len + if minus { 1 } else { 0 };

    if field_width > total_len {
        let pad = field_width - total_len;
        if zero_flag & FLAG_LEFT_ADJUST != 0 {
            if minus {
                buf.append_bytes(b"-");
            }
            if length < precision {
                buf.append_byte_repeated(b'0', precision - length);
            }
            buf.append_str(&digits);
            buf.append_byte_repeated(b' ', pad);
        } else if zero_flag & FLAG_ZERO_PADDED != 0 {
            if minus {
                buf.append_bytes(b"-");
            }
            buf.append_byte_repeated(b'0', pad + precision.saturating_sub(length));
            buf.append_str(&digits);
        } else {
            buf.append_byte_repeated(b' ', pad);
            if minus {
                buf.append_bytes(b"-");
            }
            if length < precision {
                buf.append_byte_repeated(b'0', precision - length);
            }
            buf.append_str(&digits);
        }
    } else {
        if minus {
            buf.append_bytes(b"-");
        }
        if length < precision {
            buf.append_byte_repeated(b'0', precision - length);
        }
        buf.append_str(&digits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(fmt: &str, args: &[Arg]) -> String {
        let mut b = ByteBuffer::new();
        b.printf_append(fmt, args);
        b.as_str().to_string()
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(render("hello world", &[]), "hello world");
    }

    #[test]
    fn percent_literal() {
        assert_eq!(render("100%%", &[]), "100%");
    }

    #[test]
    fn string_conversion() {
        assert_eq!(render("%s:%s", &[Arg::from("a"), Arg::from("b")]), "a:b");
    }

    #[test]
    fn null_string_renders_as_null_literal() {
        assert_eq!(render("%s", &[Arg::from(None)]), "(null)");
    }

    #[test]
    fn string_precision_truncates() {
        assert_eq!(render("%.3s", &[Arg::from("hello")]), "hel");
    }

    #[test]
    fn string_field_width_pads_right_adjusted() {
        assert_eq!(render("[%5s]", &[Arg::from("ab")]), "[   ab]");
    }

    #[test]
    fn string_field_width_left_adjust() {
        assert_eq!(render("[%-5s]", &[Arg::from("ab")]), "[ab   ]");
    }

    #[test]
    fn decimal_conversion() {
        assert_eq!(render("%d", &[Arg::from(42i64)]), "42");
        assert_eq!(render("%d", &[Arg::from(-7i64)]), "-7");
    }

    #[test]
    fn decimal_precision_zero_pads_digits_only() {
        assert_eq!(render("%.4d", &[Arg::from(7i64)]), "0007");
        assert_eq!(render("%.4d", &[Arg::from(-7i64)]), "-0007");
    }

    #[test]
    fn decimal_zero_flag_ignored_with_precision() {
        assert_eq!(render("%08.4d", &[Arg::from(7i64)]), "    0007");
    }

    #[test]
    fn decimal_zero_flag_pads_with_zeros() {
        assert_eq!(render("%08d", &[Arg::from(42i64)]), "00000042");
        assert_eq!(render("%08d", &[Arg::from(-42i64)]), "-0000042");
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(render("%x", &[Arg::from(255u64)]), "ff");
        assert_eq!(render("%X", &[Arg::from(255u64)]), "FF");
    }

    #[test]
    fn octal_conversion() {
        assert_eq!(render("%o", &[Arg::from(8u64)]), "10");
    }

    #[test]
    fn pointer_conversion() {
        assert_eq!(render("%p", &[Arg::from(0usize)]), "0x0");
        assert_eq!(render("%p", &[Arg::from(0x1Fusize)]), "0x1f");
    }

    #[test]
    fn unknown_specifier_emits_literal_percent() {
        // %q is not a recognized conversion; the '%' is emitted and
        // parsing continues right after it.
        assert_eq!(render("%q", &[]), "%q");
    }

    #[test]
    fn star_field_width_and_precision() {
        assert_eq!(
            render("%*.*d", &[Arg::from(6i64), Arg::from(3i64), Arg::from(7i64)]),
            "   007"
        );
    }

    #[test]
    fn buffer_grows_and_stays_consistent() {
        let mut b = ByteBuffer::new();
        for _ in 0..100 {
            b.append_str("0123456789");
        }
        assert_eq!(b.len(), 1000);
    }

    #[test]
    fn printf_reset_clears_first() {
        let mut b = ByteBuffer::new();
        b.append_str("stale");
        b.printf_reset("%s", &[Arg::from("fresh")]);
        assert_eq!(b.as_str(), "fresh");
    }
}
