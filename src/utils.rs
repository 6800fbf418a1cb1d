use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Orders strings the way people read them: digit runs compare by value,
/// so `g2` comes before `g10`. Letters compare case-insensitively and
/// punctuation sorts before digits, which sort before letters. Strings that
/// differ only in case put lowercase first.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    primary_cmp(a, b)
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn primary_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let ord = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                compare_numbers(&take_digits(&mut left), &take_digits(&mut right))
            }
            (Some(x), Some(y)) => {
                left.next();
                right.next();
                sort_key(x).cmp(&sort_key(y))
            }
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

/// Punctuation and spaces, then digits, then letters.
fn sort_key(c: char) -> (u8, char) {
    let class = if c.is_ascii_digit() {
        1
    } else if c.is_alphabetic() {
        2
    } else {
        0
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        digits.push(c);
    }
    digits
}

fn compare_numbers(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

/// At the first letter that differs only in case, lowercase wins.
fn case_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .find(|(x, y)| x != y)
        .map_or(Ordering::Equal, |(x, y)| {
            match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => Ordering::Equal,
            }
        })
}

/// Escapes text for HTML and XML bodies and double-quoted attributes.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
