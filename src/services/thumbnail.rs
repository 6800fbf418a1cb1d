use crate::utils::escape_markup;

pub const WIDTH: u32 = 480;
pub const HEIGHT: u32 = 300;

pub type Gradient = (&'static str, &'static str);

pub const PALETTES: [Gradient; 7] = [
    ("#1e3a8a", "#3b82f6"),
    ("#7e22ce", "#a855f7"),
    ("#be123c", "#f43f5e"),
    ("#075985", "#0ea5e9"),
    ("#065f46", "#10b981"),
    ("#92400e", "#f59e0b"),
    ("#78350f", "#d97706"),
];

/// A generated cover: a label over a diagonal two-colour gradient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub text: String,
    pub gradient: Gradient,
}

impl Thumbnail {
    pub fn for_game(id: &str, title: &str) -> Self {
        let text = match initials(title) {
            text if text.is_empty() => id.chars().take(2).collect::<String>().to_uppercase(),
            text => text,
        };

        Self {
            text,
            gradient: pick_gradient(id),
        }
    }

    pub fn to_svg(&self) -> String {
        let (from, to) = self.gradient;
        format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" preserveAspectRatio="xMidYMid slice">
  <defs><linearGradient id="g" x1="0" y1="0" x2="1" y2="1"><stop stop-color="{from}"/><stop offset="1" stop-color="{to}"/></linearGradient></defs>
  <rect width="{w}" height="{h}" fill="url(#g)"/>
  <text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" font-family="system-ui,Segoe UI,Roboto" font-size="120" font-weight="600" fill="rgba(255,255,255,.9)" letter-spacing="4">{text}</text>
</svg>"##,
            w = WIDTH,
            h = HEIGHT,
            from = from,
            to = to,
            text = escape_markup(&self.text),
        )
    }
}

/// First letters of the first two words, uppercased.
pub fn initials(title: &str) -> String {
    title
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase()
}

/// Same id, same colours: the character codes are summed modulo the palette size.
pub fn pick_gradient(id: &str) -> Gradient {
    let hash = id
        .chars()
        .fold(0usize, |acc, c| (acc + c as usize) % PALETTES.len());
    PALETTES[hash]
}
