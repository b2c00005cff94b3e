/// GitHub's display colors for common languages.
const LANGUAGE_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("JavaScript", (0xf1, 0xe0, 0x5a)),
    ("TypeScript", (0x2b, 0x74, 0x89)),
    ("Python", (0x35, 0x72, 0xa5)),
    ("Java", (0xb0, 0x72, 0x19)),
    ("C++", (0xf3, 0x4b, 0x7d)),
    ("C#", (0x23, 0x91, 0x20)),
    ("PHP", (0x4f, 0x5d, 0x95)),
    ("Ruby", (0x70, 0x15, 0x16)),
    ("Go", (0x00, 0xad, 0xd8)),
    ("Rust", (0xde, 0xa5, 0x84)),
    ("Swift", (0xff, 0xac, 0x45)),
    ("Kotlin", (0xf1, 0x8e, 0x33)),
    ("HTML", (0xe3, 0x4c, 0x26)),
    ("CSS", (0x15, 0x72, 0xb6)),
    ("Vue", (0x4f, 0xc0, 0x8d)),
    ("Dart", (0x01, 0x75, 0xc2)),
    ("C", (0x55, 0x55, 0x55)),
    ("Shell", (0x89, 0xe0, 0x51)),
    ("Dockerfile", (0x38, 0x4d, 0x54)),
    ("SCSS", (0xc6, 0x53, 0x8c)),
    ("Less", (0x1d, 0x36, 0x5d)),
    ("Sass", (0xa5, 0x3b, 0x70)),
    ("JSON", (0x29, 0x29, 0x29)),
    ("XML", (0x00, 0x60, 0xac)),
    ("Markdown", (0x08, 0x3f, 0xa1)),
    ("YAML", (0xcb, 0x17, 0x1e)),
    ("Jupyter Notebook", (0xda, 0x5b, 0x0b)),
    ("R", (0x19, 0x8c, 0xe7)),
    ("Scala", (0xc2, 0x2d, 0x40)),
    ("Perl", (0x02, 0x98, 0xc3)),
    ("Lua", (0x00, 0x00, 0x80)),
    ("Objective-C", (0x43, 0x8e, 0xff)),
    ("Assembly", (0x6e, 0x4c, 0x13)),
    ("PowerShell", (0x01, 0x24, 0x56)),
];

const FALLBACK: (u8, u8, u8) = (0x58, 0x60, 0x69);

/// RGB color used to mark `language`, gray when unknown.
pub fn language_color(language: &str) -> (u8, u8, u8) {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map_or(FALLBACK, |&(_, rgb)| rgb)
}
