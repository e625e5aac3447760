//! Static lookup tables for service ids.

/// Code block language names indexed by `language id - 1`.
const LANGUAGES: [&str; 75] = [
    "plaintext",
    "abap",
    "ada",
    "apache",
    "apex",
    "assembly",
    "bash",
    "csharp",
    "cpp",
    "c",
    "cobol",
    "css",
    "coffeescript",
    "d",
    "dart",
    "delphi",
    "django",
    "dockerfile",
    "erlang",
    "fortran",
    "foxpro",
    "go",
    "groovy",
    "html",
    "htmlbars",
    "http",
    "haskell",
    "json",
    "java",
    "javascript",
    "julia",
    "kotlin",
    "latex",
    "lisp",
    "logo",
    "lua",
    "matlab",
    "makefile",
    "markdown",
    "nginx",
    "objectivec",
    "openedgeabl",
    "php",
    "perl",
    "postscript",
    "powershell",
    "prolog",
    "protobuf",
    "python",
    "r",
    "rpg",
    "ruby",
    "rust",
    "sas",
    "scss",
    "sql",
    "scala",
    "scheme",
    "scratch",
    "shell",
    "swift",
    "thrift",
    "typescript",
    "vbscript",
    "vbnet",
    "xml",
    "yaml",
    "cmake",
    "diff",
    "gherkin",
    "graphql",
    "glsl",
    "properties",
    "solidity",
    "toml",
];

/// Fence language for a service language id; unknown ids map to `plaintext`.
#[must_use]
pub fn code_language(id: Option<u32>) -> &'static str {
    id.and_then(|id| usize::try_from(id).ok())
        .and_then(|id| id.checked_sub(1))
        .and_then(|index| LANGUAGES.get(index))
        .copied()
        .unwrap_or(LANGUAGES[0])
}

/// Unicode emoji for a callout emoji id.
#[must_use]
pub fn emoji(id: &str) -> Option<&'static str> {
    let emoji = match id {
        "bulb" => "💡",
        "dog" => "🐶",
        "cat" => "🐱",
        "pushpin" => "📌",
        "round_pushpin" => "📍",
        "star" => "⭐",
        "fire" => "🔥",
        "gift" => "🎁",
        "warning" => "⚠️",
        "exclamation" => "❗",
        "question" => "❓",
        "x" => "❌",
        "white_check_mark" => "✅",
        "heavy_check_mark" => "✔️",
        "information_source" => "ℹ️",
        "no_entry" => "⛔",
        "construction" => "🚧",
        "memo" => "📝",
        "books" => "📚",
        "book" => "📖",
        "bookmark" => "🔖",
        "link" => "🔗",
        "lock" => "🔒",
        "key" => "🔑",
        "bell" => "🔔",
        "loudspeaker" => "📢",
        "mega" => "📣",
        "rocket" => "🚀",
        "tada" => "🎉",
        "sparkles" => "✨",
        "zap" => "⚡",
        "hourglass" => "⌛",
        "alarm_clock" => "⏰",
        "calendar" => "📅",
        "eyes" => "👀",
        "thumbsup" => "👍",
        "thumbsdown" => "👎",
        "smile" => "😄",
        "heart" => "❤️",
        "speech_balloon" => "💬",
        "thought_balloon" => "💭",
        "dart" => "🎯",
        "trophy" => "🏆",
        "wrench" => "🔧",
        "hammer" => "🔨",
        "gear" => "⚙️",
        "mag" => "🔍",
        "chart_with_upwards_trend" => "📈",
        "chart_with_downwards_trend" => "📉",
        "clipboard" => "📋",
        "package" => "📦",
        "triangular_flag_on_post" => "🚩",
        "beginner" => "🔰",
        "100" => "💯",
        _ => return None,
    };
    Some(emoji)
}
