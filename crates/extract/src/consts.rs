use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

regex!(WHITESPACE_REGEX, r"\s+");
// Everything that isn't a word character, whitespace, or one of `-+(),'`.
regex!(KEY_STRIP_REGEX, r"[^\w\s\-+(),']");
