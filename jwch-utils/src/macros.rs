#[macro_export]
macro_rules! selector {
    ($e: expr) => {{
        use ::once_cell::sync::Lazy;
        use ::scraper::Selector;
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($e).unwrap());
        &*SELECTOR
    }};
}

#[macro_export]
macro_rules! regex {
    ($e: expr) => {{
        use ::once_cell::sync::Lazy;
        use ::regex::Regex;
        static PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new($e).unwrap());
        &*PATTERN
    }};
}

/// Captures group `$i` of `$re` in `$s`, or `None` when the pattern does not match.
#[macro_export]
macro_rules! capture {
    ($re: expr, $s: expr, $i: expr) => {
        $crate::regex!($re)
            .captures($s)
            .and_then(|c| c.get($i))
            .map(|m| m.as_str())
    };
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    #[test]
    fn selector_is_reusable() {
        let html = Html::parse_fragment(r#"<ul><li class="a">x</li><li class="a">y</li></ul>"#);
        for _ in 0..2 {
            let texts: Vec<String> = html
                .select(selector!("li.a"))
                .map(|e| e.text().collect())
                .collect();
            assert_eq!(texts, ["x", "y"]);
        }
    }

    #[test]
    fn capture_group() {
        assert_eq!(
            capture!(r"token=(.*?)&", "a?token=abc&id=1", 1),
            Some("abc")
        );
        assert_eq!(capture!(r"token=(.*?)&", "a?id=1", 1), None);
    }
}
