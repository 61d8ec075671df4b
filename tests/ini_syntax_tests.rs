use ini_reader::{ConfigStore, IniScanner, ParseOutcome, ScannerOptions, StoreConfig};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn parse_with_options(text: &str, options: ScannerOptions) -> ConfigStore {
    ConfigStore::parse_with(
        text,
        &IniScanner::with_options(options),
        StoreConfig::default(),
    )
}

#[cfg(test)]
mod ini_syntax_tests {
    use super::*;

    #[test]
    fn test_keys_before_first_section_are_global() {
        init_logging();
        let store = ConfigStore::parse("name = top\n[after]\nname = inner\n");

        assert!(store.parse_outcome().is_success());
        assert_eq!(store.get("", "name", ""), "top");
        assert_eq!(store.get("after", "name", ""), "inner");
        assert_eq!(store.sections(), vec!["", "after"]);
    }

    #[test]
    fn test_colon_and_equals_delimiters() {
        let store = ConfigStore::parse("[s]\na: 1\nb = 2\nc:3=4\nd=5:6\n");

        assert_eq!(store.get("s", "a", ""), "1");
        assert_eq!(store.get("s", "b", ""), "2");
        assert_eq!(store.get("s", "c", ""), "3=4");
        assert_eq!(store.get("s", "d", ""), "5:6");
    }

    #[test]
    fn test_whitespace_is_trimmed_around_names_and_values() {
        let store = ConfigStore::parse("[s]\n   spaced name   =    spaced value   \r\n");

        assert_eq!(store.get("s", "spaced name", ""), "spaced value");
        assert_eq!(store.fields("s"), vec!["spaced name"]);
    }

    #[test]
    fn test_empty_values_are_stored() {
        let store = ConfigStore::parse("[s]\nempty =\n");

        assert!(store.has_value("s", "empty"));
        assert_eq!(store.get("s", "empty", "default"), "");
        assert_eq!(store.get_integer("s", "empty", 5), 5);
    }

    #[test]
    fn test_section_names_are_verbatim() {
        let store = ConfigStore::parse("[ Padded Name ]\nk = v\n[x] trailing text\ny = z\n");

        assert_eq!(store.sections(), vec![" Padded Name ", "x"]);
        assert_eq!(store.get(" padded name ", "k", ""), "v");
        assert_eq!(store.get("X", "y", ""), "z");
    }

    #[test]
    fn test_comment_styles() {
        let text = "\
; semicolon comment
# hash comment
[s] ; after header
a = 1 ; after value
b = 2 # hash is not an inline comment by default
c = http://example.com/;path
";
        let store = ConfigStore::parse(text);

        assert!(store.parse_outcome().is_success());
        assert_eq!(store.get("s", "a", ""), "1");
        assert_eq!(
            store.get("s", "b", ""),
            "2 # hash is not an inline comment by default"
        );
        assert_eq!(store.get("s", "c", ""), "http://example.com/;path");
    }

    #[test]
    fn test_custom_comment_prefixes() {
        let options = ScannerOptions::new()
            .with_start_comment_prefixes("!")
            .with_inline_comment_prefixes("#");
        let store = parse_with_options("! bang comment\n[s]\na = 1 # note\nb = 2 ; kept\n", options);

        assert!(store.parse_outcome().is_success());
        assert_eq!(store.get("s", "a", ""), "1");
        assert_eq!(store.get("s", "b", ""), "2 ; kept");
    }

    #[test]
    fn test_inline_comments_disabled() {
        let options = ScannerOptions::new().with_inline_comments(false);
        let store = parse_with_options("[s]\na = 1 ; not a comment\n", options);

        assert_eq!(store.get("s", "a", ""), "1 ; not a comment");
    }

    #[test]
    fn test_multiline_values_accumulate() {
        let text = "\
[message]
body = first line
  second line
\tthird line ; comment
other = x
";
        let store = ConfigStore::parse(text);

        assert!(store.parse_outcome().is_success());
        assert_eq!(
            store.get("message", "body", ""),
            "first line\nsecond line\nthird line"
        );
        assert_eq!(store.get("message", "other", ""), "x");
        assert_eq!(store.fields("message"), vec!["body", "other"]);
    }

    #[test]
    fn test_indented_line_after_header_is_an_entry() {
        let store = ConfigStore::parse("[s]\n    key = value\n");

        assert!(store.parse_outcome().is_success());
        assert_eq!(store.get("s", "key", ""), "value");
    }

    #[test]
    fn test_indented_comment_is_not_a_continuation() {
        let store = ConfigStore::parse("[s]\nkey = value\n    ; just a note\n");

        assert!(store.parse_outcome().is_success());
        assert_eq!(store.get("s", "key", ""), "value");
    }

    #[test]
    fn test_byte_order_mark() {
        let store = ConfigStore::parse("\u{FEFF}[s]\nk = v\n");
        assert_eq!(store.sections(), vec!["s"]);

        let options = ScannerOptions::new().with_bom(false);
        let store = parse_with_options("\u{FEFF}[s]\nk = v\n", options);
        assert_eq!(store.parse_outcome(), ParseOutcome::SyntaxError { line: 1 });
    }

    #[test]
    fn test_line_without_delimiter() {
        init_logging();
        let store = ConfigStore::parse("[s]\nok = 1\njust words\n");
        assert_eq!(store.parse_outcome(), ParseOutcome::SyntaxError { line: 3 });

        let options = ScannerOptions::new().with_no_value(true);
        let store = parse_with_options("[s]\nok = 1\njust words\n", options);
        assert!(store.parse_outcome().is_success());
        assert!(store.has_value("s", "just words"));
        assert_eq!(store.get("s", "just words", "default"), "");
    }

    #[test]
    fn test_first_of_several_errors_is_reported() {
        let store = ConfigStore::parse("[s]\nbad one\na = 1\n[bad two\nb = 2\n");

        assert_eq!(store.parse_outcome(), ParseOutcome::SyntaxError { line: 2 });
        assert_eq!(store.get("s", "a", ""), "1");
        assert_eq!(store.get("s", "b", ""), "2");
    }

    #[test]
    fn test_windows_line_endings() {
        let store = ConfigStore::parse("[win]\r\npath = C:\\Temp\r\nflag = on\r\n");

        assert!(store.parse_outcome().is_success());
        assert_eq!(store.get("win", "path", ""), "C:\\Temp");
        assert!(store.get_boolean("win", "flag", false));
    }

    #[test]
    fn test_real_world_service_config() {
        let text = "\
[Service]
Name = api-gateway
Workers = 0x10
Timeout = 2.5
Debug = Off
Listen = 0.0.0.0:8080
Listen = [::]:8080

[Database]
Url = postgres://db.internal:5432/app
Pool = 032
";
        let store = ConfigStore::parse(text);

        assert!(store.check().is_ok());
        assert_eq!(store.get("service", "name", ""), "api-gateway");
        assert_eq!(store.get_integer("service", "workers", 1), 16);
        assert_eq!(store.get_real("service", "timeout", 30.0), 2.5);
        assert!(!store.get_boolean("service", "debug", true));
        assert_eq!(store.get("service", "listen", ""), "0.0.0.0:8080\n[::]:8080");
        assert_eq!(store.get_integer("database", "pool", 0), 26);
        assert_eq!(store.get_unsigned("database", "pool", 0), 26);
        assert_eq!(store.sections(), vec!["Service", "Database"]);
        assert!(store.has_section("DATABASE"));
        assert!(!store.has_section("cache"));
    }
}
