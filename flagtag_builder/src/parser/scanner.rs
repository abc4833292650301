use std::sync::Arc;

use crate::constant::*;
use crate::parser::base::*;
use crate::parser::registry::Registry;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Every `=` separates a value: `--a=b=c` is the name `--a` with the values `b` and `c`.
fn split_equals_delimiter(token: &str) -> (&str, Vec<&str>) {
    let mut pieces = token.split(VALUE_DELIMITER);
    let name = pieces.next().unwrap_or(token);
    (name, pieces.collect())
}

impl<'a> Registry<'a> {
    /// Walk the tokens, assigning values to the matching flags, then validate.
    ///
    /// Tokens not starting with `-` are skipped unless they follow a flag token, in which case they are its values.
    /// Unknown flags and surplus values abort immediately, leaving earlier assignments in place.
    /// Conversion failures and missing required flags are collected into [`ParseError::Invalid`].
    pub fn scan(&mut self, tokens: &[&str]) -> Result<(), ParseError> {
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i];
            i += 1;

            if !token.starts_with(SHORT_MARKER) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Skipping non-flag token '{token}'.");
                }

                continue;
            }

            let trailing = tokens[i..]
                .iter()
                .take_while(|candidate| !candidate.starts_with(SHORT_MARKER))
                .copied()
                .collect::<Vec<&str>>();
            i += trailing.len();

            let (name, mut values) = split_equals_delimiter(token);

            match self.index(name) {
                Some(index) => {
                    values.extend(trailing);

                    let raw = match values.as_slice() {
                        [] => "",
                        [value] => *value,
                        _ => {
                            return Err(ParseError::TooManyValues {
                                name: name.to_string(),
                                count: values.len(),
                            });
                        }
                    };

                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Matched '{name}' with value '{raw}'.");
                    }

                    self.descriptor_mut(index).assign(raw);
                    self.settle(index);
                }
                None if name.starts_with(LONG_MARKER) => {
                    return Err(ParseError::UnknownFlag(name.to_string()));
                }
                None => {
                    let cluster = &name[SHORT_MARKER.len()..];

                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Treating '{name}' as a cluster, discarding values {values:?} {trailing:?}.");
                    }

                    for character in cluster.chars() {
                        let short = format!("{SHORT_MARKER}{character}");

                        match self.index(&short) {
                            Some(index) => {
                                self.descriptor_mut(index).assign("");
                                self.settle(index);
                            }
                            None => return Err(ParseError::UnknownFlag(short)),
                        }
                    }
                }
            }
        }

        self.validate()
    }

    fn settle(&mut self, index: usize) {
        if self.descriptors()[index].error().is_none() {
            self.record(index);
        }
    }

    fn validate(&self) -> Result<(), ParseError> {
        let forced = self.descriptors().iter().any(|d| d.is_forced());
        let mut errors = ValidationErrors::default();

        for descriptor in self.descriptors() {
            if descriptor.is_required() && !descriptor.is_assigned() && !forced {
                errors.push(Issue::MissingRequired(descriptor.name().to_string()));
            }

            if descriptor.is_assigned() {
                if let Some(error) = descriptor.shared_error() {
                    errors.push(Issue::InvalidValue {
                        name: descriptor.name().to_string(),
                        cause: Arc::clone(error),
                    });
                }
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Validated with {} issues (forced: {forced}).", errors.len());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ParseError::Invalid(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ConversionError, Declaration, Flag, Flags, Helper, ParserTable};
    use crate::parser::registry::test::environment;
    use crate::test::assert_contains;
    use rand::{thread_rng, Rng};
    use rstest::rstest;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct Record {
        a: bool,
        b: bool,
        c: bool,
        count: u32,
        name: String,
        items: Vec<String>,
    }

    impl Flags for Record {
        fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
            declaration
                .add(Flag::new(&mut self.a, "a"))
                .add(Flag::new(&mut self.b, "b"))
                .add(Flag::new(&mut self.c, "c"))
                .add(Flag::new(&mut self.count, "n,count"))
                .add(Flag::new(&mut self.name, "name"))
                .add(Flag::new(&mut self.items, "i,item"));
        }
    }

    fn scan(
        record: &mut impl Flags,
        tokens: &[&str],
    ) -> (Result<(), ParseError>, HashMap<String, String>) {
        let mut declaration = Declaration::default();
        record.declare(&mut declaration);
        let mut registry =
            Registry::build_with(declaration, &ParserTable::default(), environment(&[])).unwrap();
        let result = registry.scan(tokens);
        (result, registry.into_values())
    }

    #[rstest]
    #[case("--a=b", "--a", vec!["b"])]
    #[case("--a=b=c", "--a", vec!["b", "c"])]
    #[case("--a=", "--a", vec![""])]
    #[case("--a", "--a", vec![])]
    #[case("-n=3", "-n", vec!["3"])]
    fn split_equals(#[case] token: &str, #[case] name: &str, #[case] values: Vec<&str>) {
        assert_eq!(split_equals_delimiter(token), (name, values));
    }

    #[test]
    fn scan_empty() {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, values) = scan(&mut record, empty::slice());

        // Verify
        result.unwrap();
        assert!(values.is_empty());
        assert!(!record.a);
    }

    #[rstest]
    #[case(vec!["--count", "5"])]
    #[case(vec!["--count=5"])]
    #[case(vec!["-n", "5"])]
    #[case(vec!["-n=5"])]
    #[case(vec!["positional", "-n", "5", "--", "positional"])]
    #[case(vec!["-n", "1", "-n", "5"])]
    fn scan_count(#[case] tokens: Vec<&str>) {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, values) = scan(&mut record, tokens.as_slice());

        // Verify
        if tokens.contains(&"--") {
            assert_matches!(result, Err(ParseError::UnknownFlag(name)) if name == "--");
        } else {
            result.unwrap();
        }
        assert_eq!(record.count, 5);
        assert_eq!(values.get("-n"), Some(&"5".to_string()));
        assert_eq!(values.get("--count"), Some(&"5".to_string()));
    }

    #[test]
    fn scan_inline_with_trailing() {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, _) = scan(&mut record, &["-n=3", "x"]);

        // Verify
        assert_matches!(result, Err(ParseError::TooManyValues { name, count: 2 }) if name == "-n");
        assert_eq!(record.count, 0);
    }

    #[test]
    fn scan_inline_repeated_delimiter() {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, values) = scan(&mut record, &["--name=a=b"]);

        // Verify
        assert_matches!(result, Err(ParseError::TooManyValues { name, count: 2 }) if name == "--name");
        assert_eq!(record.name, "");
        assert_eq!(values.get("--name"), None);
    }

    #[test]
    fn scan_inline_alone() {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, _) = scan(&mut record, &["-n=3", "--name", "x"]);

        // Verify
        result.unwrap();
        assert_eq!(record.count, 3);
        assert_eq!(record.name, "x");
    }

    #[rstest]
    #[case(vec!["-abc"])]
    #[case(vec!["-abc", "ignored", "values"])]
    #[case(vec!["-cba=discarded"])]
    #[case(vec!["-ab", "-c"])]
    fn scan_cluster(#[case] tokens: Vec<&str>) {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, values) = scan(&mut record, tokens.as_slice());

        // Verify
        result.unwrap();
        assert!(record.a);
        assert!(record.b);
        assert!(record.c);
        assert_eq!(record.count, 0);
        assert_eq!(values.get("-a"), Some(&"true".to_string()));
    }

    #[test]
    fn scan_cluster_unknown() {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, _) = scan(&mut record, &["-axb"]);

        // Verify
        assert_matches!(result, Err(ParseError::UnknownFlag(name)) if name == "-x");
        // Members before the unknown character are already assigned.
        assert!(record.a);
        assert!(!record.b);
    }

    #[test]
    fn scan_cluster_non_bool() {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, _) = scan(&mut record, &["-an"]);

        // Verify
        let error = result.unwrap_err();
        assert_contains!(error.to_string(), "assigned argument `--count` invalid");
        assert!(record.a);
    }

    #[test]
    fn scan_unknown_long() {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, _) = scan(&mut record, &["-a", "--nope", "-b"]);

        // Verify
        assert_matches!(result, Err(ParseError::UnknownFlag(name)) if name == "--nope");
        assert!(record.a);
        // Later tokens are left unprocessed.
        assert!(!record.b);
    }

    #[test]
    fn scan_too_many() {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, _) = scan(&mut record, &["--name", "x", "y", "z", "-a"]);

        // Verify
        assert_matches!(result, Err(ParseError::TooManyValues { name, count: 3 }) if name == "--name");
        assert_eq!(record.name, "");
        assert!(!record.a);
    }

    #[test]
    fn scan_invalid_value() {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, values) = scan(&mut record, &["--count", "x", "-a"]);

        // Verify
        let error = result.unwrap_err();
        assert_eq!(
            error.to_string(),
            "assigned argument `--count` invalid: cannot convert 'x' to u32"
        );
        assert_matches!(&error, ParseError::Invalid(errors) if errors.len() == 1);
        // Conversion errors do not abort the scan.
        assert!(record.a);
        assert_eq!(values.get("--count"), None);
    }

    #[test]
    fn scan_last_wins() {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, values) = scan(&mut record, &["--count", "x", "--count", "4"]);

        // Verify
        result.unwrap();
        assert_eq!(record.count, 4);
        assert_eq!(values.get("--count"), Some(&"4".to_string()));
    }

    #[test]
    fn scan_vec_appends() {
        // Setup
        let mut record = Record::default();

        // Execute
        let (result, values) = scan(&mut record, &["-i", "a", "--item=b,c", "-i", "d"]);

        // Verify
        result.unwrap();
        assert_eq!(record.items, vec!["a", "b", "c", "d"]);
        assert_eq!(values.get("-i"), Some(&"a,b,c,d".to_string()));
    }

    #[derive(Debug, Default)]
    struct Required {
        helper: Helper,
        name: String,
        port: u16,
        tags: Vec<String>,
    }

    impl Flags for Required {
        fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
            declaration
                .embed(&mut self.helper)
                .add(Flag::new(&mut self.name, "*name"))
                .add(Flag::new(&mut self.port, "p,port").required())
                .add(Flag::new(&mut self.tags, "t,tag").default("x,y"));
        }
    }

    #[test]
    fn scan_required_missing() {
        // Setup
        let mut record = Required::default();

        // Execute
        let (result, _) = scan(&mut record, &["-p", "nope"]);

        // Verify
        let error = result.unwrap_err();
        assert_eq!(
            error.to_string(),
            "required argument `--name` missing\nassigned argument `--port` invalid: cannot convert 'nope' to u16"
        );
        assert_matches!(&error, ParseError::Invalid(errors) if errors.len() == 2);
    }

    #[test]
    fn scan_required_present() {
        // Setup
        let mut record = Required::default();

        // Execute
        let (result, _) = scan(&mut record, &["--name", "x", "--port", "80"]);

        // Verify
        result.unwrap();
        assert_eq!(record.name, "x");
        assert_eq!(record.port, 80);
        assert_eq!(record.tags, vec!["x", "y"]);
    }

    #[rstest]
    #[case(vec!["-h"])]
    #[case(vec!["--help"])]
    #[case(vec!["--help", "--port", "80"])]
    fn scan_force_skips_required(#[case] tokens: Vec<&str>) {
        // Setup
        let mut record = Required::default();

        // Execute
        let (result, _) = scan(&mut record, tokens.as_slice());

        // Verify
        result.unwrap();
        assert!(record.helper.help);
    }

    #[test]
    fn scan_force_keeps_invalid() {
        // Setup
        let mut record = Required::default();

        // Execute
        let (result, _) = scan(&mut record, &["-h", "--port", "x"]);

        // Verify
        assert_matches!(result, Err(ParseError::Invalid(errors)) if errors.len() == 1);
    }

    #[test]
    fn scan_default_reset() {
        // Setup
        let mut record = Required::default();

        // Execute
        let (result, values) = scan(&mut record, &["--name=n", "-p=1", "-t", "a", "-t", "b"]);

        // Verify
        result.unwrap();
        assert_eq!(record.tags, vec!["a", "b"]);
        assert_eq!(values.get("--tag"), Some(&"a,b".to_string()));
    }

    #[derive(Debug, Default)]
    struct Environment {
        level: u8,
    }

    impl Flags for Environment {
        fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
            declaration.add(Flag::new(&mut self.level, "*l,level").default("1").env("LEVEL"));
        }
    }

    #[rstest]
    #[case(&[], empty::slice(), 1)]
    #[case(&[("LEVEL", "2")], empty::slice(), 2)]
    #[case(&[("LEVEL", "2")], &["-l", "3"], 3)]
    #[case(&[], &["--level=4"], 4)]
    fn scan_env_precedence(
        #[case] pairs: &[(&str, &str)],
        #[case] tokens: &[&str],
        #[case] expected: u8,
    ) {
        // Setup
        let mut record = Environment::default();
        let mut declaration = Declaration::default();
        record.declare(&mut declaration);
        let mut registry =
            Registry::build_with(declaration, &ParserTable::default(), environment(pairs)).unwrap();

        // Execute
        registry.scan(tokens).unwrap();

        // Verify
        assert_eq!(registry.value("-l"), Some(expected.to_string().as_str()));
        drop(registry);
        assert_eq!(record.level, expected);
    }

    #[test]
    fn scan_round_trip() {
        for _ in 0..50 {
            // Setup
            let count: u32 = thread_rng().gen();
            let items: Vec<String> = (0..thread_rng().gen_range(1..4))
                .map(|i| format!("item{i}"))
                .collect();
            let count_token = count.to_string();
            let items_token = items.join(",");
            let mut record = Record::default();
            let (result, values) = scan(
                &mut record,
                &["-n", count_token.as_str(), "--item", items_token.as_str(), "-b"],
            );
            result.unwrap();

            // Execute
            let mut replay = Record::default();
            let (result, _) = scan(
                &mut replay,
                &[
                    "-n",
                    values["-n"].as_str(),
                    "--item",
                    values["--item"].as_str(),
                    "-b",
                    values["-b"].as_str(),
                ],
            );

            // Verify
            result.unwrap();
            assert_eq!(replay.count, record.count);
            assert_eq!(replay.items, record.items);
            assert_eq!(replay.b, record.b);
        }
    }

    #[test]
    fn scan_negative_number() {
        // Setup
        let mut record = Record::default();
        let mut declaration = Declaration::default();
        record.declare(&mut declaration);
        let mut registry =
            Registry::build_with(declaration, &ParserTable::default(), environment(&[])).unwrap();

        // Execute
        let result = registry.scan(&["-n", "-5"]);

        // Verify
        // A negative number is a flag token, not a value.
        assert_matches!(result, Err(ParseError::UnknownFlag(name)) if name == "-5");
        assert_matches!(
            registry.lookup("--count").unwrap().error(),
            Some(ConversionError::InvalidConversion { token, .. }) if token.is_empty()
        );
    }
}
